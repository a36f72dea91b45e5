use crate::constructive::greedy_tour;
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::evaluation::sum_edges;
use crate::local_search::two_opt;
use crate::models::{check_unique_names, Route, Stop, TspSolution};

use super::TspOptions;

/// Minimum number of stops that forms a tour.
const MIN_TOUR_STOPS: usize = 2;

/// Solves the single-vehicle tour over `stops` with default options.
///
/// Distances are geodesic kilometres and the tour returns to the first stop.
///
/// # Errors
///
/// [`Error::InsufficientStops`] for fewer than two stops. This is the
/// non-fatal "no route" outcome; see [`Error::is_no_route`].
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Stop;
/// use route_optimizer::tsp::solve_tsp;
///
/// let stops = vec![
///     Stop::new("Gyan Ganga", 23.1292, 79.8749),
///     Stop::new("Global College", 23.2022, 79.8830),
///     Stop::new("Sea World", 23.1566, 79.8412),
///     Stop::new("IT Park", 23.1307, 79.8810),
/// ];
/// let sol = solve_tsp(&stops).unwrap();
/// assert_eq!(sol.order().len(), 5);
/// assert_eq!(sol.order()[0], 0);
/// assert_eq!(sol.order()[4], 0);
/// assert!(sol.total_distance() <= sol.initial_distance());
///
/// assert!(solve_tsp(&stops[..1]).unwrap_err().is_no_route());
/// ```
pub fn solve_tsp(stops: &[Stop]) -> Result<TspSolution> {
    solve_tsp_with(stops, &TspOptions::default())
}

/// Solves the single-vehicle tour over `stops` with explicit options.
///
/// Fails with [`Error::InvalidInput`] if two stops share a name.
pub fn solve_tsp_with(stops: &[Stop], options: &TspOptions) -> Result<TspSolution> {
    if stops.len() < MIN_TOUR_STOPS {
        return Err(Error::InsufficientStops { count: stops.len() });
    }
    check_unique_names(stops)?;
    let matrix = DistanceMatrix::from_stops(stops, options.metric);
    solve_tsp_matrix(&matrix, options)
}

/// Solves the single-vehicle tour over a prebuilt matrix.
///
/// `options.metric` is ignored; the matrix already fixes the distances.
///
/// # Examples
///
/// ```
/// use route_optimizer::distance::DistanceMatrix;
/// use route_optimizer::tsp::{solve_tsp_matrix, TspOptions};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 5.0],
///     vec![1.0, 0.0, 1.0],
///     vec![5.0, 1.0, 0.0],
/// ]).unwrap();
/// let open = TspOptions::default().with_return_to_start(false);
/// let sol = solve_tsp_matrix(&dm, &open).unwrap();
/// assert_eq!(sol.order(), &[0, 1, 2]);
/// assert_eq!(sol.total_distance(), 2.0);
/// ```
pub fn solve_tsp_matrix(matrix: &DistanceMatrix, options: &TspOptions) -> Result<TspSolution> {
    let n = matrix.size();
    if n < MIN_TOUR_STOPS {
        return Err(Error::InsufficientStops { count: n });
    }

    let closed = options.return_to_start;
    let greedy = greedy_tour(matrix, closed);
    let initial = sum_edges(&greedy, matrix);
    log::debug!("tsp.greedy: n={n} closed={closed} dist={initial:.3}");

    let outcome = two_opt(&greedy, matrix, closed);
    let distance = sum_edges(&outcome.tour, matrix);
    log::debug!(
        "tsp.two_opt: passes={} moves={} dist={distance:.3}",
        outcome.passes,
        outcome.moves
    );
    log::info!("tsp: n={n} dist_before={initial:.3} dist_after={distance:.3}");

    Ok(TspSolution::new(
        Route::new(0, outcome.tour, distance),
        initial,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Metric;
    use crate::evaluation::route_length;
    use crate::local_search::two_opt;
    use proptest::prelude::*;

    fn unit_square() -> Vec<Stop> {
        vec![
            Stop::new("a", 0.0, 0.0),
            Stop::new("b", 0.0, 1.0),
            Stop::new("c", 1.0, 1.0),
            Stop::new("d", 1.0, 0.0),
        ]
    }

    fn euclidean() -> TspOptions {
        TspOptions::default().with_metric(Metric::Euclidean)
    }

    #[test]
    fn test_unit_square_perimeter() {
        let sol = solve_tsp_with(&unit_square(), &euclidean()).expect("solvable");
        assert!((sol.total_distance() - 4.0).abs() < 1e-10);
        assert_eq!(sol.order().len(), 5);
        assert_eq!(sol.order().first(), sol.order().last());
    }

    #[test]
    fn test_two_stops() {
        let stops = &unit_square()[..2];
        let sol = solve_tsp_with(stops, &euclidean()).expect("solvable");
        assert_eq!(sol.order(), &[0, 1, 0]);
        assert!((sol.total_distance() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_too_few_stops() {
        assert_eq!(
            solve_tsp(&[]).unwrap_err(),
            Error::InsufficientStops { count: 0 }
        );
        let one = &unit_square()[..1];
        assert!(solve_tsp(one).unwrap_err().is_no_route());
    }

    #[test]
    fn test_duplicate_stop_names_rejected() {
        let stops = vec![
            Stop::new("Depot", 0.0, 0.0),
            Stop::new("A", 0.0, 1.0),
            Stop::new("A", 1.0, 1.0),
        ];
        let err = solve_tsp(&stops).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(!err.is_no_route());
    }

    #[test]
    fn test_open_path() {
        let opts = euclidean().with_return_to_start(false);
        let sol = solve_tsp_with(&unit_square(), &opts).expect("solvable");
        assert_eq!(sol.order().len(), 4);
        assert_eq!(sol.order()[0], 0);
        assert!((sol.total_distance() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_geodesic_route_length_matches() {
        let stops = vec![
            Stop::new("Gyan Ganga", 23.129_210_544, 79.874_867_495),
            Stop::new("Global College", 23.202_199_826, 79.883_045_056),
            Stop::new("Sea World", 23.156_578_080, 79.841_234_571),
            Stop::new("South Avenue Mall", 23.124_602_189, 79.927_164_220),
            Stop::new("JNKVV", 23.215_416_062, 79.960_916_391),
            Stop::new("IT Park", 23.130_691_256, 79.880_984_909),
        ];
        let sol = solve_tsp(&stops).expect("solvable");
        let dm = DistanceMatrix::from_stops(&stops, Metric::Geodesic);
        let recomputed = route_length(sol.order(), &dm).expect("valid");
        assert!((sol.total_distance() - recomputed).abs() < 1e-9);
        assert_eq!(sol.itinerary(&stops)[0], "Gyan Ganga");
    }

    #[test]
    fn test_nan_coordinates_propagate() {
        let stops = vec![
            Stop::new("a", 0.0, 0.0),
            Stop::new("b", f64::NAN, 1.0),
            Stop::new("c", 1.0, 1.0),
        ];
        let sol = solve_tsp_with(&stops, &euclidean()).expect("not validated");
        assert!(sol.total_distance().is_nan());
    }

    fn stops_strategy() -> impl Strategy<Value = Vec<Stop>> {
        prop::collection::vec((-60.0f64..60.0, -170.0f64..170.0), 2..14).prop_map(|coords| {
            coords
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lon))| Stop::new(format!("s{i}"), lat, lon))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_tour_visits_every_stop_once(stops in stops_strategy()) {
            let sol = solve_tsp(&stops).expect("solvable");
            let order = sol.order();
            prop_assert_eq!(order.len(), stops.len() + 1);
            prop_assert_eq!(order[0], order[order.len() - 1]);
            let mut inner = order[..stops.len()].to_vec();
            inner.sort_unstable();
            prop_assert_eq!(inner, (0..stops.len()).collect::<Vec<_>>());
        }

        #[test]
        fn prop_reported_length_is_route_length(stops in stops_strategy()) {
            let sol = solve_tsp(&stops).expect("solvable");
            let dm = DistanceMatrix::from_stops(&stops, Metric::Geodesic);
            let len = route_length(sol.order(), &dm).expect("valid");
            prop_assert!((sol.total_distance() - len).abs() < 1e-9);
        }

        #[test]
        fn prop_two_opt_never_worse_than_greedy(stops in stops_strategy()) {
            let sol = solve_tsp_with(&stops, &euclidean()).expect("solvable");
            prop_assert!(sol.total_distance() <= sol.initial_distance() + 1e-9);
        }

        #[test]
        fn prop_two_opt_is_idempotent(stops in stops_strategy(), closed in any::<bool>()) {
            let opts = euclidean().with_return_to_start(closed);
            let sol = solve_tsp_with(&stops, &opts).expect("solvable");
            let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
            let again = two_opt(sol.order(), &dm, closed);
            prop_assert_eq!(again.moves, 0);
            prop_assert_eq!(again.tour.as_slice(), sol.order());
        }

        #[test]
        fn prop_matrix_symmetric_zero_diagonal(stops in stops_strategy()) {
            let dm = DistanceMatrix::from_stops(&stops, Metric::Geodesic);
            for i in 0..dm.size() {
                prop_assert_eq!(dm.get(i, i), 0.0);
                for j in 0..dm.size() {
                    prop_assert_eq!(dm.get(i, j), dm.get(j, i));
                    prop_assert!(dm.get(i, j) >= 0.0);
                }
            }
        }
    }
}
