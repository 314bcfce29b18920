//! Public solver API and its instrumentation.
#![expect(clippy::expect_used, reason = "tests require contextual panics")]

use leafspan_core::{
    BaselineSolver, BranchAndBoundSolver, CancellationToken, Graph, SolverKind,
};
use leafspan_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use tracing::Level;

#[fixture]
fn grid() -> Graph {
    Graph::grid(3, 3).expect("grid must build")
}

#[rstest]
fn both_solvers_find_a_five_leaf_tree_in_a_grid(grid: Graph) {
    assert!(BaselineSolver::new(&grid, 5, CancellationToken::new()).solve());
    assert!(BranchAndBoundSolver::new(&grid, 5, CancellationToken::new()).solve());
}

#[rstest]
fn solvers_can_share_one_graph_across_threads(grid: Graph) {
    let answers: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = SolverKind::ALL
            .into_iter()
            .map(|kind| {
                let graph = &grid;
                scope.spawn(move || kind.solve(graph, 6, CancellationToken::new()))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("solver thread must not panic"))
            .collect()
    });
    assert_eq!(answers, vec![true, true]);
}

#[rstest]
#[case::baseline(SolverKind::Baseline)]
#[case::branch_and_bound(SolverKind::BranchAndBound)]
fn solve_span_records_inputs(grid: Graph, #[case] kind: SolverKind) {
    let (found, layer) = RecordingLayer::capture(|| kind.solve(&grid, 5, CancellationToken::new()));
    assert!(found);

    let span = layer.span_named("solver.solve").expect("solve span recorded");
    assert_eq!(span.field("solver"), Some(kind.as_str()));
    assert_eq!(span.field("vertices"), Some("9"));
    assert_eq!(span.field("edges"), Some("12"));
    assert_eq!(span.field("k"), Some("5"));

    let finished = layer.events_with_message("search finished");
    let event = finished.first().expect("completion event recorded");
    assert_eq!(event.level, Level::DEBUG);
    assert_eq!(event.field("found"), Some("true"));
}

#[rstest]
fn cancellation_is_logged(grid: Graph) {
    let token = CancellationToken::new();
    token.cancel();
    let (found, layer) = RecordingLayer::capture(|| {
        BranchAndBoundSolver::new(&grid, 5, token.clone()).solve()
    });
    assert!(!found);
    let cancelled = layer.events_with_message("search cancelled");
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled.first().map(|event| event.level), Some(Level::INFO));
}

#[rstest]
fn graph_construction_is_instrumented() {
    let (graph, layer) =
        RecordingLayer::capture(|| Graph::from_edges(3, vec![(0, 1), (1, 2)]));
    assert!(graph.is_ok());
    let span = layer
        .span_named("graph.from_edges")
        .expect("construction span recorded");
    assert_eq!(span.field("edges"), Some("2"));
}

#[rstest]
fn rejected_graphs_record_the_error() {
    let (graph, layer) = RecordingLayer::capture(|| Graph::from_edges(2, vec![(0, 2)]));
    assert!(graph.is_err());
    let errors: Vec<_> = layer
        .events()
        .into_iter()
        .filter(|event| event.level == Level::ERROR)
        .collect();
    assert_eq!(errors.len(), 1);
}
