#![expect(clippy::expect_used, reason = "tests require contextual panics")]

use leafspan_core::{Graph, GraphError, GraphErrorCode};
use rstest::rstest;

#[rstest]
#[case(
    GraphError::InvalidVertex { vertex: 4, vertex_count: 3 },
    GraphErrorCode::InvalidVertex,
    "GRAPH_INVALID_VERTEX",
)]
#[case(
    GraphError::DimensionOverflow { rows: usize::MAX, cols: 2 },
    GraphErrorCode::DimensionOverflow,
    "GRAPH_DIMENSION_OVERFLOW",
)]
fn returns_expected_graph_code(
    #[case] error: GraphError,
    #[case] expected: GraphErrorCode,
    #[case] label: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), label);
    assert_eq!(expected.to_string(), label);
}

#[rstest]
fn invalid_vertex_message_names_both_sides() {
    let err = Graph::from_edges(3, vec![(0, 1), (1, 7)]).expect_err("vertex 7 is out of range");
    assert_eq!(err.code(), GraphErrorCode::InvalidVertex);
    assert_eq!(
        err.to_string(),
        "edge references vertex 7, but vertex_count is 3",
    );
}

#[rstest]
fn grid_overflow_reports_dimensions() {
    let err = Graph::grid(usize::MAX, 3).expect_err("grid must overflow");
    assert_eq!(
        err,
        GraphError::DimensionOverflow {
            rows: usize::MAX,
            cols: 3,
        },
    );
}
