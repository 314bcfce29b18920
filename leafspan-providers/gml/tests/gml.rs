#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! Integration tests for the GML provider.
use std::io::Write;

use leafspan_core::{CancellationToken, SolverKind};
use leafspan_providers_gml::{GmlError, GmlProvider};
use rstest::rstest;

const SQUARE: &str = r#"
graph [
  comment "4-cycle with ids out of order"
  node [ id 40 label "d" ]
  node [ id 10 label "a" ]
  node [ id 20 ]
  node [ id 30 ]
  edge [ source 10 target 20 ]
  edge [ source 20 target 30 ]
  edge [ source 30 target 40 ]
  edge [ source 40 target 10 ]
]
"#;

#[rstest]
fn remaps_nodes_in_declaration_order() {
    let provider = GmlProvider::try_from_str("square", SQUARE).expect("valid GML");
    assert_eq!(provider.name(), "square");
    assert_eq!(provider.vertex_ids(), &[40, 10, 20, 30]);
    assert_eq!(
        provider.graph().edges(),
        &[(1, 2), (2, 3), (3, 0), (0, 1)],
    );
}

#[rstest]
fn loaded_cycles_only_admit_paths() {
    let graph = GmlProvider::try_from_str("square", SQUARE)
        .expect("valid GML")
        .into_graph();
    for kind in SolverKind::ALL {
        assert!(kind.solve(&graph, 2, CancellationToken::new()), "{kind}");
        assert!(!kind.solve(&graph, 3, CancellationToken::new()), "{kind}");
    }
}

#[rstest]
#[case::missing_source("graph [ node [ id 1 ] edge [ target 1 ] ]", 0)]
#[case::missing_target(
    "graph [ node [ id 1 ] node [ id 2 ] edge [ source 1 target 2 ] edge [ source 2 ] ]",
    1
)]
fn edges_need_both_endpoints(#[case] text: &str, #[case] expected: usize) {
    let err = GmlProvider::try_from_str("bad", text).expect_err("endpoint is missing");
    assert!(
        matches!(err, GmlError::MissingEndpoint { edge_index } if edge_index == expected),
        "{err}",
    );
}

#[rstest]
fn edges_must_name_declared_nodes() {
    let text = "graph [ node [ id 1 ] edge [ source 1 target 99 ] ]";
    let err = GmlProvider::try_from_str("bad", text).expect_err("node 99 is undeclared");
    assert!(matches!(err, GmlError::UnknownNode { id: 99 }), "{err}");
}

#[rstest]
#[case::no_graph("Creator \"nobody\"")]
#[case::no_nodes("graph [ directed 0 ]")]
#[case::empty("")]
fn documents_without_nodes_are_empty(#[case] text: &str) {
    let err = GmlProvider::try_from_str("empty", text).expect_err("graph has no nodes");
    assert!(matches!(err, GmlError::EmptyGraph), "{err}");
}

#[rstest]
fn unbalanced_documents_are_rejected() {
    let err = GmlProvider::try_from_str("bad", "graph [ node [ id 1 ]")
        .expect_err("brackets must balance");
    assert!(matches!(err, GmlError::UnbalancedBrackets { .. }), "{err}");
}

#[rstest]
fn reads_files_from_disk() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(SQUARE.as_bytes())?;
    let provider = GmlProvider::try_from_path("square", file.path())?;
    assert_eq!(provider.graph().vertex_count(), 4);
    assert_eq!(provider.graph().edge_count(), 4);
    Ok(())
}

#[rstest]
fn missing_files_surface_as_io_errors() {
    let err = GmlProvider::try_from_path("missing", "/definitely/not/here.gml")
        .expect_err("missing file must fail");
    assert!(matches!(err, GmlError::Io(_)));
}
