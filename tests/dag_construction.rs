// tests/dag_construction.rs

use wavedag::dag::{Dag, Status, Vertex};
use wavedag::errors::WavedagError;
use wavedag_test_utils::builders::{FIVE_VERTEX_EDGES, dag_from, five_vertex_dag};
use wavedag_test_utils::init_tracing;

fn abc() -> Dag {
    dag_from(
        vec![Vertex::new("A"), Vertex::new("B"), Vertex::new("C")],
        &[("A", "B"), ("B", "C")],
    )
}

#[test]
fn edges_populate_parents_and_children_symmetrically() {
    init_tracing();
    let dag = abc();

    assert_eq!(dag.children_of("A"), ["B".to_string()]);
    assert_eq!(dag.parents_of("B"), ["A".to_string()]);
    assert_eq!(dag.children_of("B"), ["C".to_string()]);
    assert_eq!(dag.parents_of("C"), ["B".to_string()]);
    assert!(dag.parents_of("A").is_empty());
    assert!(dag.children_of("C").is_empty());
    assert_eq!(dag.roots(), vec!["A"]);
}

#[test]
fn closing_a_cycle_is_rejected_and_leaves_adjacency_untouched() {
    init_tracing();
    let mut dag = abc();
    let before = dag.edges().iter().map(|(f, t)| (f.to_string(), t.to_string())).collect::<Vec<_>>();

    match dag.add_edge("C", "A") {
        Err(WavedagError::CycleDetected { from, to }) => {
            assert_eq!(from, "C");
            assert_eq!(to, "A");
        }
        other => panic!("expected CycleDetected, got {other:?}"),
    }

    let after = dag.edges().iter().map(|(f, t)| (f.to_string(), t.to_string())).collect::<Vec<_>>();
    assert_eq!(before, after);
    assert!(dag.parents_of("A").is_empty());
    assert!(dag.children_of("C").is_empty());
}

#[test]
fn is_cyclic_checks_reachability_from_the_target() {
    let dag = abc();

    assert!(dag.is_cyclic("C", "A"));
    assert!(dag.is_cyclic("B", "A"));
    assert!(!dag.is_cyclic("A", "C"));
    assert!(dag.is_cyclic("C", "B"));
}

#[test]
fn self_edge_counts_as_cycle() {
    let mut dag = dag_from(vec![Vertex::new("A")], &[]);

    assert!(dag.is_cyclic("A", "A"));
    assert!(matches!(
        dag.add_edge("A", "A"),
        Err(WavedagError::CycleDetected { .. })
    ));
    assert!(dag.parents_of("A").is_empty());
}

#[test]
fn five_vertex_scenario_accepts_forward_edges_and_rejects_back_edges() {
    init_tracing();
    let mut dag = five_vertex_dag(true);

    assert_eq!(dag.edges().len(), FIVE_VERTEX_EDGES.len());

    for (from, to) in [("B", "A"), ("D", "A"), ("E", "A")] {
        let result = dag.add_edge(from, to);
        assert!(
            matches!(result, Err(WavedagError::CycleDetected { .. })),
            "{from} -> {to} should be rejected, got {result:?}"
        );
    }

    assert_eq!(dag.edges().len(), FIVE_VERTEX_EDGES.len());
}

#[test]
fn edge_to_unknown_vertex_is_rejected() {
    let mut dag = dag_from(vec![Vertex::new("A")], &[]);

    match dag.add_edge("A", "ghost") {
        Err(WavedagError::UnknownVertex(id)) => assert_eq!(id, "ghost"),
        other => panic!("expected UnknownVertex, got {other:?}"),
    }
    match dag.add_edge("ghost", "A") {
        Err(WavedagError::UnknownVertex(id)) => assert_eq!(id, "ghost"),
        other => panic!("expected UnknownVertex, got {other:?}"),
    }
    assert!(dag.edges().is_empty());
}

#[test]
fn duplicate_vertex_id_overwrites_and_keeps_edges() {
    init_tracing();
    let mut dag = dag_from(
        vec![Vertex::new("A"), Vertex::new("B")],
        &[("A", "B")],
    );

    dag.add_vertex(Vertex::new("B").repetitions(4).can_fail(true))
        .expect("graph not started");

    assert_eq!(dag.len(), 2);
    let b = dag.get("B").expect("B registered");
    assert_eq!(b.repetition_count(), 4);
    assert!(b.may_fail());
    assert_eq!(dag.parents_of("B"), ["A".to_string()]);
    assert_eq!(dag.status_of("B"), Some(Status::Pending));
}

#[test]
fn stale_handle_follows_the_replacement_fail_policy() {
    let mut dag = Dag::new();
    let stale = dag.add_vertex(Vertex::new("A")).expect("fresh graph");
    assert!(!stale.can_fail());

    dag.add_vertex(Vertex::new("A").can_fail(true))
        .expect("graph not started");

    assert!(stale.can_fail());
    assert!(stale.mark_failed());
    assert_eq!(dag.status_of("A"), Some(Status::Failed));
    assert!(!dag.has_failed());
}

#[test]
fn topology_is_frozen_after_first_readiness_computation() {
    let mut dag = abc();
    dag.next_wave().expect("fresh graph");

    assert!(dag.is_started());
    assert!(matches!(
        dag.add_vertex(Vertex::new("D")),
        Err(WavedagError::GraphStarted { .. })
    ));
    assert!(matches!(
        dag.add_edge("A", "C"),
        Err(WavedagError::GraphStarted { .. })
    ));
    assert!(!dag.contains("D"));
    assert_eq!(dag.edges().len(), 2);
}

#[test]
fn explicit_start_freezes_topology() {
    let mut dag = abc();
    dag.start();
    dag.start();

    assert!(dag.is_started());
    assert!(matches!(
        dag.add_vertex(Vertex::new("D")),
        Err(WavedagError::GraphStarted { operation }) if operation == "add vertex"
    ));
    assert!(matches!(
        dag.add_edge("A", "C"),
        Err(WavedagError::GraphStarted { operation }) if operation == "add edge"
    ));
}

#[test]
fn repetitions_are_clamped_to_one() {
    let v = Vertex::new("A").repetitions(0);
    assert_eq!(v.repetition_count(), 1);
    assert!(!v.may_fail());
}

#[test]
fn new_graph_is_pending_and_unfinished() {
    let dag = Dag::new();

    assert!(dag.is_empty());
    assert_eq!(dag.status(), Status::Pending);
    assert!(!dag.has_failed());
    assert!(!dag.has_succeeded());
    assert!(!dag.has_finished());
}

#[test]
fn vertex_handle_reports_its_state() {
    let dag = dag_from(vec![Vertex::new("A").can_fail(true)], &[]);
    let handle = dag.vertex("A").expect("registered");

    assert_eq!(handle.id(), "A");
    assert!(handle.can_fail());
    assert_eq!(handle.to_string(), "Vertex A is in state: Pending");

    assert!(handle.mark_passed());
    assert_eq!(handle.status(), Status::Passed);
    assert_eq!(handle.to_string(), "Vertex A is in state: Passed");
    handle.report_state();
}
