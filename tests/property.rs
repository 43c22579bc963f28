// tests/property.rs

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;
use wavedag::dag::{Dag, Status, Vertex};
use wavedag::engine::WaveScheduler;
use wavedag::errors::WavedagError;
use wavedag_test_utils::scripted_executor::{ScriptedExecutor, Step};

fn name(i: usize) -> String {
    format!("v{i:02}")
}

// Strategy for a random DAG: vertex i may only depend on vertices 0..i,
// so every generated edge points "forward" and the result is acyclic.
fn dag_strategy(max_vertices: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2..=max_vertices).prop_flat_map(|n| {
        let edges = proptest::collection::vec((0..n, 0..n), 0..n * 2).prop_map(|raw| {
            let mut seen = HashSet::new();
            raw.into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .filter(|e| seen.insert(*e))
                .collect::<Vec<_>>()
        });
        (Just(n), edges)
    })
}

fn build(n: usize, edges: &[(usize, usize)]) -> Dag {
    let mut dag = Dag::new();
    for i in 0..n {
        dag.add_vertex(Vertex::new(name(i)).can_fail(true)).unwrap();
    }
    for (from, to) in edges {
        dag.add_edge(&name(*from), &name(*to)).unwrap();
    }
    dag
}

fn reachable(dag: &Dag, from: &str, to: &str) -> bool {
    let mut stack = vec![from.to_string()];
    let mut seen = BTreeSet::new();
    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if seen.insert(node.clone()) {
            stack.extend(dag.children_of(&node).iter().cloned());
        }
    }
    false
}

proptest! {
    #[test]
    fn forward_edges_are_always_accepted((n, edges) in dag_strategy(12)) {
        let dag = build(n, &edges);
        prop_assert_eq!(dag.edges().len(), edges.len());
    }

    #[test]
    fn an_edge_is_rejected_exactly_when_it_closes_a_cycle(
        (n, edges) in dag_strategy(10),
        a in 0..10usize,
        b in 0..10usize,
    ) {
        let mut dag = build(n, &edges);
        let (from, to) = (name(a % n), name(b % n));
        let closes_cycle = from == to || reachable(&dag, &to, &from);
        let before = dag.edges().len();

        match dag.add_edge(&from, &to) {
            Ok(()) => {
                prop_assert!(!closes_cycle);
                prop_assert_eq!(dag.edges().len(), before + 1);
            }
            Err(WavedagError::CycleDetected { .. }) => {
                prop_assert!(closes_cycle);
                prop_assert_eq!(dag.edges().len(), before);
            }
            Err(e) => prop_assert!(false, "unexpected error {:?}", e),
        }
    }

    #[test]
    fn readiness_matches_its_definition(
        (n, edges) in dag_strategy(10),
        resolved in proptest::collection::vec(any::<Option<bool>>(), 10),
    ) {
        let mut dag = build(n, &edges);
        dag.start();
        for i in 0..n {
            let handle = dag.vertex(&name(i)).unwrap();
            match resolved[i] {
                Some(true) => { handle.mark_passed(); }
                Some(false) => { handle.mark_failed(); }
                None => {}
            }
        }

        let ready: BTreeSet<String> = dag.next_wave().unwrap().into_iter().collect();
        for i in 0..n {
            let id = name(i);
            let expected = dag.status_of(&id) == Some(Status::Pending)
                && dag
                    .parents_of(&id)
                    .iter()
                    .all(|p| dag.status_of(p) != Some(Status::Pending));
            prop_assert_eq!(dag.can_execute(&id), expected);
            prop_assert_eq!(ready.contains(&id), expected);
        }
    }

    #[test]
    fn runs_terminate_with_every_vertex_resolved(
        (n, edges) in dag_strategy(10),
        failing in proptest::collection::vec(0..10usize, 0..4),
    ) {
        let mut dag = build(n, &edges);
        let mut executor = ScriptedExecutor::new();
        for i in failing {
            executor = executor.vertex(&name(i % n), Step::Fail);
        }

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let summary = rt.block_on(WaveScheduler::new(executor).run(&mut dag)).unwrap();

        // Every vertex may fail, so failures are absorbed.
        prop_assert_eq!(summary.status, Status::Passed);
        prop_assert!(dag.statuses().values().all(|s| s.is_terminal()));
        prop_assert_eq!(summary.waves.len(), dag.levels().len());
        prop_assert_eq!(dag.has_finished(), dag.has_failed() || dag.has_succeeded());
    }
}
