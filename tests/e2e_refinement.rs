//! Property tests for overlap refinement over random deck sets.
//!
//! Decks draw from a pool of twelve cards so graphs stay small and dense
//! enough for overlaps to appear. Seeds come either from arbitrary labels
//! or from the CPM detector.

use archetype_graph::classify::classify_edges;
use archetype_graph::community::seed_partition;
use archetype_graph::{
    ClusterSet, Collection, CooccurrenceGraph, CpmLocalMoving, ItemRegistry, OverlapRefiner,
    SeedPartition, Threshold, VertexDecision, VertexId,
};
use proptest::prelude::*;

const POOL: u8 = 12;

fn decks() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(0..POOL, 1..6), 1..12)
}

fn labels() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..4, POOL as usize)
}

fn graph_from(raw: &[Vec<u8>]) -> CooccurrenceGraph {
    let collections: Vec<Collection> = raw
        .iter()
        .map(|deck| deck.iter().map(|c| format!("card{c:02}")).collect())
        .collect();
    CooccurrenceGraph::build(&ItemRegistry::from_collections(&collections))
}

fn labelled_seed(graph: &CooccurrenceGraph, labels: &[usize]) -> SeedPartition {
    SeedPartition::from_labels(&labels[..graph.vertex_count()]).unwrap()
}

fn refiner(tau: f64) -> OverlapRefiner {
    OverlapRefiner::new(Threshold::new(tau).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Memberships only grow, and the run ends within M·K sweeps.
    #[test]
    fn prop_sweeps_grow_memberships_and_terminate(
        raw in decks(),
        labels in labels(),
        tau in 0.05f64..=1.0,
    ) {
        let graph = graph_from(&raw);
        let seed = labelled_seed(&graph, &labels);
        let refiner = refiner(tau);
        let bound = graph.vertex_count() * seed.cluster_count();

        let mut live = seed.initial_memberships();
        let mut sweeps = 0;
        loop {
            let before = live.clone();
            let added = refiner.sweep(&graph, &mut live, seed.cluster_count()).unwrap();
            sweeps += 1;
            for (old, new) in before.iter().zip(&live) {
                prop_assert!(old.is_subset(new), "{old} is not within {new}");
            }
            let grown: usize = before.iter().zip(&live).map(|(o, n)| n.len() - o.len()).sum();
            prop_assert_eq!(grown, added);
            if added == 0 {
                break;
            }
            prop_assert!(sweeps <= bound, "{sweeps} sweeps exceeds M·K = {bound}");
        }

        let outcome = refiner.refine(&graph, &seed).unwrap();
        prop_assert_eq!(outcome.sweeps, sweeps);
        prop_assert_eq!(&outcome.memberships, &live);
    }

    /// Each vertex keeps its seed cluster and gains at most one cluster per sweep.
    #[test]
    fn prop_seed_cluster_retained(
        raw in decks(),
        labels in labels(),
        tau in 0.05f64..=1.0,
    ) {
        let graph = graph_from(&raw);
        let seed = labelled_seed(&graph, &labels);
        let outcome = refiner(tau).refine(&graph, &seed).unwrap();

        for (v, clusters) in outcome.memberships.iter().enumerate() {
            let home = seed.cluster_of(VertexId(v)).unwrap();
            prop_assert!(clusters.contains(home));
            prop_assert!(clusters.len() <= outcome.sweeps.max(1));
            prop_assert!(clusters.iter().all(|k| k.index() < seed.cluster_count()));
        }
        prop_assert_eq!(outcome.additions, outcome.additions_per_sweep.iter().sum::<usize>());
        prop_assert_eq!(outcome.additions_per_sweep.last().copied(), Some(0));
    }

    /// A converged state is a fixed point: one more sweep adds nothing.
    #[test]
    fn prop_converged_state_is_fixed_point(
        raw in decks(),
        labels in labels(),
        tau in 0.05f64..=1.0,
    ) {
        let graph = graph_from(&raw);
        let seed = labelled_seed(&graph, &labels);
        let refiner = refiner(tau);
        let mut memberships = refiner.refine(&graph, &seed).unwrap().memberships;
        let frozen = memberships.clone();
        prop_assert_eq!(refiner.sweep(&graph, &mut memberships, seed.cluster_count()).unwrap(), 0);
        prop_assert_eq!(memberships, frozen);
    }

    /// Edges are interior exactly when their endpoints share a cluster.
    #[test]
    fn prop_classification_matches_memberships(
        raw in decks(),
        resolution in prop::sample::select(vec![0.25, 0.5, 1.0, 2.0]),
        tau in 0.05f64..=1.0,
    ) {
        let graph = graph_from(&raw);
        let seed = seed_partition(&CpmLocalMoving::new(), &graph, resolution).unwrap();
        let memberships = refiner(tau).refine(&graph, &seed).unwrap().memberships;
        let classes = classify_edges(&graph, &memberships).unwrap();

        prop_assert_eq!(classes.len(), graph.edge_count());
        for (edge, class) in graph.edges().iter().zip(&classes) {
            let shared = memberships[edge.src.index()].intersects(&memberships[edge.dst.index()]);
            prop_assert_eq!(class.is_interior(), shared);
        }
    }

    /// Vertices with no neighbors never change.
    #[test]
    fn prop_isolated_vertices_untouched(
        raw in decks(),
        labels in labels(),
        tau in 0.05f64..=1.0,
    ) {
        let graph = graph_from(&raw);
        let seed = labelled_seed(&graph, &labels);
        let refiner = refiner(tau);
        let initial = seed.initial_memberships();
        let outcome = refiner.refine(&graph, &seed).unwrap();
        let mut tally = Vec::new();

        for v in (0..graph.vertex_count()).map(VertexId) {
            if graph.degree(v) == 0 {
                prop_assert_eq!(
                    refiner.assess_vertex(&graph, &initial, v, seed.cluster_count(), &mut tally).unwrap(),
                    VertexDecision::Degenerate
                );
                prop_assert_eq!(&outcome.memberships[v.index()], &initial[v.index()]);
            }
        }
    }

    /// With τ = 1, the first sweep grows exactly the vertices that touch
    /// another cluster.
    #[test]
    fn prop_full_threshold_first_sweep(raw in decks(), labels in labels()) {
        let graph = graph_from(&raw);
        let seed = labelled_seed(&graph, &labels);
        let mut live = seed.initial_memberships();
        refiner(1.0).sweep(&graph, &mut live, seed.cluster_count()).unwrap();

        for v in (0..graph.vertex_count()).map(VertexId) {
            let home = seed.cluster_of(v).unwrap();
            let touches_other = graph.neighbors(v).any(|n| seed.cluster_of(n) != Some(home));
            prop_assert_eq!(live[v.index()].len() == 2, touches_other);
        }
    }

    /// The rayon path agrees with the sequential one.
    #[cfg(feature = "parallel")]
    #[test]
    fn prop_parallel_matches_sequential(
        raw in decks(),
        labels in labels(),
        tau in 0.05f64..=1.0,
    ) {
        let graph = graph_from(&raw);
        let seed = labelled_seed(&graph, &labels);
        let sequential = refiner(tau).refine(&graph, &seed).unwrap();
        let parallel = refiner(tau).with_parallel(true).refine(&graph, &seed).unwrap();
        prop_assert_eq!(sequential.memberships, parallel.memberships);
        prop_assert_eq!(sequential.additions_per_sweep, parallel.additions_per_sweep);
    }
}

#[test]
fn test_singleton_memberships_from_seed() {
    let seed = SeedPartition::from_labels(&[7, 7, 3, 9, 3]).unwrap();
    let initial: Vec<Vec<u32>> = seed
        .initial_memberships()
        .iter()
        .map(|s: &ClusterSet| s.iter().map(|k| k.0).collect())
        .collect();
    assert_eq!(initial, vec![vec![0], vec![0], vec![1], vec![2], vec![1]]);
}
