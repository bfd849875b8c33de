//! # Overlap Refinement
//!
//! Relaxes a disjoint seed partition into overlapping cluster memberships.
//!
//! ## The Rule
//!
//! For a vertex v with cluster set S, count the cluster memberships of its
//! structural neighbors (a neighbor in two clusters counts toward both):
//!
//! ```text
//! tally[k] = #{ neighbors n : k ∈ clusters(n) }
//! inside   = Σ_{k ∈ S} tally[k]
//! total    = Σ_k tally[k]
//! ```
//!
//! If `inside / total < τ`, v joins the most represented cluster it does not
//! already hold (lowest id on ties). At most one cluster is added per vertex
//! per sweep. A vertex with `total == 0` has nothing to compare against and is
//! left alone. Edge weights play no part in the tally.
//!
//! ## Sweeps
//!
//! Each sweep reads a snapshot of every membership set taken before the sweep
//! starts and writes into the live sets, so updates become visible only on
//! the next sweep and vertex order does not matter. Sweeps repeat until one
//! adds nothing. Sets only grow and are bounded by K, which bounds the number
//! of sweeps by `M · K`.
//!
//! With the `parallel` feature the per-vertex pass runs on the rayon pool.
//! Every vertex writes only its own slot and reads only the snapshot, so the
//! result is identical to the sequential pass.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::community::SeedPartition;
use crate::config::Threshold;
use crate::graph::CooccurrenceGraph;
use crate::model::*;
use crate::{Error, Result};

/// Outcome of assessing one vertex against the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexDecision {
    /// No neighbor memberships at all; skipped.
    Degenerate,
    /// Current clusters cover at least τ of the neighbor tally.
    Satisfied,
    /// Under-connected; add this cluster.
    Join(ClusterId),
}

/// Converged memberships and run statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefinementOutcome {
    /// vertex → final cluster set
    pub memberships: Vec<ClusterSet>,
    /// Sweeps performed, including the final sweep that changed nothing.
    pub sweeps: usize,
    /// Total memberships added across all sweeps.
    pub additions: usize,
    pub additions_per_sweep: Vec<usize>,
}

impl RefinementOutcome {
    /// Number of vertices that ended up in more than one cluster.
    pub fn overlapping_count(&self) -> usize {
        self.memberships.iter().filter(|m| m.len() > 1).count()
    }
}

/// The refinement engine.
#[derive(Debug, Clone, Copy)]
pub struct OverlapRefiner {
    threshold: Threshold,
    parallel: bool,
}

impl OverlapRefiner {
    pub fn new(threshold: Threshold) -> Self {
        Self { threshold, parallel: false }
    }

    /// Request the rayon-backed sweep. Without the `parallel` feature this
    /// falls back to the sequential sweep.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        if parallel && !cfg!(feature = "parallel") {
            warn!("parallel sweeps requested but the `parallel` feature is disabled");
        }
        self.parallel = parallel;
        self
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Run sweeps from the seed's singleton memberships until nothing changes.
    pub fn refine(&self, graph: &CooccurrenceGraph, seed: &SeedPartition) -> Result<RefinementOutcome> {
        let cluster_count = seed.cluster_count();
        let mut memberships = seed.initial_memberships();
        check_len(graph, &memberships)?;

        let mut additions_per_sweep = Vec::new();
        if graph.vertex_count() > 0 {
            loop {
                let added = self.sweep(graph, &mut memberships, cluster_count)?;
                additions_per_sweep.push(added);
                debug!(sweep = additions_per_sweep.len(), added, "refinement sweep");
                if added == 0 {
                    break;
                }
            }
        }

        let outcome = RefinementOutcome {
            memberships,
            sweeps: additions_per_sweep.len(),
            additions: additions_per_sweep.iter().sum(),
            additions_per_sweep,
        };
        info!(
            sweeps = outcome.sweeps,
            additions = outcome.additions,
            overlapping = outcome.overlapping_count(),
            threshold = self.threshold.get(),
            parallel = self.parallel,
            "overlap refinement converged"
        );
        Ok(outcome)
    }

    /// One synchronized sweep over `live`. Returns the number of memberships added.
    ///
    /// Every id in `live` must be below `cluster_count`; the check runs before
    /// any slot is written.
    pub fn sweep(
        &self,
        graph: &CooccurrenceGraph,
        live: &mut [ClusterSet],
        cluster_count: usize,
    ) -> Result<usize> {
        check_len(graph, live)?;
        check_cluster_ids(live, cluster_count)?;
        let snapshot: Vec<ClusterSet> = live.to_vec();

        #[cfg(feature = "parallel")]
        if self.parallel {
            return self.sweep_parallel(graph, &snapshot, live, cluster_count);
        }

        let mut tally = Vec::with_capacity(cluster_count);
        let mut added = 0;
        for (v, slot) in live.iter_mut().enumerate() {
            let decision = self.assess_vertex(graph, &snapshot, VertexId(v), cluster_count, &mut tally)?;
            if let VertexDecision::Join(cluster) = decision {
                if slot.insert(cluster) {
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    #[cfg(feature = "parallel")]
    fn sweep_parallel(
        &self,
        graph: &CooccurrenceGraph,
        snapshot: &[ClusterSet],
        live: &mut [ClusterSet],
        cluster_count: usize,
    ) -> Result<usize> {
        use rayon::prelude::*;

        live.par_iter_mut()
            .enumerate()
            .map_init(Vec::new, |tally, (v, slot)| -> Result<usize> {
                let decision = self.assess_vertex(graph, snapshot, VertexId(v), cluster_count, tally)?;
                Ok(match decision {
                    VertexDecision::Join(cluster) => usize::from(slot.insert(cluster)),
                    _ => 0,
                })
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))
    }

    /// Decide what vertex `v` does this sweep, reading only `snapshot`.
    ///
    /// `tally` is scratch space; its contents on entry are ignored. A cluster
    /// id at or above `cluster_count` in `v` or any neighbor is an error.
    pub fn assess_vertex(
        &self,
        graph: &CooccurrenceGraph,
        snapshot: &[ClusterSet],
        v: VertexId,
        cluster_count: usize,
        tally: &mut Vec<u32>,
    ) -> Result<VertexDecision> {
        check_len(graph, snapshot)?;
        let own = snapshot
            .get(v.index())
            .ok_or_else(|| Error::InvalidPartition(format!("vertex {v} is not in the graph")))?;

        tally.clear();
        tally.resize(cluster_count, 0);

        for n in graph.neighbors(v) {
            for k in snapshot[n.index()].iter() {
                *tally.get_mut(k.index()).ok_or(Error::UnknownCluster { cluster: k.0, cluster_count })? += 1;
            }
        }
        if let Some(k) = own.iter().find(|k| k.index() >= cluster_count) {
            return Err(Error::UnknownCluster { cluster: k.0, cluster_count });
        }

        let total: u64 = tally.iter().map(|&c| u64::from(c)).sum();
        if total == 0 {
            return Ok(VertexDecision::Degenerate);
        }
        let inside: u64 = own.iter().map(|k| u64::from(tally[k.index()])).sum();

        if (inside as f64) / (total as f64) >= self.threshold.get() {
            return Ok(VertexDecision::Satisfied);
        }

        for k in own.iter() {
            tally[k.index()] = 0;
        }
        Ok(match first_max(tally) {
            Some(k) => VertexDecision::Join(ClusterId(k as u32)),
            None => VertexDecision::Satisfied,
        })
    }
}

/// Index of the first maximal positive entry.
fn first_max(tally: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (k, &count) in tally.iter().enumerate() {
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((k, count));
        }
    }
    best.map(|(k, _)| k)
}

fn check_cluster_ids(memberships: &[ClusterSet], cluster_count: usize) -> Result<()> {
    match memberships.iter().flat_map(ClusterSet::iter).find(|k| k.index() >= cluster_count) {
        Some(k) => Err(Error::UnknownCluster { cluster: k.0, cluster_count }),
        None => Ok(()),
    }
}

fn check_len(graph: &CooccurrenceGraph, memberships: &[ClusterSet]) -> Result<()> {
    if memberships.len() != graph.vertex_count() {
        return Err(Error::MembershipMismatch {
            expected: graph.vertex_count(),
            got: memberships.len(),
        });
    }
    Ok(())
}
