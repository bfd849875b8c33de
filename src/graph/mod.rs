//! # Graphs
//!
//! [`CooccurrenceGraph`] is built once from the registry and stays read-only
//! for the rest of the run. [`AnnotatedGraph`] is the converged, classified
//! copy handed to the exporters.

pub mod cooccurrence;
pub mod annotated;

pub use cooccurrence::CooccurrenceGraph;
pub use annotated::{AnnotatedEdge, AnnotatedGraph, AnnotatedVertex};
