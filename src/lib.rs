//! `annular-roots` — the starting-approximation and cluster-restart engine
//! for a multiprecision polynomial root-finder.
//!
//! Given a polynomial whose coefficient moduli span many orders of
//! magnitude, this crate places `n` initial root approximations so that a
//! caller-supplied simultaneous-iteration polisher (Aberth/Ehrlich)
//! converges globally, and recentres + reseeds any cluster of suspected
//! multiple roots the polisher reports back. The iteration loop itself,
//! input parsing, and I/O/CLI/packaging are out of scope (`SPEC_FULL.md`
//! §1) — this crate is the placement/restart core only.
//!
//! Components, leaf to root:
//! - [`hull`] — upper convex hull of the Newton polygon of log-moduli (C2).
//! - [`radii`] — annular radii and slot partition derived from the hull (C3).
//! - [`scheduler`] — the angular offset `sigma` for each cluster (C1).
//! - [`placer`] — distributes approximations onto annuli (C4).
//! - [`shift`] — Horner deflation for recentring a sub-problem (C6).
//! - [`restart`] — detects shift-worthy clusters and drives Shift (C5).
//! - [`cluster_registry`] — the partition of root indices into clusters (C7).
//! - [`context`] — ties the above together as one solve's mutable state.
//! - [`number`] — the `Scalar` capability trait and its three tier impls.
//! - [`collab`] — external collaborator contracts (Newton step, cluster
//!   analysis).

pub mod cluster_registry;
pub mod collab;
pub mod complex;
pub mod config;
pub mod context;
pub mod error;
pub mod hull;
pub mod number;
pub mod placer;
pub mod polynomial;
pub mod radii;
pub mod restart;
pub mod root;
pub mod scheduler;
pub mod shift;

pub use cluster_registry::ClusterRegistry;
pub use collab::{ClusterAnalysis, NewtonStep, ReferenceNewton};
pub use complex::Cplx;
pub use config::{DataType, EngineConfig, Goal};
pub use context::SolveContext;
pub use error::CoreError;
pub use number::{Dpe, MpFloat, Scalar, Tier};
pub use placer::place_cluster;
pub use polynomial::Polynomial;
pub use radii::build_radii_for;
pub use restart::{restart_pass, ClusterOutcome};
pub use root::{Isolation, Root, RootVector, Status};
pub use scheduler::Scheduler;
