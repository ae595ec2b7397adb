//! Alsvid factoring drivers
//!
//! Local-search heuristics that treat the dual-number simulation of a
//! reversible multiplier as a differentiable cost surface over its input
//! bits.
//!
//! # Drivers
//!
//! - [`GreedySearch`]: single-coordinate greedy clamping with tabu hills
//!   and an annealing kick,
//! - [`SoftmaxSearch`]: flips one bit per iteration, sampled by gradient
//!   magnitude,
//! - [`MomentumSearch`]: continuous descent in `[0, 1]` with momentum,
//! - [`ReverseSearch`]: descends the garbage space of the inverted
//!   circuit with the product pinned to the target.
//!
//! All drivers share the [`CostSurface`] (the target-match term plus the
//! forbidden-point hills), return a [`FactorOutcome`], treat a NaN gradient
//! as a failed run rather than an error, and take explicit random sources
//! for reproducibility.
//!
//! The [`scan`] and [`preimage`] modules hold the offline diagnostics: the
//! rank-weighted grid scan and the exhaustive reverse-preimage probe.

pub mod cost;
pub mod error;
pub mod greedy;
pub mod momentum;
pub mod outcome;
pub mod preimage;
pub mod reverse;
pub mod scan;
pub mod softmax;

pub use cost::CostSurface;
pub use error::{SearchError, SearchResult};
pub use greedy::GreedySearch;
pub use momentum::MomentumSearch;
pub use outcome::FactorOutcome;
pub use preimage::{Preimage, preimage_probe, preimage_scan};
pub use reverse::ReverseSearch;
pub use scan::{ScanPoint, scan_grid, write_fitness, write_scores};
pub use softmax::SoftmaxSearch;
