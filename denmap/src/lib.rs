//! Density maps: low-resolution coverage summaries of genomic ranges.
//!
//! This crate turns an arbitrary stream of (range, score) pairs into a
//! fixed array of bins over a sequence span, for rendering histograms
//! and coverage graphs without per-position bookkeeping. It is part of
//! the [denmap](https://github.com/denmap-rs/denmap) project.
//!
//! ## Features
//!
//! - **Windowed accumulation**: bins of a configurable (possibly
//!   fractional) number of positions, filled through a pluggable
//!   [`Accumulator`] (sum, max, min, or a custom closure)
//! - **Incremental growth**: the span extends to the right as data
//!   arrives ([`DensityMap::extend_to`]), preserving existing bins
//! - **Run-length traversal**: [`RunIterator`] coalesces equal-valued
//!   bins into runs so renderers touch each flat segment once
//! - **Running extrema**: every written bin value and every offered
//!   score feeds `max`/`min`, so axis scaling is known immediately
//!
//! All operations are synchronous and allocation is confined to the
//! bin array; there is no I/O surface. A map is not safe for
//! concurrent mutation, but quiescent maps can be read from many
//! threads at once.
//!
//! ## Quick Start
//!
//! ```rust
//! use denmap::{DensityMap, SeqRange};
//!
//! // 20 bins of 50 bases over [0, 1000)
//! let mut map: DensityMap<u32> = DensityMap::new(0, 1000, 50.0).unwrap();
//!
//! // pile up some scored ranges (clipping is silent)
//! map.add_range(SeqRange::new(100, 349), 1, false);
//! map.add_range(SeqRange::new(200, 449), 1, false);
//! map.add_range(SeqRange::new(5000, 6000), 1, false);
//!
//! assert_eq!(map.max(), 2);
//!
//! // walk the histogram one flat segment at a time
//! for run in map.runs() {
//!     println!("{} bins at {}", run.run_length, run.value);
//! }
//! ```
//!
//! Features and alignments enter through the [`sources`] traits; the
//! engine never parses annotation or alignment formats itself.

/// Bin-combining operations.
///
/// See [`Accumulator`] for the variants.
pub mod accumulate;

/// Sequential windowed feature counting.
///
/// See [`counting::windowed_feature_counts`].
pub mod counting;

/// The density map itself.
///
/// See [`DensityMap`] for details.
pub mod density_map;

pub mod errors;

/// Run-length traversal of the bin array.
///
/// See [`RunIterator`] for details.
pub mod run_iter;

/// Collaborator traits for feature and alignment input.
///
/// See [`sources::Feature`] and [`sources::FeatureSource`].
pub mod sources;

// re-exports
pub use self::accumulate::{Accumulator, CombineFn};
pub use self::density_map::DensityMap;
pub use self::errors::DensityMapError;
pub use self::run_iter::{Run, RunIterator};
pub use self::sources::{Alignment, AlignmentSource, Feature, FeatureSource};

pub use denmap_core::models::{RangeCollection, SeqRange};
