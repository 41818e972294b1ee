//! Core range models for the [denmap](https://github.com/denmap-rs/denmap)
//! project: density maps over genomic coordinates.
//!
//! This crate holds the coordinate-level building blocks shared by the
//! higher-level density-map engine:
//!
//! - [`SeqRange`]: a closed range over unsigned sequence positions
//! - [`RangeCollection`]: a sorted, disjoint set of ranges with
//!   merging insertion and clipping
//!
//! Both types are plain in-memory values with no I/O surface. Higher
//! crates build windowed accumulation and traversal on top of them.

pub mod models;

// re-export for cleaner imports
pub use models::{RangeCollection, SeqRange};
