//! Contract boundary to the feature and alignment machinery that feeds
//! a density map.
//!
//! The engine never parses annotations or alignments itself; callers
//! adapt whatever object model they have to these traits. All the
//! engine asks for is ranges: which closed spans a feature occupies,
//! and which span an alignment row covers on the anchor sequence.

use denmap_core::models::SeqRange;

/// Anything with a genomic location decomposable into ranges.
///
/// Implementations yield the closed segment ranges making up the
/// location, in any order; overlapping or abutting segments are
/// tolerated and coalesce downstream.
pub trait Feature {
    /// The closed segment ranges of this feature's location.
    fn segments(&self) -> Vec<SeqRange>;

    /// Span from the leftmost to the rightmost segment position.
    fn total_range(&self) -> SeqRange {
        let mut total = SeqRange::empty();
        for seg in self.segments() {
            if seg.is_empty() {
                continue;
            }
            total = total.combination_with(&seg);
        }
        total
    }
}

/// A single range is a one-segment feature.
impl Feature for SeqRange {
    fn segments(&self) -> Vec<SeqRange> {
        vec![*self]
    }

    fn total_range(&self) -> SeqRange {
        *self
    }
}

/// Lazily yields the features overlapping a coordinate range.
///
/// Iterators are finite and forward-only; each call produces a fresh
/// iterator, so restarting is the source's concern, not the
/// consumer's.
pub trait FeatureSource {
    type Feature: Feature;
    type Iter: Iterator<Item = Self::Feature>;

    /// Features overlapping `range`, in the source's native order.
    fn features_in(&self, range: SeqRange) -> Self::Iter;
}

/// A pairwise alignment reduced to what density mapping needs.
pub trait Alignment {
    /// Declared number of rows.
    fn dim(&self) -> usize;

    /// Number of alignment segments after merging.
    fn segment_count(&self) -> usize;

    /// Total range covered by the row whose sequence id matches
    /// `anchor`, or `None` when no row matches.
    fn row_range(&self, anchor: &str) -> Option<SeqRange>;
}

/// Lazily yields the alignments overlapping a coordinate range.
pub trait AlignmentSource {
    type Alignment: Alignment;
    type Iter: Iterator<Item = Self::Alignment>;

    /// Alignments overlapping `range`, in the source's native order.
    fn alignments_in(&self, range: SeqRange) -> Self::Iter;
}
