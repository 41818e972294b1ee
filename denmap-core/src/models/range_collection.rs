use std::fmt::{self, Display};

use crate::models::range::SeqRange;

/// A sorted collection of disjoint closed ranges.
///
/// Inserting a range merges it with any existing ranges it overlaps or
/// abuts, so the collection always holds the minimal set of maximal
/// contiguous ranges. Empty ranges are ignored on insert.
///
/// # Examples
///
/// ```
/// use denmap_core::{RangeCollection, SeqRange};
///
/// let mut ranges = RangeCollection::new();
/// ranges.insert(SeqRange::new(0, 9));
/// ranges.insert(SeqRange::new(20, 29));
/// ranges.insert(SeqRange::new(10, 19)); // bridges the gap
/// assert_eq!(ranges.len(), 1);
/// assert_eq!(ranges.total_range(), SeqRange::new(0, 29));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeCollection {
    ranges: Vec<SeqRange>,
}

impl RangeCollection {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Number of disjoint ranges held.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Insert a range, merging it with every held range it overlaps or
    /// abuts.
    pub fn insert(&mut self, range: SeqRange) {
        if range.is_empty() {
            return;
        }
        // first held range that could merge with the new one
        let lo = self.ranges.partition_point(|r| r.to_open() < range.from);
        // first held range strictly beyond the new one's reach
        let hi = self.ranges.partition_point(|r| r.from <= range.to_open());
        if lo == hi {
            self.ranges.insert(lo, range);
        } else {
            let merged = self.ranges[lo]
                .combination_with(&range)
                .combination_with(&self.ranges[hi - 1]);
            self.ranges[lo] = merged;
            self.ranges.drain(lo + 1..hi);
        }
    }

    /// Clip every held range to `span`, dropping ranges left empty.
    pub fn intersect_with(&mut self, span: &SeqRange) {
        self.ranges = self
            .ranges
            .iter()
            .map(|r| r.intersection_with(span))
            .filter(|r| !r.is_empty())
            .collect();
    }

    /// Smallest range covering the whole collection; empty when the
    /// collection is empty.
    pub fn total_range(&self) -> SeqRange {
        match (self.ranges.first(), self.ranges.last()) {
            (Some(first), Some(last)) => SeqRange::new(first.from, last.to),
            _ => SeqRange::empty(),
        }
    }

    /// One past the rightmost covered position.
    #[inline]
    pub fn to_open(&self) -> u32 {
        self.total_range().to_open()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SeqRange> {
        self.ranges.iter()
    }

    /// The held ranges, sorted and disjoint.
    #[inline]
    pub fn ranges(&self) -> &[SeqRange] {
        &self.ranges
    }
}

impl From<Vec<SeqRange>> for RangeCollection {
    fn from(ranges: Vec<SeqRange>) -> Self {
        ranges.into_iter().collect()
    }
}

impl FromIterator<SeqRange> for RangeCollection {
    fn from_iter<I: IntoIterator<Item = SeqRange>>(iter: I) -> Self {
        let mut collection = RangeCollection::new();
        for range in iter {
            collection.insert(range);
        }
        collection
    }
}

impl Extend<SeqRange> for RangeCollection {
    fn extend<I: IntoIterator<Item = SeqRange>>(&mut self, iter: I) {
        for range in iter {
            self.insert(range);
        }
    }
}

impl<'a> IntoIterator for &'a RangeCollection {
    type Item = &'a SeqRange;
    type IntoIter = std::slice::Iter<'a, SeqRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl IntoIterator for RangeCollection {
    type Item = SeqRange;
    type IntoIter = std::vec::IntoIter<SeqRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

impl Display for RangeCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for range in &self.ranges {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", range)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn disjoint() -> RangeCollection {
        RangeCollection::from(vec![
            SeqRange::new(0, 9),
            SeqRange::new(20, 29),
            SeqRange::new(40, 49),
        ])
    }

    #[rstest]
    fn test_insert_keeps_sorted_disjoint(disjoint: RangeCollection) {
        assert_eq!(disjoint.len(), 3);
        assert_eq!(
            disjoint.ranges(),
            &[
                SeqRange::new(0, 9),
                SeqRange::new(20, 29),
                SeqRange::new(40, 49)
            ]
        );
    }

    #[rstest]
    fn test_insert_merges_overlapping(mut disjoint: RangeCollection) {
        disjoint.insert(SeqRange::new(5, 25));
        assert_eq!(
            disjoint.ranges(),
            &[SeqRange::new(0, 29), SeqRange::new(40, 49)]
        );
    }

    #[rstest]
    fn test_insert_merges_abutting() {
        let mut ranges = RangeCollection::new();
        ranges.insert(SeqRange::new(0, 4));
        ranges.insert(SeqRange::new(5, 9));
        assert_eq!(ranges.ranges(), &[SeqRange::new(0, 9)]);
    }

    #[rstest]
    fn test_insert_bridges_everything(mut disjoint: RangeCollection) {
        disjoint.insert(SeqRange::new(0, 100));
        assert_eq!(disjoint.ranges(), &[SeqRange::new(0, 100)]);
    }

    #[rstest]
    fn test_insert_ignores_empty(mut disjoint: RangeCollection) {
        disjoint.insert(SeqRange::empty());
        assert_eq!(disjoint.len(), 3);
    }

    #[rstest]
    fn test_intersect_with_clips_and_drops(mut disjoint: RangeCollection) {
        disjoint.intersect_with(&SeqRange::new(5, 24));
        assert_eq!(
            disjoint.ranges(),
            &[SeqRange::new(5, 9), SeqRange::new(20, 24)]
        );
    }

    #[rstest]
    fn test_intersect_with_can_empty(mut disjoint: RangeCollection) {
        disjoint.intersect_with(&SeqRange::new(200, 300));
        assert!(disjoint.is_empty());
        assert!(disjoint.total_range().is_empty());
    }

    #[rstest]
    fn test_total_range(disjoint: RangeCollection) {
        assert_eq!(disjoint.total_range(), SeqRange::new(0, 49));
        assert_eq!(disjoint.to_open(), 50);
    }

    #[rstest]
    fn test_collect_out_of_order() {
        let ranges: RangeCollection = vec![
            SeqRange::new(30, 39),
            SeqRange::new(0, 9),
            SeqRange::new(35, 44),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            ranges.ranges(),
            &[SeqRange::new(0, 9), SeqRange::new(30, 44)]
        );
    }
}
