use num_traits::Num;

use denmap_core::models::{RangeCollection, SeqRange};

use crate::accumulate::Accumulator;
use crate::errors::DensityMapError;
use crate::run_iter::RunIterator;
use crate::sources::{Alignment, AlignmentSource, Feature, FeatureSource};

/// A low-resolution view of scored ranges over a sequence span.
///
/// The span `[start, stop)` is divided into `floor((stop - start) /
/// window)` bins of `window` sequence positions each (`window` may be
/// fractional). Ranges added to the map are clipped to the span and
/// combined into the overlapped bins through the map's
/// [`Accumulator`]; contributions falling entirely outside the span
/// are dropped silently. Running extrema track every value written to
/// a bin *and* every score offered, so a caller knows the eventual
/// dynamic range as soon as its data is in.
///
/// The map can only ever grow to the right ([`extend_to`]); there is
/// deliberately no shrink or left extension.
///
/// # Examples
///
/// ```
/// use denmap::{DensityMap, SeqRange};
///
/// // ten bins of ten bases over [0, 100)
/// let mut map: DensityMap<u32> = DensityMap::new(0, 100, 10.0).unwrap();
/// map.add_range(SeqRange::new(5, 14), 1, false);
/// assert_eq!(map.bin_count(), 10);
/// assert_eq!((map[0], map[1], map[2]), (1, 1, 0));
/// assert_eq!(map.max(), 1);
///
/// // compact runs for rendering
/// let runs: Vec<_> = map.runs().map(|r| (r.value, r.run_length)).collect();
/// assert_eq!(runs, vec![(1, 2), (0, 8)]);
/// ```
///
/// [`extend_to`]: DensityMap::extend_to
#[derive(Debug, Clone)]
pub struct DensityMap<T>
where
    T: Num + Copy + PartialOrd,
{
    /// First position covered.
    start: u32,
    /// One past the last position covered.
    stop: u32,
    /// Sequence positions per bin; may be fractional.
    window: f64,
    /// Value every bin starts from.
    def_val: T,
    /// Largest value written to any bin or offered as a score.
    max: T,
    /// Smallest such value.
    min: T,
    /// The accumulated counts/scores.
    bins: Vec<T>,
    accum: Accumulator<T>,
}

impl<T> DensityMap<T>
where
    T: Num + Copy + PartialOrd,
{
    /// Create a map over `[start, stop)` with the default summing
    /// accumulator and zero default value.
    ///
    /// Fails when `window` is not positive; everything else, including
    /// `stop <= start` (a map with no bins), is accepted.
    pub fn new(start: u32, stop: u32, window: f64) -> Result<Self, DensityMapError> {
        Self::with_accumulator(start, stop, window, Accumulator::Sum, T::zero())
    }

    /// Create a map over `[start, stop)` with an explicit accumulator
    /// and default bin value. Extrema start at `def_val`.
    pub fn with_accumulator(
        start: u32,
        stop: u32,
        window: f64,
        accum: Accumulator<T>,
        def_val: T,
    ) -> Result<Self, DensityMapError> {
        if window <= 0.0 {
            return Err(DensityMapError::NonPositiveWindow(window));
        }
        let mut map = Self {
            start,
            stop,
            window,
            def_val,
            max: def_val,
            min: def_val,
            bins: Vec::new(),
            accum,
        };
        map.bins = vec![def_val; map.calc_bin_count()];
        Ok(map)
    }

    /// Create a map over a whole sequence, `[0, seq_len)`.
    pub fn for_sequence(seq_len: u32, window: f64) -> Result<Self, DensityMapError> {
        Self::new(0, seq_len, window)
    }

    /// How many bins the current span and window call for.
    fn calc_bin_count(&self) -> usize {
        (self.stop.saturating_sub(self.start) as f64 / self.window) as usize
    }

    /// Convert a sequence position inside the span to a bin number.
    #[inline]
    fn bin_at(&self, pos: u32) -> usize {
        ((pos - self.start) as f64 / self.window) as usize
    }

    #[inline]
    fn observe(&mut self, value: T) {
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
    }

    /// Accumulate `score` into every bin overlapped by `range`.
    ///
    /// A reversed range (`from > to`) is normalized by swapping, not
    /// treated as an error. With `expand` the map is first grown so its
    /// span reaches the end of the range. The range is then clipped to
    /// the span; a range left empty by clipping contributes to the
    /// running extrema but touches no bin.
    ///
    /// End-bin policy, a long-standing quirk: windows wider than one
    /// position treat the range endpoint as closed, sub-position
    /// windows as half-open. Rendering callers depend on the two
    /// regimes differing; do not unify them.
    pub fn add_range(&mut self, range: SeqRange, score: T, expand: bool) {
        let range = if range.from > range.to {
            SeqRange::new(range.to, range.from)
        } else {
            range
        };

        if expand {
            self.extend_to(range.to_open());
        }

        // extrema reflect every candidate score, clipped or not
        self.observe(score);

        let usable = self.range().intersection_with(&range);
        if usable.is_empty() {
            return;
        }

        let begin_bin = self.bin_at(usable.from);
        let end_bin = if self.window > 1.0 {
            self.bin_at(usable.to) + 1
        } else {
            self.bin_at(usable.to_open())
        };
        let end_bin = end_bin.min(self.bins.len());

        for i in begin_bin..end_bin {
            let combined = self.accum.combine(self.bins[i], score);
            self.bins[i] = combined;
            self.observe(combined);
        }
    }

    /// Accumulate `score` into every bin overlapped by a collection of
    /// sorted, disjoint ranges.
    ///
    /// Unlike repeated [`add_range`](DensityMap::add_range) calls, a
    /// bin touched by an earlier range in the collection is never
    /// touched again by a later one: each range's begin bin is clamped
    /// to the previous range's end bin. The whole collection is
    /// clipped to the span first; when nothing survives the call is a
    /// complete no-op. The score itself enters the extrema once, not
    /// once per range.
    pub fn add_ranges(&mut self, mut ranges: RangeCollection, score: T, expand: bool) {
        if expand && !ranges.is_empty() {
            self.extend_to(ranges.to_open());
        }

        ranges.intersect_with(&self.range());
        if ranges.is_empty() {
            return;
        }
        self.observe(score);

        let mut previous_end_bin = 0usize;
        for r in ranges.iter() {
            let begin_bin = self.bin_at(r.from);
            let end_bin = if self.window > 1.0 {
                self.bin_at(r.to) + 1
            } else {
                self.bin_at(r.to_open())
            };

            let begin_bin = begin_bin.max(previous_end_bin);
            let end_bin = end_bin.min(self.bins.len());
            previous_end_bin = end_bin;

            for i in begin_bin..end_bin {
                let combined = self.accum.combine(self.bins[i], score);
                self.bins[i] = combined;
                self.observe(combined);
            }
        }
    }

    /// Add a location given as its segment ranges, each contributing a
    /// unit score. Segments are coalesced into disjoint ranges first.
    /// Returns the running maximum after the update.
    pub fn add_location<I>(&mut self, segments: I) -> T
    where
        I: IntoIterator<Item = SeqRange>,
    {
        let ranges: RangeCollection = segments.into_iter().collect();
        self.add_ranges(ranges, T::one(), false);
        self.max
    }

    /// Add one feature's location. Returns the running maximum.
    pub fn add_feature<F>(&mut self, feature: &F) -> T
    where
        F: Feature,
    {
        self.add_location(feature.segments())
    }

    /// Add every feature the source yields within this map's span.
    /// A source yielding nothing leaves the map untouched; the current
    /// maximum is returned either way. Yield order does not matter.
    pub fn add_features<S>(&mut self, source: &S) -> T
    where
        S: FeatureSource,
    {
        for feature in source.features_in(self.range()) {
            self.add_location(feature.segments());
        }
        self.max
    }

    /// Add every pairwise alignment the source yields within this
    /// map's span, scoring the anchor row's total range with a unit
    /// score. Returns the running maximum.
    ///
    /// Alignments are skipped silently when their declared dimension
    /// is not exactly two, when fewer than two segments remain after
    /// merging, or when no row matches `anchor`.
    pub fn add_alignments<S>(&mut self, source: &S, anchor: &str) -> T
    where
        S: AlignmentSource,
    {
        for alignment in source.alignments_in(self.range()) {
            if alignment.dim() != 2 {
                continue;
            }
            if alignment.segment_count() < 2 {
                continue;
            }
            let row = match alignment.row_range(anchor) {
                Some(row) => row,
                None => continue,
            };
            self.add_range(row, T::one(), false);
        }
        self.max
    }

    /// Grow the span so it covers positions up to `stop` (exclusive).
    ///
    /// Existing bin values keep their positions and values; new bins
    /// are appended holding the default value. A `stop` at or before
    /// the current one is a silent no-op; the map never shrinks and
    /// never extends left.
    pub fn extend_to(&mut self, stop: u32) {
        if stop > self.stop {
            self.stop = stop;
            let bin_count = self.calc_bin_count();
            self.bins.resize(bin_count, self.def_val);
        }
    }

    /// Reset every bin and both extrema to the default value. Span,
    /// window, bin count, and accumulator are untouched.
    pub fn clear(&mut self) {
        self.max = self.def_val;
        self.min = self.def_val;
        self.bins.fill(self.def_val);
    }

    /// First position covered.
    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// One past the last position covered.
    #[inline]
    pub fn stop(&self) -> u32 {
        self.stop
    }

    /// The covered span as a closed range.
    #[inline]
    pub fn range(&self) -> SeqRange {
        SeqRange::new(self.start, self.stop.saturating_sub(1))
    }

    /// Sequence positions per bin.
    #[inline]
    pub fn window(&self) -> f64 {
        self.window
    }

    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Largest value written to any bin or offered as a score so far.
    #[inline]
    pub fn max(&self) -> T {
        self.max
    }

    /// Smallest value written to any bin or offered as a score so far.
    #[inline]
    pub fn min(&self) -> T {
        self.min
    }

    /// Value every bin starts from.
    #[inline]
    pub fn def_val(&self) -> T {
        self.def_val
    }

    /// Force the running maximum, e.g. to widen a display scale beyond
    /// the actual data. Not validated and never auto-corrected.
    #[inline]
    pub fn set_max(&mut self, max: T) {
        self.max = max;
    }

    /// Force the running minimum. Not validated and never
    /// auto-corrected.
    #[inline]
    pub fn set_min(&mut self, min: T) {
        self.min = min;
    }

    #[inline]
    pub fn accumulator(&self) -> &Accumulator<T> {
        &self.accum
    }

    /// The bin array, in sequence order.
    #[inline]
    pub fn bins(&self) -> &[T] {
        &self.bins
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.bins.iter()
    }

    /// Run-length cursor starting at bin 0.
    #[inline]
    pub fn runs(&self) -> RunIterator<'_, T> {
        self.run_iter(0)
    }

    /// Run-length cursor starting at an arbitrary bin.
    #[inline]
    pub fn run_iter(&self, position: usize) -> RunIterator<'_, T> {
        RunIterator::new(&self.bins, position, self.start, self.window)
    }
}

/// Direct bin access; panics on an out-of-range index like any slice.
impl<T> std::ops::Index<usize> for DensityMap<T>
where
    T: Num + Copy + PartialOrd,
{
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.bins[index]
    }
}

/// Mutable bin access. Writing through this bypasses the accumulator
/// and the extrema, matching [`set_max`](DensityMap::set_max)'s
/// hands-off contract.
impl<T> std::ops::IndexMut<usize> for DensityMap<T>
where
    T: Num + Copy + PartialOrd,
{
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.bins[index]
    }
}

impl<'a, T> IntoIterator for &'a DensityMap<T>
where
    T: Num + Copy + PartialOrd,
{
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}
