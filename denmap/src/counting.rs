//! Sequential windowed feature counting.
//!
//! A simpler, fixed-integer-window counting path that predates the
//! accumulator-based [`DensityMap`](crate::DensityMap); kept for
//! callers that need its exact bin semantics. New code should prefer
//! [`DensityMap::add_features`](crate::DensityMap::add_features).

use std::collections::VecDeque;

use denmap_core::models::SeqRange;

use crate::sources::{Feature, FeatureSource};

/// Count features per fixed-width bin with a single left-to-right
/// sweep.
///
/// Bins of `window` positions cover `[start, stop)`; the last bin may
/// be partial (bin count is the ceiling of `span / window`). When
/// `start` and `stop` are both zero the whole sequence `[0, seq_len)`
/// is counted. `density` is resized to the bin count and receives one
/// count per bin; the maximum count is returned. A source yielding no
/// features returns 0 and leaves `density` untouched.
///
/// A feature is counted in every bin its total range overlaps. The
/// sweep keeps a FIFO of active features, admitting from the stream
/// while a feature starts before the bin's end and evicting from the
/// front while one ends before the bin's start. This requires the
/// source to yield features sorted by start position ascending;
/// unsorted input silently produces wrong counts.
///
/// # Panics
///
/// Panics when `window` is zero.
pub fn windowed_feature_counts<S>(
    source: &S,
    seq_len: u32,
    start: u32,
    stop: u32,
    window: u32,
    density: &mut Vec<u32>,
) -> u32
where
    S: FeatureSource,
{
    let (start, stop) = if start == 0 && stop == 0 {
        (0, seq_len)
    } else {
        (start, stop)
    };

    let mut feat_iter = source
        .features_in(SeqRange::half_open(start, stop))
        .peekable();
    if feat_iter.peek().is_none() {
        return 0;
    }

    let span = stop.saturating_sub(start);
    let mut bins = (span / window) as usize;
    if (bins as u32) * window < span {
        bins += 1;
    }
    density.resize(bins, 0);

    let mut max_count = 0u32;

    // total ranges of features still overlapping the current bin
    let mut active: VecDeque<SeqRange> = VecDeque::new();

    for (bin_index, bin) in density.iter_mut().enumerate() {
        let bin_start = start + bin_index as u32 * window;
        let bin_stop = bin_start + window;

        // admit every feature starting before this bin ends
        while let Some(feature) = feat_iter.peek() {
            let range = feature.total_range();
            if range.from < bin_stop {
                active.push_back(range);
                feat_iter.next();
            } else {
                break;
            }
        }

        // evict features ending before this bin starts
        while let Some(front) = active.front() {
            if front.to < bin_start {
                active.pop_front();
            } else {
                break;
            }
        }

        *bin = active.len() as u32;
        max_count = max_count.max(*bin);
    }

    max_count
}
