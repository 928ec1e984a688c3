use log::debug;
use rustc_hash::FxHashMap;

/// Spans below this are too narrow to spread over a visual range; the values
/// are left untouched instead of being blown up by a near-zero divisor.
pub const DEGENERATE_RANGE_THRESHOLD: f64 = 1e-3;

/// Measured value range of a masked data set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRange {
    /// All values collapse to (nearly) one point. Normalizing against this
    /// range is a no-op.
    Degenerate,
    Span { min: f64, max: f64 },
}

impl ValueRange {
    /// Measures min and max over the values whose index passes `mask`.
    ///
    /// NaN values are ignored by the measurement. An empty or all-masked-out
    /// set and a span below `DEGENERATE_RANGE_THRESHOLD` both classify as
    /// `Degenerate`.
    pub fn measure(values: &[f64], mask: impl Fn(usize) -> bool) -> ValueRange {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, value) in values.iter().enumerate() {
            if !mask(index) {
                continue;
            }
            min = min.min(*value);
            max = max.max(*value);
        }

        if max - min >= DEGENERATE_RANGE_THRESHOLD {
            ValueRange::Span { min, max }
        } else {
            debug!(
                "Value span {} is below the degenerate threshold, skipping normalization",
                max - min
            );
            ValueRange::Degenerate
        }
    }

    /// Rescales all values in place so the span maps onto [0, 1]. Values
    /// outside the measured span land outside [0, 1]; a degenerate range
    /// leaves everything untouched.
    pub fn apply(&self, values: &mut [f64]) {
        match *self {
            ValueRange::Degenerate => {}
            ValueRange::Span { min, max } => {
                let span = max - min;
                for value in values.iter_mut() {
                    *value = (*value - min) / span;
                }
            }
        }
    }
}

/// Normalizes `values` in place and returns the range that was used.
///
/// Only entries passing `mask` define the range, but the resulting map is
/// applied to every entry. A `cached` range takes precedence over measuring,
/// so a secondary data set can be scaled exactly like the one it derives
/// from. The returned range is what the caller should cache.
pub fn normalize_masked(
    values: &mut [f64],
    mask: impl Fn(usize) -> bool,
    cached: Option<ValueRange>,
) -> ValueRange {
    let range = match cached {
        Some(range) => range,
        None => ValueRange::measure(values, &mask),
    };
    range.apply(values);
    range
}

/// Normalization state shared between the mapping passes of one plot.
///
/// The primary pass fills the ranges and the marker table; ghost passes read
/// them back so periodic replicas get exactly the colors, sizes and symbols
/// of the sites they replicate. A session is never shared between plots.
#[derive(Debug, Clone, Default)]
pub struct NormalizationSession {
    pub color_range: Option<ValueRange>,
    pub size_range: Option<ValueRange>,
    pub marker_table: Option<FxHashMap<i32, char>>,
}

impl NormalizationSession {
    pub fn new() -> Self {
        Self::default()
    }
}
