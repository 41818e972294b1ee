use std::fmt;

use num_traits::Num;

/// Cloneable combining callback for [`Accumulator::Custom`].
///
/// Blanket-implemented for every `Fn(T, T) -> T` closure that is also
/// `Clone + Send + Sync`, so a plain closure can be boxed directly:
///
/// ```
/// use denmap::Accumulator;
///
/// // keep whichever value is further from zero
/// let accum: Accumulator<i64> =
///     Accumulator::Custom(Box::new(|a: i64, b: i64| if a.abs() > b.abs() { a } else { b }));
/// assert_eq!(accum.combine(-5, 3), -5);
/// ```
pub trait CombineFn<T>: Fn(T, T) -> T + Send + Sync {
    fn clone_box(&self) -> Box<dyn CombineFn<T>>;
}

impl<T, F> CombineFn<T> for F
where
    F: Fn(T, T) -> T + Clone + Send + Sync + 'static,
{
    fn clone_box(&self) -> Box<dyn CombineFn<T>> {
        Box::new(self.clone())
    }
}

impl<T> Clone for Box<dyn CombineFn<T>> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

/// The bin-combining operation owned by a density map.
///
/// Applied left to right per bin as `combine(current, incoming)`. The
/// operation must be pure; it runs once per touched bin per added
/// range. Cloning an accumulator always yields an independent
/// instance, including for [`Accumulator::Custom`], so two maps never
/// share functor state.
pub enum Accumulator<T> {
    /// `current + incoming` (the default).
    Sum,
    /// The larger of the two values.
    Max,
    /// The smaller of the two values.
    Min,
    /// A caller-supplied combining closure.
    Custom(Box<dyn CombineFn<T>>),
}

impl<T> Accumulator<T>
where
    T: Num + Copy + PartialOrd,
{
    /// Combine an existing bin value with an incoming score.
    #[inline]
    pub fn combine(&self, current: T, incoming: T) -> T {
        match self {
            Accumulator::Sum => current + incoming,
            Accumulator::Max => {
                if current > incoming {
                    current
                } else {
                    incoming
                }
            }
            Accumulator::Min => {
                if current < incoming {
                    current
                } else {
                    incoming
                }
            }
            Accumulator::Custom(f) => f(current, incoming),
        }
    }
}

impl<T> Clone for Accumulator<T> {
    fn clone(&self) -> Self {
        match self {
            Accumulator::Sum => Accumulator::Sum,
            Accumulator::Max => Accumulator::Max,
            Accumulator::Min => Accumulator::Min,
            Accumulator::Custom(f) => Accumulator::Custom(f.clone()),
        }
    }
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Accumulator::Sum
    }
}

impl<T> fmt::Debug for Accumulator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accumulator::Sum => write!(f, "Sum"),
            Accumulator::Max => write!(f, "Max"),
            Accumulator::Min => write!(f, "Min"),
            Accumulator::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
