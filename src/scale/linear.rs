use super::{Scale, Tick, TickIter, util};
use num_traits::{Float, NumCast};

/// Linear scale: affine mapping between a numeric domain and normalized `[0, 1]`.
///
/// # Degenerate domains
///
/// A domain whose bounds coincide (a constant function, a single sample) has
/// no span to divide by. The scale substitutes a unit span centred on that
/// value, so the value itself normalizes to exactly `0.5` and the curve sits
/// on the mid-line of the axis instead of failing.
///
/// # Domain Ordering
///
/// Bounds are kept exactly as given, so reversed axes work:
/// - Normal: `new(0.0, 100.0)` - larger values at the right/top
/// - Reversed: `new(100.0, 0.0)` - larger values at the left/bottom
///
/// # Examples
///
/// ```rust
/// use calcplot::{Scale, scale::Linear};
///
/// let scale = Linear::new(0.0, 4.0);
/// assert_eq!(scale.normalize(&1.0), 0.25);
/// assert_eq!(scale.denormalize(0.5), 2.0);
///
/// // Out-of-range values are not clamped.
/// assert_eq!(scale.normalize(&6.0), 1.5);
///
/// // Degenerate domain: everything collapses onto the middle.
/// let flat = Linear::new(3.0, 3.0);
/// assert_eq!(flat.normalize(&3.0), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear<D: Float = f64> {
    min: D,
    max: D,
}

impl<D: Float> Linear<D> {
    pub const fn new(min: D, max: D) -> Self {
        Self { min, max }
    }

    /// True when both bounds are equal and the unit-span substitution applies.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    fn half() -> D {
        D::one() / (D::one() + D::one())
    }
}

impl<D: Float + 'static> Scale for Linear<D> {
    type Domain = D;

    fn domain(&self) -> (&D, &D) {
        (&self.min, &self.max)
    }

    // Operands are halved before subtracting so spans wider than
    // `D::max_value()` stay finite.
    fn normalize(&self, value: &D) -> D {
        let half = Self::half();
        if self.is_degenerate() {
            return half + (*value - self.min);
        }
        (*value * half - self.min * half) / (self.max * half - self.min * half)
    }

    fn denormalize(&self, t: D) -> D {
        let half = Self::half();
        let halved = if self.is_degenerate() {
            self.min * half + (t - half) * half
        } else {
            self.min * half + t * (self.max * half - self.min * half)
        };
        halved + halved
    }

    fn tick_iter(&self) -> TickIter<D> {
        LinearTickIter::new(self.min, self.max).into()
    }
}

/// Finds a "nice" step (1, 2 or 5 times a power of ten) no smaller than `raw_step`.
fn nice_step<D: Float>(raw_step: D) -> D {
    let one = D::one();
    let two = one + one;
    let five = two + two + one;
    let ten = util::ten::<D>();

    let wanted = raw_step.abs();
    let mut base = one;
    while base * ten < wanted {
        base = base * ten;
    }
    while base > wanted * ten {
        base = base / ten;
    }

    [base, base * two, base * five, base * ten]
        .into_iter()
        .find(|c| *c >= wanted)
        .unwrap_or(base * ten)
}

/// Hard stop so a pathological domain cannot spin the sweep forever.
const MAX_MINOR_TICKS: usize = 100_000;

/// Tick sweep over a linear domain.
///
/// Major ticks sit on nice steps, with nine minor ticks between neighbours.
/// Ticks never leave the domain; values within a tenth of a step of an edge
/// snap onto it.
pub struct LinearTickIter<D: Float> {
    state: SweepState<D>,
    budget: usize,
}

enum SweepState<D: Float> {
    Single(Option<D>),
    Sweep(Sweep<D>),
    Done,
}

struct Sweep<D: Float> {
    origin: D,
    minor_step: D,
    index: usize,
    lo: D,
    hi: D,
    tolerance: D,
    last: Option<D>,
}

impl<D: Float> LinearTickIter<D> {
    pub fn new(min: D, max: D) -> Self {
        if min == max || !(max - min).is_finite() {
            return Self {
                state: SweepState::Single(Some(min)),
                budget: 1,
            };
        }

        let (lo, hi) = util::sorted_pair(min, max);
        let ten = util::ten::<D>();
        let major_step = nice_step((hi - lo) / ten);
        let minor_step = major_step / ten;
        if minor_step == D::zero() {
            return Self {
                state: SweepState::Single(Some(lo)),
                budget: 1,
            };
        }

        Self {
            state: SweepState::Sweep(Sweep {
                origin: (lo / major_step).floor() * major_step,
                minor_step,
                index: 0,
                lo,
                hi,
                tolerance: util::epsilon_from_step(&major_step),
                last: None,
            }),
            budget: MAX_MINOR_TICKS,
        }
    }
}

impl<D: Float> Iterator for LinearTickIter<D> {
    type Item = Tick<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let sweep = match &mut self.state {
            SweepState::Single(slot) => return slot.take().map(|value| Tick { value, level: 0 }),
            SweepState::Done => return None,
            SweepState::Sweep(sweep) => sweep,
        };

        while self.budget > 0 {
            // Index-based so rounding does not accumulate across the sweep.
            let raw = sweep.origin + sweep.minor_step * <D as NumCast>::from(sweep.index)?;
            if raw > sweep.hi + sweep.tolerance {
                break;
            }
            self.budget -= 1;
            let index = sweep.index;
            sweep.index += 1;

            let value = if raw < sweep.lo {
                if sweep.lo - raw > sweep.tolerance {
                    continue;
                }
                sweep.lo
            } else if raw > sweep.hi {
                sweep.hi
            } else {
                raw
            };

            if sweep.last == Some(value) {
                continue;
            }
            sweep.last = Some(value);

            let level = if index % 10 == 0 { 0 } else { 1 };
            return Some(Tick { value, level });
        }

        self.state = SweepState::Done;
        None
    }
}
