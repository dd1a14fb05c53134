use super::{Tick, linear::LinearTickIter};
use num_traits::Float;

/// Ticks of one axis, in increasing order of value.
///
/// Scales return this type-erased iterator so axis drawing does not depend on
/// the concrete sweep behind it.
///
/// ```
/// use calcplot::scale::{Tick, TickIter};
///
/// let ticks = TickIter::from_vec(vec![
///     Tick { value: -1.0, level: 0 },
///     Tick { value: -0.5, level: 1 },
///     Tick { value: 0.0, level: 0 },
/// ]);
/// assert_eq!(ticks.majors().collect::<Vec<_>>(), vec![-1.0, 0.0]);
/// ```
pub struct TickIter<D> {
    inner: Box<dyn Iterator<Item = Tick<D>>>,
}

impl<D: 'static> TickIter<D> {
    pub fn new(iter: impl Iterator<Item = Tick<D>> + 'static) -> Self {
        Self {
            inner: Box::new(iter),
        }
    }

    pub fn from_vec(ticks: Vec<Tick<D>>) -> Self {
        Self::new(ticks.into_iter())
    }

    /// Values of the labelled ticks only.
    pub fn majors(self) -> impl Iterator<Item = D> {
        self.filter(Tick::is_major).map(|tick| tick.value)
    }
}

impl<D: Float + 'static> From<LinearTickIter<D>> for TickIter<D> {
    fn from(sweep: LinearTickIter<D>) -> Self {
        Self::new(sweep)
    }
}

impl<D> Iterator for TickIter<D> {
    type Item = Tick<D>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
