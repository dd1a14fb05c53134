//! Scales map function-space values onto the normalized `[0, 1]` interval.
//!
//! A scale knows nothing about pixels; [`AxisTransform`](crate::AxisTransform)
//! stretches the normalized interval across the drawing surface. Keeping the
//! two apart lets the same scale drive both curve vertices and axis ticks.

mod linear;
mod tick_iter;
pub mod util;

pub use linear::{Linear, LinearTickIter};
pub use tick_iter::TickIter;

/// A tick mark on an axis.
///
/// `level` 0 is a major (labelled) tick, level 1 a minor one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick<D> {
    pub value: D,
    pub level: u8,
}

impl<D> Tick<D> {
    pub fn is_major(&self) -> bool {
        self.level == 0
    }
}

/// Mapping between a one-dimensional domain and normalized space.
pub trait Scale {
    type Domain;

    /// The `(min, max)` pair exactly as it was set.
    fn domain(&self) -> (&Self::Domain, &Self::Domain);

    /// Maps a domain value to normalized space. Values outside the domain map
    /// outside `[0, 1]`; nothing is clamped.
    fn normalize(&self, value: &Self::Domain) -> Self::Domain;

    /// Inverse of [`Scale::normalize`].
    fn denormalize(&self, t: Self::Domain) -> Self::Domain;

    fn tick_iter(&self) -> TickIter<Self::Domain>;

    fn ticks(&self) -> Vec<Tick<Self::Domain>> {
        self.tick_iter().collect()
    }

    /// Only the level 0 ticks, which are the ones worth a label.
    fn major_ticks(&self) -> Vec<Tick<Self::Domain>> {
        self.tick_iter().filter(Tick::is_major).collect()
    }
}
