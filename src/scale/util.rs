use num_traits::Float;

/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// `10` built from `one()` so no fallible cast is needed.
pub fn ten<T: Float>() -> T {
    let two = T::one() + T::one();
    let five = two + two + T::one();
    five + five
}

/// Tolerance used when snapping tick values onto the clamped domain edges.
/// Returns step / 10.
pub fn epsilon_from_step<T: Float>(step: &T) -> T {
    *step / ten()
}

/// Finite `(min, max)` fold over an iterator, ignoring NaN and infinities.
///
/// Returns `None` when the iterator yields no finite value.
pub fn finite_extent<T, I>(values: I) -> Option<(T, T)>
where
    T: Float,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
