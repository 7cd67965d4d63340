// Math utilities and helper functions

/// Length of the intersection of `[a_min, a_max]` and `[b_min, b_max]`
///
/// Negative when the ranges are disjoint, zero when they only touch.
pub fn range_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> f32 {
    a_max.min(b_max) - a_min.max(b_min)
}

/// Start of a span of length `extent` that ends at or before `edge`
///
/// `edge - extent` can round so that adding `extent` back lands past `edge`;
/// step down one ulp at a time until the span fits.
pub fn place_before(edge: f32, extent: f32) -> f32 {
    let mut start = edge - extent;
    while start + extent > edge {
        start = next_down(start);
    }
    start
}

/// Largest f32 strictly below `x` (finite inputs only)
fn next_down(x: f32) -> f32 {
    if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

/// Borrow two distinct elements of a slice mutably at the same time
///
/// Panics if `i == j` or either index is out of bounds.
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j, "pair_mut needs two distinct indices");
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
