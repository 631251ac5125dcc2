use std::f64::consts::{FRAC_PI_2, TAU};

/// Index of the segment under the fixed pointer for a wheel of `count` slices turned by `rotation`.
///
/// The pointer sits at screen angle 0 (right of the wheel) and segment `i` is laid out with its
/// middle at `i * unit - π/2`, so the slice under the pointer is the one whose span contains
/// `π/2 - rotation + unit/2`, measured from the start of segment 0.
pub fn segment_under_pointer(rotation: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let unit = TAU / count as f64;
    let effective = (TAU + FRAC_PI_2 - rotation + unit / 2.0).rem_euclid(TAU);

    (0..count)
        .find(|&i| unit * (i + 1) as f64 > effective)
        .or(Some(count - 1))
}
