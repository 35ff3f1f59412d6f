use crate::window::Window;

/// First difference of each axis, recomputed for every window. The last
/// element of every axis is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jerk<const N: usize> {
    pub x: [i32; N],
    pub y: [i32; N],
    pub z: [i32; N],
}

#[inline(always)]
fn diff<const N: usize>(axis: &[i32; N]) -> [i32; N] {
    let mut out = [0i32; N];
    for i in 0..N.saturating_sub(1) {
        out[i] = axis[i + 1].wrapping_sub(axis[i]);
    }
    out
}

/// `jerk[i] = w[i + 1] - w[i]` for `i < N - 1`, `jerk[N - 1] = 0`.
#[inline(always)]
pub fn jerk<const N: usize>(window: &Window<N>) -> Jerk<N> {
    debug_assert!(window.is_full(), "jerk over a partially filled window");
    Jerk {
        x: diff(&window.x),
        y: diff(&window.y),
        z: diff(&window.z),
    }
}

#[inline(always)]
fn magnitude_sq<const N: usize>(x: &[i32; N], y: &[i32; N], z: &[i32; N]) -> [u32; N] {
    let mut out = [0u32; N];
    for i in 0..N {
        // squares are taken on the unsigned reinterpretation, which matches
        // the signed square modulo 2^32
        let (a, b, c) = (x[i] as u32, y[i] as u32, z[i] as u32);
        out[i] = a
            .wrapping_mul(a)
            .wrapping_add(b.wrapping_mul(b))
            .wrapping_add(c.wrapping_mul(c));
    }
    out
}

/// `x^2 + y^2 + z^2` of every raw sample.
#[inline(always)]
pub fn window_magnitude_sq<const N: usize>(window: &Window<N>) -> [u32; N] {
    magnitude_sq(&window.x, &window.y, &window.z)
}

/// `x^2 + y^2 + z^2` of every jerk sample.
#[inline(always)]
pub fn jerk_magnitude_sq<const N: usize>(jerk: &Jerk<N>) -> [u32; N] {
    magnitude_sq(&jerk.x, &jerk.y, &jerk.z)
}
