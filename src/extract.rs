// Reducers take exactly N values and do no validation; integer arithmetic
// wraps at 32 bits and divisions truncate toward zero.

use crate::entropy_table::{entropy_table, EntropyLookup, WindowSize};

/// Histogram bins used by [`entropy`] and [`iqr`]: one per value in
/// `[-128, 127]`.
pub const HIST_BINS: usize = 256;
/// Added to a value to obtain its histogram bin.
pub const HIST_OFFSET: i32 = 128;

/// First value of a series that [`entropy`] cannot bin, if any.
pub fn entropy_out_of_range<const N: usize>(series: &[i32; N]) -> Option<i32> {
    series
        .iter()
        .copied()
        .find(|v| !(-HIST_OFFSET..HIST_OFFSET).contains(v))
}

/// First value of a series that [`iqr`] cannot bin, if any.
pub fn iqr_out_of_range<const N: usize>(series: &[u32; N]) -> Option<u32> {
    series.iter().copied().find(|&v| v >= HIST_OFFSET as u32)
}

/// Sum of squares divided by `N`.
#[inline(always)]
pub fn energy<const N: usize>(series: &[i32; N]) -> u32 {
    let mut acc = 0u32;
    for &v in series {
        acc = acc.wrapping_add(v.wrapping_mul(v) as u32);
    }
    acc / N as u32
}

/// Sum of squares divided by `N`, for non-negative series.
#[inline(always)]
pub fn energy_u<const N: usize>(series: &[u32; N]) -> u32 {
    let mut acc = 0u32;
    for &v in series {
        acc = acc.wrapping_add(v.wrapping_mul(v));
    }
    acc / N as u32
}

/// Sum divided by `N`, rounding toward zero.
#[inline(always)]
pub fn mean<const N: usize>(series: &[i32; N]) -> i32 {
    let mut acc = 0i32;
    for &v in series {
        acc = acc.wrapping_add(v);
    }
    acc / N as i32
}

#[inline(always)]
pub fn min<T: Copy + PartialOrd, const N: usize>(series: &[T; N]) -> T {
    let mut result = series[0];
    for &v in &series[1..] {
        if v < result {
            result = v;
        }
    }
    result
}

#[inline(always)]
pub fn max<T: Copy + PartialOrd, const N: usize>(series: &[T; N]) -> T {
    let mut result = series[0];
    for &v in &series[1..] {
        if v > result {
            result = v;
        }
    }
    result
}

/// Histogram entropy of a series whose values lie in `[-128, 127]`.
///
/// Values are binned one bin per value and the precomputed `-p * log2(p)`
/// contribution of each bin count is summed over all 256 bins, in bin
/// order. A value outside the range panics on the histogram index.
#[inline(always)]
pub fn entropy<const N: usize>(series: &[i32; N]) -> f32
where
    WindowSize<N>: EntropyLookup,
{
    let table = entropy_table::<N>();
    let mut bins = [0u8; HIST_BINS];
    for &v in series {
        debug_assert!(
            (-HIST_OFFSET..HIST_OFFSET).contains(&v),
            "entropy input {v} outside [-128, 127]"
        );
        bins[(v + HIST_OFFSET) as usize] += 1;
    }
    let mut result = 0.0f32;
    for &count in &bins {
        result += table[count as usize];
    }
    result
}

/// Interquartile range of a non-negative series whose values fit the
/// histogram (at most 127).
///
/// Walks the histogram in ascending order; the lower quartile is the first
/// bin where the running count reaches `N / 4`, the upper quartile the first
/// bin where it reaches `3 * N / 4`. No interpolation.
#[inline(always)]
pub fn iqr<const N: usize>(series: &[u32; N]) -> i32 {
    let mut bins = [0u8; HIST_BINS];
    for &v in series {
        debug_assert!(v < HIST_OFFSET as u32, "iqr input {v} outside [0, 127]");
        bins[(v as i32 + HIST_OFFSET) as usize] += 1;
    }

    let lower = N / 4;
    let upper = N * 3 / 4;
    let mut q25 = 0i32;
    let mut q75 = 0i32;
    let mut q25_set = false;
    let mut running = 0usize;
    for (bin, &count) in bins.iter().enumerate() {
        if count == 0 {
            continue;
        }
        running += count as usize;
        if !q25_set && running >= lower {
            q25_set = true;
            q25 = bin as i32 - HIST_OFFSET;
        }
        if running >= upper {
            q75 = bin as i32 - HIST_OFFSET;
            break;
        }
    }
    q75 - q25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_series() {
        let s = [-5i32; 32];
        assert_eq!(energy(&s), 25);
        assert_eq!(mean(&s), -5);
        assert_eq!(min(&s), -5);
        assert_eq!(max(&s), -5);
        assert_eq!(entropy(&s), 0.0);
    }

    #[test]
    fn energy_truncates() {
        let mut s = [0i32; 32];
        s[0] = 5; // 25 / 32
        assert_eq!(energy(&s), 0);
        s[1] = -6; // 61 / 32
        assert_eq!(energy(&s), 1);
    }

    #[test]
    fn energy_u_wraps_like_u32() {
        let s = [70_000u32; 32];
        let sq = 70_000u32.wrapping_mul(70_000);
        let mut acc = 0u32;
        for _ in 0..32 {
            acc = acc.wrapping_add(sq);
        }
        assert_eq!(energy_u(&s), acc / 32);
    }

    #[test]
    fn mean_rounds_toward_zero() {
        let mut s = [0i32; 32];
        s[0] = -33; // -33 / 32 = -1.03 -> -1, floor would give -2
        assert_eq!(mean(&s), -1);
        s[0] = -31;
        assert_eq!(mean(&s), 0);
        s[0] = 65;
        assert_eq!(mean(&s), 2);
    }

    #[test]
    fn min_max_scan() {
        let mut s = [3u32; 8];
        s[5] = 1;
        s[6] = 9;
        assert_eq!(min(&s), 1);
        assert_eq!(max(&s), 9);
        let t: [i32; 4] = [0, -7, 7, -7];
        assert_eq!(min(&t), -7);
        assert_eq!(max(&t), 7);
    }

    #[test]
    fn entropy_of_two_equal_halves_is_one_bit() {
        let mut s = [10i32; 32];
        for v in s.iter_mut().take(16) {
            *v = -10;
        }
        assert_eq!(entropy(&s), 1.0);
    }

    #[test]
    fn entropy_of_distinct_values() {
        let mut s = [0i32; 32];
        for (i, v) in s.iter_mut().enumerate() {
            *v = i as i32 - 16;
        }
        // 32 bins of 0.156250 each
        assert!((entropy(&s) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn entropy_extremes_of_range() {
        let mut s = [-128i32; 64];
        for v in s.iter_mut().skip(32) {
            *v = 127;
        }
        assert_eq!(entropy(&s), 1.0);
    }

    #[test]
    fn iqr_of_ramp() {
        let mut s = [0u32; 32];
        for (i, v) in s.iter_mut().enumerate() {
            *v = i as u32;
        }
        assert_eq!(iqr(&s), 16);
    }

    #[test]
    fn iqr_first_crossing() {
        // 8 zeros, 16 fives, 8 nines: count reaches 8 at 0 and 24 at 5
        let mut s = [0u32; 32];
        for v in s.iter_mut().skip(8).take(16) {
            *v = 5;
        }
        for v in s.iter_mut().skip(24) {
            *v = 9;
        }
        assert_eq!(iqr(&s), 5);
    }

    #[test]
    fn histogram_range_checks() {
        let mut s = [0i32; 32];
        s[0] = -128;
        s[1] = 127;
        assert_eq!(entropy_out_of_range(&s), None);
        s[7] = 128;
        assert_eq!(entropy_out_of_range(&s), Some(128));
        s[7] = -129;
        assert_eq!(entropy_out_of_range(&s), Some(-129));

        let mut u = [127u32; 32];
        assert_eq!(iqr_out_of_range(&u), None);
        u[31] = 144;
        assert_eq!(iqr_out_of_range(&u), Some(144));
    }

    #[test]
    fn iqr_of_constant_is_zero() {
        assert_eq!(iqr(&[42u32; 32]), 0);
        assert_eq!(iqr(&[0u32; 128]), 0);
    }
}
