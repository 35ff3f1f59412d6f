use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

use crate::entropy_table::{EntropyLookup, WindowSize};
use crate::extract;
use crate::transform::{self, Jerk};
use crate::window::Window;

pub const NUM_FEATURES: usize = 19;

pub const IDX_ACC_ENERGY_X: usize = 0;
pub const IDX_ACC_ENERGY_Y: usize = 1;
pub const IDX_ACC_ENERGY_Z: usize = 2;
pub const IDX_JERK_ENERGY_X: usize = 3;
pub const IDX_JERK_ENERGY_Y: usize = 4;
pub const IDX_JERK_ENERGY_Z: usize = 5;
pub const IDX_ACC_MIN_X: usize = 6;
pub const IDX_ACC_MIN_Y: usize = 7;
pub const IDX_ACC_MIN_Z: usize = 8;
pub const IDX_MAG_SQ_MIN: usize = 9;
pub const IDX_ACC_ENTROPY_X: usize = 10;
pub const IDX_ACC_ENTROPY_Y: usize = 11;
pub const IDX_ACC_ENTROPY_Z: usize = 12;
pub const IDX_MAG_SQ_ENERGY: usize = 13;
pub const IDX_MAG_SQ_MAX: usize = 14;
pub const IDX_JERK_MAG_SQ_IQR: usize = 15;
pub const IDX_JERK_MEAN_X: usize = 16;
pub const IDX_JERK_MEAN_Y: usize = 17;
pub const IDX_JERK_MEAN_Z: usize = 18;

/// Training-set names of the features, in vector order.
pub static FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "tTotalAcc-energy()-X",
    "tTotalAcc-energy()-Y",
    "tTotalAcc-energy()-Z",
    "tTotalAccJerk-energy()-X",
    "tTotalAccJerk-energy()-Y",
    "tTotalAccJerk-energy()-Z",
    "tTotalAcc-min()-X",
    "tTotalAcc-min()-Y",
    "tTotalAcc-min()-Z",
    "tTotalAccMagSq-min()",
    "tTotalAcc-entropy()-X",
    "tTotalAcc-entropy()-Y",
    "tTotalAcc-entropy()-Z",
    "tTotalAccMagSq-energy()",
    "tTotalAccMagSq-max()",
    "tTotalAccJerkMagSq-iqr()",
    "tTotalAccJerk-mean()-X",
    "tTotalAccJerk-mean()-Y",
    "tTotalAccJerk-mean()-Z",
];

static REGISTRY: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    FEATURE_NAMES
        .iter()
        .enumerate()
        .map(|(idx, &name)| (name, idx))
        .collect()
});

/// Position of a feature in the vector, looked up by its training-set name.
pub fn feature_index(name: &str) -> Option<usize> {
    REGISTRY.get(name).copied()
}

/// Classifier input: the 19 window features in their fixed order.
#[repr(align(64))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVec {
    pub data: [f32; NUM_FEATURES],
}

impl FeatureVec {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            data: [0.0; NUM_FEATURES],
        }
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline(always)]
    pub fn copy_to_slice(&self, out: &mut [f32]) {
        out.copy_from_slice(&self.data);
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        feature_index(name).map(|idx| self.data[idx])
    }
}

impl Default for FeatureVec {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the feature vector of a full window.
///
/// The window is only read; resetting it afterwards is up to the caller.
/// Calling this on a window that is not full, or with values outside the
/// histogram range, is a caller bug (checked in debug builds only); use
/// [`try_compute_features`] for untrusted input.
pub fn compute_features<const N: usize>(window: &Window<N>) -> FeatureVec
where
    WindowSize<N>: EntropyLookup,
{
    let mut fv = FeatureVec::new();
    compute_features_into(window, &mut fv);
    fv
}

/// Same as [`compute_features`], writing into an existing vector.
pub fn compute_features_into<const N: usize>(window: &Window<N>, fv: &mut FeatureVec)
where
    WindowSize<N>: EntropyLookup,
{
    debug_assert!(
        window.is_full(),
        "features of a window holding {} of {} samples",
        window.len(),
        N
    );

    let jerk = transform::jerk(window);
    let mag_sq = transform::window_magnitude_sq(window);
    let jerk_mag_sq = transform::jerk_magnitude_sq(&jerk);
    assemble(window, &jerk, &mag_sq, &jerk_mag_sq, fv);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeatureError {
    #[error("window holds {len} of {capacity} samples")]
    Incomplete { len: usize, capacity: usize },

    #[error("{series} value {value} does not fit the 256-bin histogram")]
    OutOfRange { series: &'static str, value: i64 },
}

/// Checked variant of [`compute_features_into`].
///
/// Rejects a window that is not full, raw samples outside `[-128, 127]` and
/// jerk magnitudes above 127 instead of panicking on the histogram index.
/// For accepted windows the output is identical to the unchecked path.
pub fn try_compute_features_into<const N: usize>(
    window: &Window<N>,
    fv: &mut FeatureVec,
) -> Result<(), FeatureError>
where
    WindowSize<N>: EntropyLookup,
{
    if !window.is_full() {
        return Err(FeatureError::Incomplete {
            len: window.len(),
            capacity: N,
        });
    }
    for (series, axis) in [("x", &window.x), ("y", &window.y), ("z", &window.z)] {
        if let Some(value) = extract::entropy_out_of_range(axis) {
            return Err(FeatureError::OutOfRange {
                series,
                value: value as i64,
            });
        }
    }

    let jerk = transform::jerk(window);
    let jerk_mag_sq = transform::jerk_magnitude_sq(&jerk);
    if let Some(value) = extract::iqr_out_of_range(&jerk_mag_sq) {
        return Err(FeatureError::OutOfRange {
            series: "jerk magnitude squared",
            value: value as i64,
        });
    }
    let mag_sq = transform::window_magnitude_sq(window);
    assemble(window, &jerk, &mag_sq, &jerk_mag_sq, fv);
    Ok(())
}

pub fn try_compute_features<const N: usize>(window: &Window<N>) -> Result<FeatureVec, FeatureError>
where
    WindowSize<N>: EntropyLookup,
{
    let mut fv = FeatureVec::new();
    try_compute_features_into(window, &mut fv)?;
    Ok(fv)
}

fn assemble<const N: usize>(
    window: &Window<N>,
    jerk: &Jerk<N>,
    mag_sq: &[u32; N],
    jerk_mag_sq: &[u32; N],
    fv: &mut FeatureVec,
) where
    WindowSize<N>: EntropyLookup,
{
    let f = &mut fv.data;

    f[IDX_ACC_ENERGY_X] = extract::energy(&window.x) as f32;
    f[IDX_ACC_ENERGY_Y] = extract::energy(&window.y) as f32;
    f[IDX_ACC_ENERGY_Z] = extract::energy(&window.z) as f32;

    f[IDX_JERK_ENERGY_X] = extract::energy(&jerk.x) as f32;
    f[IDX_JERK_ENERGY_Y] = extract::energy(&jerk.y) as f32;
    f[IDX_JERK_ENERGY_Z] = extract::energy(&jerk.z) as f32;

    f[IDX_ACC_MIN_X] = extract::min(&window.x) as f32;
    f[IDX_ACC_MIN_Y] = extract::min(&window.y) as f32;
    f[IDX_ACC_MIN_Z] = extract::min(&window.z) as f32;

    f[IDX_MAG_SQ_MIN] = extract::min(mag_sq) as f32;

    f[IDX_ACC_ENTROPY_X] = extract::entropy(&window.x);
    f[IDX_ACC_ENTROPY_Y] = extract::entropy(&window.y);
    f[IDX_ACC_ENTROPY_Z] = extract::entropy(&window.z);

    f[IDX_MAG_SQ_ENERGY] = extract::energy_u(mag_sq) as f32;
    f[IDX_MAG_SQ_MAX] = extract::max(mag_sq) as f32;
    f[IDX_JERK_MAG_SQ_IQR] = extract::iqr(jerk_mag_sq) as f32;

    f[IDX_JERK_MEAN_X] = extract::mean(&jerk.x) as f32;
    f[IDX_JERK_MEAN_Y] = extract::mean(&jerk.y) as f32;
    f[IDX_JERK_MEAN_Z] = extract::mean(&jerk.z) as f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Sample;

    fn constant_window(s: Sample) -> Window<32> {
        let mut w = Window::<32>::new();
        while !w.push(s) {}
        w
    }

    #[test]
    fn registry_covers_every_slot() {
        for (idx, name) in FEATURE_NAMES.iter().enumerate() {
            assert_eq!(feature_index(name), Some(idx));
        }
        assert_eq!(feature_index("tTotalAccJerkMagSq-iqr()"), Some(IDX_JERK_MAG_SQ_IQR));
        assert_eq!(feature_index("tBodyAcc-mean()-X"), None);
    }

    #[test]
    fn constant_window_features() {
        let w = constant_window(Sample::new(4, 0, -4));
        let fv = compute_features(&w);
        let f = fv.as_slice();

        assert_eq!(f[IDX_ACC_ENERGY_X], 16.0);
        assert_eq!(f[IDX_ACC_ENERGY_Y], 0.0);
        assert_eq!(f[IDX_ACC_ENERGY_Z], 16.0);
        assert_eq!(&f[IDX_JERK_ENERGY_X..=IDX_JERK_ENERGY_Z], &[0.0; 3]);
        assert_eq!(f[IDX_ACC_MIN_X], 4.0);
        assert_eq!(f[IDX_ACC_MIN_Y], 0.0);
        assert_eq!(f[IDX_ACC_MIN_Z], -4.0);
        assert_eq!(f[IDX_MAG_SQ_MIN], 32.0);
        assert_eq!(&f[IDX_ACC_ENTROPY_X..=IDX_ACC_ENTROPY_Z], &[0.0; 3]);
        assert_eq!(f[IDX_MAG_SQ_ENERGY], 1024.0);
        assert_eq!(f[IDX_MAG_SQ_MAX], 32.0);
        assert_eq!(f[IDX_JERK_MAG_SQ_IQR], 0.0);
        assert_eq!(&f[IDX_JERK_MEAN_X..=IDX_JERK_MEAN_Z], &[0.0; 3]);
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let mut w = Window::<32>::new();
        for i in 0..32 {
            w.push(Sample::new(i % 7 - 3, 32 - i, (i * 5) % 11 - 5));
        }
        let a = compute_features(&w);
        let b = compute_features(&w);
        for (x, y) in a.data.iter().zip(b.data.iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn checked_matches_unchecked_on_valid_windows() {
        let mut w = Window::<32>::new();
        for i in 0..32 {
            w.push(Sample::new(i % 5 - 2, -(i % 3), 32));
        }
        assert_eq!(try_compute_features(&w), Ok(compute_features(&w)));
    }

    #[test]
    fn checked_rejects_unbinnable_windows() {
        let mut w = Window::<32>::new();
        assert_eq!(
            try_compute_features(&w),
            Err(FeatureError::Incomplete { len: 0, capacity: 32 })
        );

        // raw z beyond the entropy histogram (about 4.6 g)
        while !w.push(Sample::new(0, 0, 147)) {}
        assert_eq!(
            try_compute_features(&w),
            Err(FeatureError::OutOfRange { series: "z", value: 147 })
        );

        // x swings by 12 between samples: jerk magnitude squared is 144
        w.reset();
        for i in 0..32 {
            w.push(Sample::new(if i % 2 == 0 { 6 } else { -6 }, 0, 32));
        }
        assert_eq!(
            try_compute_features(&w),
            Err(FeatureError::OutOfRange {
                series: "jerk magnitude squared",
                value: 144
            })
        );
    }

    #[test]
    fn lookup_by_name() {
        let w = constant_window(Sample::new(2, 2, 2));
        let fv = compute_features(&w);
        assert_eq!(fv.get("tTotalAccMagSq-max()"), Some(12.0));
        assert_eq!(fv.get("unknown"), None);
    }

    #[test]
    fn ramp_window_jerk_features() {
        // x rises by one every sample: jerk x is 1 for 31 samples, then 0
        let mut w = Window::<32>::new();
        for i in 0..32 {
            w.push(Sample::new(i - 16, 0, 0));
        }
        let fv = compute_features(&w);
        assert_eq!(fv.data[IDX_JERK_ENERGY_X], 0.0); // 31 / 32
        assert_eq!(fv.data[IDX_JERK_MEAN_X], 0.0);
        assert_eq!(fv.data[IDX_ACC_MIN_X], -16.0);
        assert_eq!(fv.data[IDX_MAG_SQ_MAX], 256.0);
        // jerk magnitude is 1 except for the trailing 0
        assert_eq!(fv.data[IDX_JERK_MAG_SQ_IQR], 0.0);
        assert!((fv.data[IDX_ACC_ENTROPY_X] - 5.0).abs() < 1e-5);
    }
}
