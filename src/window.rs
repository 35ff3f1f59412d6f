use serde::{Deserialize, Serialize};

/// One accelerometer reading, scaled so that 1 g == 32 units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Sample {
    #[inline(always)]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Fixed-size buffer of the last `N` samples, stored axis by axis.
///
/// Only the first `len` entries are valid. `reset` rewinds the fill counter
/// without touching stored values; nothing reads past `len` and features are
/// only computed once the window is full.
#[repr(align(64))]
#[derive(Debug, Clone)]
pub struct Window<const N: usize> {
    pub x: [i32; N],
    pub y: [i32; N],
    pub z: [i32; N],
    len: usize,
}

impl<const N: usize> Window<N> {
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            x: [0; N],
            y: [0; N],
            z: [0; N],
            len: 0,
        }
    }

    /// Builds a full window from axis arrays.
    pub fn from_axes(x: [i32; N], y: [i32; N], z: [i32; N]) -> Self {
        Self { x, y, z, len: N }
    }

    /// Appends one sample and returns whether the window is now full.
    ///
    /// A push into an already full window is dropped: the stored samples are
    /// left untouched and `true` is returned again.
    #[inline(always)]
    pub fn push(&mut self, sample: Sample) -> bool {
        if self.len < N {
            self.x[self.len] = sample.x;
            self.y[self.len] = sample.y;
            self.z[self.len] = sample.z;
            self.len += 1;
        }
        self.len == N
    }

    #[inline(always)]
    pub fn reset(&mut self) {
        self.len = 0;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Sample at `idx`, if it lies in the filled range.
    pub fn get(&self, idx: usize) -> Option<Sample> {
        (idx < self.len).then(|| Sample::new(self.x[idx], self.y[idx], self.z[idx]))
    }
}

impl<const N: usize> Default for Window<N> {
    fn default() -> Self {
        Self::new()
    }
}
