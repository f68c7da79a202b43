//! Constant-power pan law and stereo level pairs.
//!
//! Pan position `p ∈ [-1, 1]` maps to an angle `θ = (p + 1)·π/4 ∈ [0, π/2]`:
//!
//! ```text
//! left  = level · cos θ
//! right = level · sin θ
//! ```
//!
//! so `left² + right² = level²` at every position. A centred source sits
//! at `level · √2/2` on each side instead of `level / 2`.
//!
//! ```rust
//! use edumixer_core::constant_power_pan;
//!
//! let centre = constant_power_pan(1.0, 0.0);
//! assert!((centre.left - core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
//! assert!((centre.left - centre.right).abs() < 1e-6);
//! ```

use core::f32::consts::FRAC_PI_4;
use core::ops::{Add, AddAssign};
use libm::{cosf, sinf};

/// Left or right side of a stereo pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    /// Left side.
    Left,
    /// Right side.
    Right,
}

/// A left/right pair of levels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StereoLevel {
    /// Left side level.
    pub left: f32,
    /// Right side level.
    pub right: f32,
}

impl StereoLevel {
    /// Both sides at zero.
    pub const SILENT: Self = Self::new(0.0, 0.0);

    /// Creates a pair from explicit sides.
    #[inline]
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Level of one side.
    #[inline]
    pub const fn side(self, side: Side) -> f32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Adds `level` onto one side.
    #[inline]
    pub fn add_to(&mut self, side: Side, level: f32) {
        match side {
            Side::Left => self.left += level,
            Side::Right => self.right += level,
        }
    }

    /// Both sides multiplied by `gain`.
    #[inline]
    pub fn scaled(self, gain: f32) -> Self {
        Self::new(self.left * gain, self.right * gain)
    }

    /// Sum of both sides.
    #[inline]
    pub fn sum(self) -> f32 {
        self.left + self.right
    }
}

impl Add for StereoLevel {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.left + rhs.left, self.right + rhs.right)
    }
}

impl AddAssign for StereoLevel {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.left += rhs.left;
        self.right += rhs.right;
    }
}

/// Left and right gain factors for pan position `pan`.
#[inline]
pub fn constant_power_gains(pan: f32) -> (f32, f32) {
    let theta = (pan + 1.0) * FRAC_PI_4;
    (cosf(theta), sinf(theta))
}

/// Splits `level` into a stereo pair at pan position `pan`.
#[inline]
pub fn constant_power_pan(level: f32, pan: f32) -> StereoLevel {
    let (left, right) = constant_power_gains(pan);
    StereoLevel::new(level * left, level * right)
}
