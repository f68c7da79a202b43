//! Level conversions for meter readouts.
//!
//! Levels in this crate are relative linear energy proxies, not calibrated
//! dBFS. The dB helpers here exist so displays can show a familiar scale.

use libm::{expf, logf};

/// Lowest value [`linear_to_db`] reports; anything quieter reads as this.
pub const METER_FLOOR_DB: f32 = -60.0;

/// Convert decibels to linear gain.
///
/// ```rust
/// use edumixer_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels, floored at [`METER_FLOOR_DB`].
///
/// ```rust
/// use edumixer_core::{METER_FLOOR_DB, linear_to_db};
///
/// assert!(linear_to_db(1.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) + 6.02).abs() < 0.01);
/// assert_eq!(linear_to_db(0.0), METER_FLOOR_DB);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    (logf(linear.max(1e-10)) * FACTOR).max(METER_FLOOR_DB)
}

/// Position of `level` on a meter spanning `0..=full_scale`, clamped to
/// `[0, 1]`.
///
/// Summed buses can exceed 1.0 (four centred channels reach ≈2.83 per
/// side), so displays pick their own full-scale value.
#[inline]
pub fn meter_fraction(level: f32, full_scale: f32) -> f32 {
    if full_scale <= 0.0 || !level.is_finite() {
        return 0.0;
    }
    (level / full_scale).clamp(0.0, 1.0)
}
