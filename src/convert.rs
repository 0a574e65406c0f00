//! Raw count to physical unit conversion.
//!
//! Ranges are passed as their 2-bit register field value. Any other value
//! has no defined sensitivity and the raw count is returned unscaled.

use cast::f32;

use crate::conf::{AccelScale, GyroScale};

/// Temperature sensitivity, counts per degree Celsius
pub const TEMP_SENSITIVITY: f32 = 340.0;
/// Temperature at a raw reading of zero, degrees Celsius
pub const TEMP_OFFSET: f32 = 36.53;

/// Converts an accelerometer count to g.
pub fn accel_to_g(raw: i16, range: u8) -> f32 {
    match AccelScale::from_bits(range) {
        Some(scale) => f32(raw) / scale.sensitivity(),
        None => f32(raw),
    }
}

/// Converts a gyroscope count to degrees/second.
pub fn gyro_to_dps(raw: i16, range: u8) -> f32 {
    match GyroScale::from_bits(range) {
        Some(scale) => f32(raw) / scale.sensitivity(),
        None => f32(raw),
    }
}

/// Converts a temperature count to degrees Celsius.
pub fn temp_to_celsius(raw: i16) -> f32 {
    f32(raw) / TEMP_SENSITIVITY + TEMP_OFFSET
}
