//! Zero offset calibration.
//!
//! Each axis is swept over the four full scale ranges of its sensor, most
//! sensitive first. At every range a fixed number of samples is averaged
//! and stored as that range's offset. The sensor is left at its most
//! sensitive range afterwards.
//!
//! The device must be still while calibrating. A transport error stops the
//! sweep at once; offsets of ranges already swept are kept, the others keep
//! their previous value.

use cast::i32;

use crate::conf::{AccelScale, GyroScale};
use crate::device::Device;
use crate::types::{Axis, Sensor};
use crate::{Error, Mpu6050};

/// Samples averaged per range
pub const SAMPLES_PER_RANGE: u16 = 700;

impl<DEV> Mpu6050<DEV> where DEV: Device
{
    /// Calibrates one axis. Blocks for 2800 word reads.
    pub fn calibrate_axis(&mut self, axis: Axis) -> Result<(), Error> {
        debug!("calibrating {:?}", axis);
        let result = self.sweep(axis);
        if let Err(e) = result {
            warn!("calibration of {:?} aborted: {:?}", axis, e);
        }
        result
    }

    /// Calibrates every axis, accelerometer first. Stops at the first
    /// axis that fails.
    pub fn calibrate_all(&mut self) -> Result<(), Error> {
        for axis in Axis::ALL.iter() {
            self.calibrate_axis(*axis)?;
        }
        Ok(())
    }

    /// Zeroes every offset
    pub fn clear_offsets(&mut self) {
        self.offsets.clear();
    }

    fn sweep(&mut self, axis: Axis) -> Result<(), Error> {
        for range in 0..4 {
            let gravity = match axis.sensor() {
                Sensor::Accel => {
                    let scale = AccelScale::ALL[range];
                    self.set_accel_range(scale)?;
                    if self.config.gravity_axis == Some(axis) {
                        scale.sensitivity() as i32
                    } else {
                        0
                    }
                },
                Sensor::Gyro => {
                    self.set_gyro_range(GyroScale::ALL[range])?;
                    0
                },
            };

            let offset = clamp(self.mean(axis)? - gravity);
            self.offsets.set(axis, range as u8, offset);
            debug!("{:?} range {}: offset {}", axis, range, offset);
        }

        match axis.sensor() {
            Sensor::Accel => self.set_accel_range(AccelScale::default()),
            Sensor::Gyro => self.set_gyro_range(GyroScale::default()),
        }
    }

    // Truncates toward zero. 700 full scale samples fit an i32.
    fn mean(&mut self, axis: Axis) -> Result<i32, Error> {
        let mut sum: i32 = 0;
        for _ in 0..SAMPLES_PER_RANGE {
            sum += i32(self.raw(axis)?);
        }
        Ok(sum / i32(SAMPLES_PER_RANGE))
    }
}

fn clamp(value: i32) -> i16 {
    if value > i32(i16::MAX) {
        i16::MAX
    } else if value < i32(i16::MIN) {
        i16::MIN
    } else {
        value as i16
    }
}
