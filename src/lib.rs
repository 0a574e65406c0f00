//! A no_std, generic driver for the MPU6050 (accelerometer + gyroscope +
//! temperature IMU) on a two-wire bus.
//!
//! Every register is accessed one byte per transaction. 16 bit samples are
//! read low byte first, then high byte. Registers holding several settings
//! are always updated read-modify-write.
//!
//! ```ignore
//! let mut mpu = Mpu6050::i2c(i2c, SlaveAddress::Ad0Low);
//! mpu.enable()?;
//! mpu.calibrate_axis(Axis::GyroZ)?;
//! let accel = mpu.accel()?; // g
//! let gyro = mpu.gyro()?; // deg/s
//! let temp = mpu.temp()?; // degC
//! ```
//!
//! The driver is not synchronized. One owner at a time, or an external
//! mutex around the whole driver.

#![warn(missing_docs)]
#![no_std]

#[macro_use]
extern crate bitflags;
extern crate cast;
extern crate embedded_hal as hal;

#[macro_use]
mod fmt;

mod calibration;
pub mod conf;
pub mod convert;
pub mod device;
mod types;
mod vec3;

pub use crate::calibration::SAMPLES_PER_RANGE;
pub use crate::conf::{AccelConfig, AccelScale, ClockSource, GyroConfig,
                      GyroScale, InterruptEnable, InterruptStatus,
                      LowPowerWake, Mpu6050Config, PwrMgmt1, PwrMgmt2,
                      SignalPathReset, StandbyAxes};
pub use crate::device::{Device, I2cDevice, Releasable, SlaveAddress,
                        TransportStatus};
pub use crate::types::{Axis, Offsets, Sensor};
pub use crate::vec3::Vec3;

/// Expected value of the WHO_AM_I register
pub const WHO_AM_I: u8 = 0x68;

/// Driver errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The bus is in use by another transaction
    Busy,
    /// Missing acknowledge, or a failed send or receive
    Communication,
}

impl From<TransportStatus> for Error {
    fn from(status: TransportStatus) -> Self {
        match status {
            TransportStatus::BusBusy => Error::Busy,
            TransportStatus::Nack
            | TransportStatus::WriteFailed
            | TransportStatus::ReadFailed => Error::Communication,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Busy => f.write_str("bus busy"),
            Error::Communication => f.write_str("bus communication failed"),
        }
    }
}

/// MPU6050 register map
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Sample rate divider
    SMPLRT_DIV = 0x19,
    /// Frame sync and digital low pass filter
    CONFIG = 0x1a,
    /// Gyroscope self test and full scale range
    GYRO_CONFIG = 0x1b,
    /// Accelerometer self test and full scale range
    ACCEL_CONFIG = 0x1c,
    /// Interrupt enable
    INT_ENABLE = 0x38,
    /// Interrupt status, cleared on read
    INT_STATUS = 0x3a,
    /// Accelerometer X, high byte
    ACCEL_XOUT_H = 0x3b,
    /// Accelerometer X, low byte
    ACCEL_XOUT_L = 0x3c,
    /// Accelerometer Y, high byte
    ACCEL_YOUT_H = 0x3d,
    /// Accelerometer Y, low byte
    ACCEL_YOUT_L = 0x3e,
    /// Accelerometer Z, high byte
    ACCEL_ZOUT_H = 0x3f,
    /// Accelerometer Z, low byte
    ACCEL_ZOUT_L = 0x40,
    /// Temperature, high byte
    TEMP_OUT_H = 0x41,
    /// Temperature, low byte
    TEMP_OUT_L = 0x42,
    /// Gyroscope X, high byte
    GYRO_XOUT_H = 0x43,
    /// Gyroscope X, low byte
    GYRO_XOUT_L = 0x44,
    /// Gyroscope Y, high byte
    GYRO_YOUT_H = 0x45,
    /// Gyroscope Y, low byte
    GYRO_YOUT_L = 0x46,
    /// Gyroscope Z, high byte
    GYRO_ZOUT_H = 0x47,
    /// Gyroscope Z, low byte
    GYRO_ZOUT_L = 0x48,
    /// Signal path reset
    SIGNAL_PATH_RESET = 0x68,
    /// Power management 1
    PWR_MGMT_1 = 0x6b,
    /// Power management 2
    PWR_MGMT_2 = 0x6c,
    /// Device identity
    WHO_AM_I = 0x75,
}

impl Register {
    /// Register address
    pub fn addr(&self) -> u8 {
        *self as u8
    }
}

/// MPU6050 driver
///
/// Owns the transport together with the full scale ranges last written to
/// or read from the device and the calibration offsets.
pub struct Mpu6050<DEV> {
    dev: DEV,
    accel_scale: AccelScale,
    gyro_scale: GyroScale,
    offsets: Offsets,
    config: Mpu6050Config,
}

impl<I2C> Mpu6050<I2cDevice<I2C>> where I2C: hal::i2c::I2c
{
    /// Creates a driver for a device on an I2C bus, default configuration
    pub fn i2c(i2c: I2C, address: SlaveAddress) -> Self {
        Mpu6050::new(I2cDevice::with_address(i2c, address))
    }
}

impl<DEV> Mpu6050<DEV> where DEV: Device
{
    /// Creates a driver with the default [`Mpu6050Config`]. No bus traffic
    /// happens until the first operation, usually [`enable`].
    ///
    /// [`Mpu6050Config`]: ./conf/struct.Mpu6050Config.html
    /// [`enable`]: #method.enable
    pub fn new(dev: DEV) -> Self {
        Mpu6050::with_config(dev, Mpu6050Config::default())
    }

    /// Creates a driver with the given configuration.
    pub fn with_config(dev: DEV, config: Mpu6050Config) -> Self {
        Mpu6050 { dev,
                  accel_scale: AccelScale::default(),
                  gyro_scale: GyroScale::default(),
                  offsets: Offsets::default(),
                  config }
    }

    /// Configuration in use
    pub fn config(&self) -> &Mpu6050Config {
        &self.config
    }

    /// Destroys the driver recovering the bus
    pub fn release(self) -> DEV::Released {
        self.dev.release()
    }

    /// Reads a signed 16 bit value: `low` first, then `high`. A failure on
    /// either byte is returned and no value is produced.
    pub fn read_word(&mut self, low: Register, high: Register) -> Result<i16, Error> {
        let l = self.dev.read(low)?;
        let h = self.dev.read(high)?;
        Ok(i16::from_le_bytes([l, h]))
    }

    /// Reads a whole register
    pub fn read_bitfield(&mut self, reg: Register) -> Result<u8, Error> {
        Ok(self.dev.read(reg)?)
    }

    /// Writes a whole register. Bits not present in `value` are cleared;
    /// read it first to change only some of them.
    pub fn write_bitfield(&mut self, reg: Register, value: u8) -> Result<(), Error> {
        Ok(self.dev.write(reg, value)?)
    }

    /// Reads the WHO_AM_I register; should return [`WHO_AM_I`]
    ///
    /// [`WHO_AM_I`]: ./constant.WHO_AM_I.html
    pub fn who_am_i(&mut self) -> Result<u8, Error> {
        self.read_bitfield(Register::WHO_AM_I)
    }

    fn modify_pwr_mgmt_1<F>(&mut self, f: F) -> Result<(), Error>
        where F: FnOnce(PwrMgmt1) -> PwrMgmt1
    {
        self.dev.modify(Register::PWR_MGMT_1, |r| {
                    f(PwrMgmt1::from_bits(r)).into_bits()
                })?;
        Ok(())
    }

    fn modify_pwr_mgmt_2<F>(&mut self, f: F) -> Result<(), Error>
        where F: FnOnce(PwrMgmt2) -> PwrMgmt2
    {
        self.dev.modify(Register::PWR_MGMT_2, |r| {
                    f(PwrMgmt2::from_bits(r)).into_bits()
                })?;
        Ok(())
    }

    /// Sets the accelerometer full scale range. The self test bits of
    /// ACCEL_CONFIG are kept. The tracked range changes only on success.
    pub fn set_accel_range(&mut self, scale: AccelScale) -> Result<(), Error> {
        self.dev.modify(Register::ACCEL_CONFIG, |r| {
                    AccelConfig::from_bits(r).with_afs_sel(scale.bits())
                                             .into_bits()
                })?;
        self.accel_scale = scale;
        trace!("accel range {:?}", scale);
        Ok(())
    }

    /// Reads the accelerometer range from the device and tracks it.
    pub fn get_accel_range(&mut self) -> Result<AccelScale, Error> {
        let reg = AccelConfig::from_bits(self.dev.read(Register::ACCEL_CONFIG)?);
        self.accel_scale = AccelScale::from_bits(reg.afs_sel()).unwrap_or_default();
        Ok(self.accel_scale)
    }

    /// Sets the gyroscope full scale range. The self test bits of
    /// GYRO_CONFIG are kept. The tracked range changes only on success.
    pub fn set_gyro_range(&mut self, scale: GyroScale) -> Result<(), Error> {
        self.dev.modify(Register::GYRO_CONFIG, |r| {
                    GyroConfig::from_bits(r).with_fs_sel(scale.bits())
                                            .into_bits()
                })?;
        self.gyro_scale = scale;
        trace!("gyro range {:?}", scale);
        Ok(())
    }

    /// Reads the gyroscope range from the device and tracks it.
    pub fn get_gyro_range(&mut self) -> Result<GyroScale, Error> {
        let reg = GyroConfig::from_bits(self.dev.read(Register::GYRO_CONFIG)?);
        self.gyro_scale = GyroScale::from_bits(reg.fs_sel()).unwrap_or_default();
        Ok(self.gyro_scale)
    }

    /// Tracked accelerometer range, no bus traffic
    pub fn accel_range(&self) -> AccelScale {
        self.accel_scale
    }

    /// Tracked gyroscope range, no bus traffic
    pub fn gyro_range(&self) -> GyroScale {
        self.gyro_scale
    }

    fn range_bits(&self, sensor: Sensor) -> u8 {
        match sensor {
            Sensor::Accel => self.accel_scale.bits(),
            Sensor::Gyro => self.gyro_scale.bits(),
        }
    }

    /// Calibration offset subtracted from `axis` at its tracked range
    pub fn offset(&self, axis: Axis) -> i16 {
        self.offsets.get(axis, self.range_bits(axis.sensor()))
    }

    /// Calibration offset of `axis` for the range field value `range`
    pub fn offset_for(&self, axis: Axis, range: u8) -> i16 {
        self.offsets.get(axis, range)
    }

    /// Every calibration offset
    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }

    /// Uncorrected sample of one axis
    pub fn raw(&mut self, axis: Axis) -> Result<i16, Error> {
        let (low, high) = axis.registers();
        self.read_word(low, high)
    }

    /// Offset corrected sample of one axis, in g or deg/s
    pub fn read_axis(&mut self, axis: Axis) -> Result<f32, Error> {
        let raw = self.raw(axis)?;
        let range = self.range_bits(axis.sensor());
        let corrected = raw.saturating_sub(self.offsets.get(axis, range));
        Ok(match axis.sensor() {
               Sensor::Accel => convert::accel_to_g(corrected, range),
               Sensor::Gyro => convert::gyro_to_dps(corrected, range),
           })
    }

    /// Uncorrected accelerometer samples
    pub fn raw_accel(&mut self) -> Result<Vec3<i16>, Error> {
        Ok(Vec3::new(self.raw(Axis::AccelX)?,
                     self.raw(Axis::AccelY)?,
                     self.raw(Axis::AccelZ)?))
    }

    /// Uncorrected gyroscope samples
    pub fn raw_gyro(&mut self) -> Result<Vec3<i16>, Error> {
        Ok(Vec3::new(self.raw(Axis::GyroX)?,
                     self.raw(Axis::GyroY)?,
                     self.raw(Axis::GyroZ)?))
    }

    /// Accelerometer measurements, g
    pub fn accel(&mut self) -> Result<Vec3<f32>, Error> {
        Ok(Vec3::new(self.read_axis(Axis::AccelX)?,
                     self.read_axis(Axis::AccelY)?,
                     self.read_axis(Axis::AccelZ)?))
    }

    /// Gyroscope measurements, deg/s
    pub fn gyro(&mut self) -> Result<Vec3<f32>, Error> {
        Ok(Vec3::new(self.read_axis(Axis::GyroX)?,
                     self.read_axis(Axis::GyroY)?,
                     self.read_axis(Axis::GyroZ)?))
    }

    /// Temperature sensor count
    pub fn raw_temp(&mut self) -> Result<i16, Error> {
        self.read_word(Register::TEMP_OUT_L, Register::TEMP_OUT_H)
    }

    /// Temperature sensor measurement, degC
    pub fn temp(&mut self) -> Result<f32, Error> {
        Ok(convert::temp_to_celsius(self.raw_temp()?))
    }

    /// Wakes the device, selects the configured clock, enables the
    /// temperature sensor and takes every axis out of standby. Offsets are
    /// zeroed and both ranges go back to their most sensitive setting.
    ///
    /// With [`calibrate_on_enable`] set the six axes are calibrated before
    /// returning, 16800 blocking reads in total.
    ///
    /// [`calibrate_on_enable`]: ./conf/struct.Mpu6050Config.html#method.calibrate_on_enable
    pub fn enable(&mut self) -> Result<(), Error> {
        debug!("enabling, clock {:?}", self.config.clock_source);
        self.wake_up()?;
        self.set_clock_source(self.config.clock_source)?;
        self.enable_temp()?;
        self.set_standby(StandbyAxes::ALL, false)?;

        self.offsets.clear();
        self.set_accel_range(AccelScale::default())?;
        self.set_gyro_range(GyroScale::default())?;

        if self.config.calibrate_on_enable {
            self.calibrate_all()?;
        }
        Ok(())
    }

    /// Disables the temperature sensor, puts every axis in standby, then
    /// sleeps.
    pub fn disable(&mut self) -> Result<(), Error> {
        debug!("disabling");
        self.disable_temp()?;
        self.set_standby(StandbyAxes::ALL, true)?;
        self.sleep()
    }

    /// Clears the sleep bit
    pub fn wake_up(&mut self) -> Result<(), Error> {
        self.modify_pwr_mgmt_1(|r| r.with_sleep(false))
    }

    /// Sets the sleep bit
    pub fn sleep(&mut self) -> Result<(), Error> {
        self.modify_pwr_mgmt_1(|r| r.with_sleep(true))
    }

    /// Enables the temperature sensor
    pub fn enable_temp(&mut self) -> Result<(), Error> {
        self.modify_pwr_mgmt_1(|r| r.with_temp_dis(false))
    }

    /// Disables the temperature sensor
    pub fn disable_temp(&mut self) -> Result<(), Error> {
        self.modify_pwr_mgmt_1(|r| r.with_temp_dis(true))
    }

    /// Selects the clock source
    pub fn set_clock_source(&mut self, source: ClockSource) -> Result<(), Error> {
        self.modify_pwr_mgmt_1(|r| r.with_clksel(source as u8))
    }

    /// Puts `axes` in standby (`true`) or makes them active (`false`).
    /// Other axes and the low power wake-up frequency are left alone.
    pub fn set_standby(&mut self, axes: StandbyAxes, standby: bool) -> Result<(), Error> {
        self.modify_pwr_mgmt_2(|r| {
                let current = r.standby();
                if standby {
                    r.with_standby(current | axes)
                } else {
                    r.with_standby(current - axes)
                }
            })
    }

    /// Axes currently in standby
    pub fn standby(&mut self) -> Result<StandbyAxes, Error> {
        Ok(PwrMgmt2::from_bits(self.dev.read(Register::PWR_MGMT_2)?).standby())
    }

    /// Sets the wake-up frequency used in accelerometer only low power mode
    pub fn set_low_power_wake(&mut self, rate: LowPowerWake) -> Result<(), Error> {
        self.modify_pwr_mgmt_2(|r| r.with_lp_wake_ctrl(rate as u8))
    }

    /// Resets every device register to its power-on default. The bit clears
    /// itself once done.
    ///
    /// Tracked ranges and offsets are kept and may no longer match the
    /// device; call [`enable`] and recalibrate afterwards.
    ///
    /// [`enable`]: #method.enable
    pub fn reset(&mut self) -> Result<(), Error> {
        debug!("device reset");
        self.modify_pwr_mgmt_1(|r| r.with_device_reset(true))
    }

    /// Reverts the selected signal paths (ADCs and filters) to their power
    /// up configuration. Sample registers are not cleared.
    pub fn reset_signal_paths(&mut self, paths: SignalPathReset) -> Result<(), Error> {
        debug!("signal path reset {}", paths.bits());
        self.write_bitfield(Register::SIGNAL_PATH_RESET, paths.bits())
    }

    /// Resets the accelerometer signal path
    pub fn reset_accel(&mut self) -> Result<(), Error> {
        self.reset_signal_paths(SignalPathReset::ACCEL_RESET)
    }

    /// Resets the gyroscope signal path
    pub fn reset_gyro(&mut self) -> Result<(), Error> {
        self.reset_signal_paths(SignalPathReset::GYRO_RESET)
    }

    /// Resets the temperature sensor signal path
    pub fn reset_temp(&mut self) -> Result<(), Error> {
        self.reset_signal_paths(SignalPathReset::TEMP_RESET)
    }

    /// Enables the given interrupt sources, keeping the others
    pub fn enable_interrupts(&mut self, ints: InterruptEnable) -> Result<(), Error> {
        self.dev.modify(Register::INT_ENABLE, |r| r | ints.bits())?;
        Ok(())
    }

    /// Disables the given interrupt sources, keeping the others
    pub fn disable_interrupts(&mut self, ints: InterruptEnable) -> Result<(), Error> {
        self.dev.modify(Register::INT_ENABLE, |r| r & !ints.bits())?;
        Ok(())
    }

    /// Reads INT_STATUS and returns every cause that is set. Reading clears
    /// the status on the device.
    pub fn what_happened(&mut self) -> Result<InterruptStatus, Error> {
        let status = self.dev.read(Register::INT_STATUS)?;
        Ok(InterruptStatus::from_bits_truncate(status))
    }

    /// Gyroscope X self test.
    ///
    /// Not implemented: no bus traffic, always succeeds.
    pub fn self_test_x(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Gyroscope Y self test.
    ///
    /// Not implemented: no bus traffic, always succeeds.
    pub fn self_test_y(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Gyroscope Z self test.
    ///
    /// Not implemented: no bus traffic, always succeeds.
    pub fn self_test_z(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Accelerometer self test of one axis.
    ///
    /// Not implemented: no bus traffic, always succeeds.
    pub fn self_test_accel(&mut self, _axis: Axis) -> Result<(), Error> {
        Ok(())
    }
}
