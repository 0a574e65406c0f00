//! Configuration for MPU6050.

use core::default::Default;

use bitfield_struct::bitfield;

use crate::types::Axis;

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Gyroscope reading full scale configuration; default: +250 dps.
pub enum GyroScale {
    /// +250 dps
    _250DPS = 0,
    /// +500 dps
    _500DPS = 1,
    /// +1000 dps
    _1000DPS = 2,
    /// +2000 dps
    _2000DPS = 3,
}
impl GyroScale {
    /// All ranges, most sensitive first.
    pub const ALL: [GyroScale; 4] = [GyroScale::_250DPS,
                                     GyroScale::_500DPS,
                                     GyroScale::_1000DPS,
                                     GyroScale::_2000DPS];

    /// Counts per degree/second.
    pub fn sensitivity(&self) -> f32 {
        match self {
            GyroScale::_250DPS => 131.072,
            GyroScale::_500DPS => 65.536,
            GyroScale::_1000DPS => 32.768,
            GyroScale::_2000DPS => 16.384,
        }
    }

    /// Decodes the 2-bit FS_SEL field value.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(GyroScale::_250DPS),
            1 => Some(GyroScale::_500DPS),
            2 => Some(GyroScale::_1000DPS),
            3 => Some(GyroScale::_2000DPS),
            _ => None,
        }
    }

    /// FS_SEL field value
    pub fn bits(&self) -> u8 {
        *self as u8
    }
}
impl Default for GyroScale {
    fn default() -> Self {
        GyroScale::_250DPS
    }
}

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Accelerometer reading full scale configuration, default: +2g.
pub enum AccelScale {
    /// +2g
    _2G = 0,
    /// +4g
    _4G = 1,
    /// +8g
    _8G = 2,
    /// +16g
    _16G = 3,
}
impl AccelScale {
    /// All ranges, most sensitive first.
    pub const ALL: [AccelScale; 4] =
        [AccelScale::_2G, AccelScale::_4G, AccelScale::_8G, AccelScale::_16G];

    /// Counts per g.
    pub fn sensitivity(&self) -> f32 {
        match self {
            AccelScale::_2G => 16384.0,
            AccelScale::_4G => 8192.0,
            AccelScale::_8G => 4096.0,
            AccelScale::_16G => 2048.0,
        }
    }

    /// Decodes the 2-bit AFS_SEL field value.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(AccelScale::_2G),
            1 => Some(AccelScale::_4G),
            2 => Some(AccelScale::_8G),
            3 => Some(AccelScale::_16G),
            _ => None,
        }
    }

    /// AFS_SEL field value
    pub fn bits(&self) -> u8 {
        *self as u8
    }
}
impl Default for AccelScale {
    fn default() -> Self {
        AccelScale::_2G
    }
}

/// Clock source, CLKSEL field of PWR_MGMT_1; default: internal 8MHz
/// oscillator. The datasheet recommends one of the gyro PLLs for
/// stability once the gyroscope is running.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal 8MHz oscillator
    Internal8MHz = 0,
    /// PLL with X axis gyroscope reference
    PllGyroX = 1,
    /// PLL with Y axis gyroscope reference
    PllGyroY = 2,
    /// PLL with Z axis gyroscope reference
    PllGyroZ = 3,
    /// PLL with external 32.768kHz reference
    PllExternal32kHz = 4,
    /// PLL with external 19.2MHz reference
    PllExternal19MHz = 5,
    /// Stops the clock and keeps the timing generator in reset
    Stop = 7,
}
impl Default for ClockSource {
    fn default() -> Self {
        ClockSource::Internal8MHz
    }
}

/// Wake-up frequency in accelerometer only low power mode (LP_WAKE_CTRL).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LowPowerWake {
    /// 1.25 Hz
    _1_25Hz = 0,
    /// 5 Hz
    _5Hz = 1,
    /// 20 Hz
    _20Hz = 2,
    /// 40 Hz
    _40Hz = 3,
}

/// Configuration of MPU6050
#[derive(Copy, Clone, Debug, Default)]
pub struct Mpu6050Config {
    pub(crate) calibrate_on_enable: bool,
    pub(crate) clock_source: ClockSource,
    pub(crate) gravity_axis: Option<Axis>,
}

impl Mpu6050Config {
    /// Creates a configuration that does not calibrate on enable, uses the
    /// internal oscillator and expects no gravity on any axis during
    /// calibration.
    pub fn new() -> Self {
        Default::default()
    }

    /// Runs the full six-axis calibration inside `enable`. This costs
    /// 2800 bus reads per axis and blocks until done.
    pub fn calibrate_on_enable(&mut self, calibrate: bool) -> &mut Self {
        self.calibrate_on_enable = calibrate;
        self
    }

    /// Sets the [`ClockSource`] selected by `enable`.
    ///
    /// [`ClockSource`]: ./enum.ClockSource.html
    pub fn clock_source(&mut self, source: ClockSource) -> &mut Self {
        self.clock_source = source;
        self
    }

    /// Names the accelerometer axis that points up while calibrating.
    /// One g worth of counts is removed from that axis' offsets so gravity
    /// is not treated as bias. Gyroscope axes are ignored.
    pub fn gravity_axis(&mut self, axis: Option<Axis>) -> &mut Self {
        self.gravity_axis = axis;
        self
    }
}

/// PWR_MGMT_1
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct PwrMgmt1 {
    /// Clock source
    #[bits(3)]
    pub clksel: u8,
    /// Temperature sensor disabled
    pub temp_dis: bool,
    #[bits(1)]
    __: u8,
    /// Cycle between sleep and single samples
    pub cycle: bool,
    /// Sleep mode
    pub sleep: bool,
    /// Resets all registers, self clearing
    pub device_reset: bool,
}

/// PWR_MGMT_2
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct PwrMgmt2 {
    /// Gyroscope Z standby
    pub stby_zg: bool,
    /// Gyroscope Y standby
    pub stby_yg: bool,
    /// Gyroscope X standby
    pub stby_xg: bool,
    /// Accelerometer Z standby
    pub stby_za: bool,
    /// Accelerometer Y standby
    pub stby_ya: bool,
    /// Accelerometer X standby
    pub stby_xa: bool,
    /// Low power wake-up frequency
    #[bits(2)]
    pub lp_wake_ctrl: u8,
}

/// ACCEL_CONFIG
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct AccelConfig {
    #[bits(3)]
    __: u8,
    /// Full scale range
    #[bits(2)]
    pub afs_sel: u8,
    /// Z self test
    pub za_st: bool,
    /// Y self test
    pub ya_st: bool,
    /// X self test
    pub xa_st: bool,
}

/// GYRO_CONFIG
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct GyroConfig {
    #[bits(3)]
    __: u8,
    /// Full scale range
    #[bits(2)]
    pub fs_sel: u8,
    /// Z self test
    pub zg_st: bool,
    /// Y self test
    pub yg_st: bool,
    /// X self test
    pub xg_st: bool,
}

bitflags! {
    /// Enable interrupt for:
    #[allow(non_camel_case_types)]
    pub struct InterruptEnable: u8 {
        /// FIFO overflow
        const FIFO_OFLOW_EN = 0b0001_0000;
        /// I2C master interrupt sources
        const I2C_MST_INT_EN = 0b0000_1000;
        /// raw sensor data ready
        const DATA_RDY_EN = 0b0000_0001;
    }
}

bitflags! {
    /// Interrupt causes latched in INT_STATUS
    #[allow(non_camel_case_types)]
    pub struct InterruptStatus: u8 {
        /// FIFO overflowed
        const FIFO_OFLOW_INT = 0b0001_0000;
        /// An I2C master interrupt source fired
        const I2C_MST_INT = 0b0000_1000;
        /// New sensor data is ready
        const DATA_RDY_INT = 0b0000_0001;
    }
}

bitflags! {
    /// Signal path reset; reverts ADCs and filters, leaves the sample
    /// registers alone
    #[allow(non_camel_case_types)]
    pub struct SignalPathReset: u8 {
        /// Gyroscope signal path
        const GYRO_RESET = 0b0000_0100;
        /// Accelerometer signal path
        const ACCEL_RESET = 0b0000_0010;
        /// Temperature sensor signal path
        const TEMP_RESET = 0b0000_0001;
    }
}

bitflags! {
    /// Per axis standby bits, laid out as in PWR_MGMT_2
    pub struct StandbyAxes: u8 {
        /// Accelerometer X
        const XA = 0b0010_0000;
        /// Accelerometer Y
        const YA = 0b0001_0000;
        /// Accelerometer Z
        const ZA = 0b0000_1000;
        /// Gyroscope X
        const XG = 0b0000_0100;
        /// Gyroscope Y
        const YG = 0b0000_0010;
        /// Gyroscope Z
        const ZG = 0b0000_0001;
        /// All accelerometer axes
        const ACCEL = Self::XA.bits | Self::YA.bits | Self::ZA.bits;
        /// All gyroscope axes
        const GYRO = Self::XG.bits | Self::YG.bits | Self::ZG.bits;
        /// Every axis
        const ALL = Self::ACCEL.bits | Self::GYRO.bits;
    }
}

impl PwrMgmt2 {
    pub(crate) fn standby(&self) -> StandbyAxes {
        StandbyAxes::from_bits_truncate(self.into_bits())
    }

    pub(crate) fn with_standby(self, axes: StandbyAxes) -> Self {
        PwrMgmt2::from_bits((self.into_bits() & !StandbyAxes::ALL.bits())
                            | axes.bits())
    }
}
