use crate::Register;

/// Which sensor an axis belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sensor {
    /// Accelerometer
    Accel,
    /// Gyroscope
    Gyro,
}

/// A single measurement axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Accelerometer X
    AccelX = 0,
    /// Accelerometer Y
    AccelY = 1,
    /// Accelerometer Z
    AccelZ = 2,
    /// Gyroscope X
    GyroX = 3,
    /// Gyroscope Y
    GyroY = 4,
    /// Gyroscope Z
    GyroZ = 5,
}

impl Axis {
    /// Every axis, accelerometer first.
    pub const ALL: [Axis; 6] = [Axis::AccelX,
                                Axis::AccelY,
                                Axis::AccelZ,
                                Axis::GyroX,
                                Axis::GyroY,
                                Axis::GyroZ];

    /// The (low, high) output register pair of this axis.
    pub fn registers(&self) -> (Register, Register) {
        match self {
            Axis::AccelX => (Register::ACCEL_XOUT_L, Register::ACCEL_XOUT_H),
            Axis::AccelY => (Register::ACCEL_YOUT_L, Register::ACCEL_YOUT_H),
            Axis::AccelZ => (Register::ACCEL_ZOUT_L, Register::ACCEL_ZOUT_H),
            Axis::GyroX => (Register::GYRO_XOUT_L, Register::GYRO_XOUT_H),
            Axis::GyroY => (Register::GYRO_YOUT_L, Register::GYRO_YOUT_H),
            Axis::GyroZ => (Register::GYRO_ZOUT_L, Register::GYRO_ZOUT_H),
        }
    }

    /// Sensor this axis belongs to
    pub fn sensor(&self) -> Sensor {
        match self {
            Axis::AccelX | Axis::AccelY | Axis::AccelZ => Sensor::Accel,
            Axis::GyroX | Axis::GyroY | Axis::GyroZ => Sensor::Gyro,
        }
    }
}

/// Zero-input bias per axis and per full scale range, in raw counts.
///
/// Counts scale with the configured range, so each range of an axis keeps
/// its own slot. Ranges are indexed by their 2-bit register field value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Offsets {
    table: [[i16; 4]; 6],
}

impl Offsets {
    /// Offset of `axis` while the range field holds `range`. Only the two
    /// low bits of `range` are used.
    pub fn get(&self, axis: Axis, range: u8) -> i16 {
        self.table[axis as usize][usize::from(range & 0b11)]
    }

    pub(crate) fn set(&mut self, axis: Axis, range: u8, offset: i16) {
        self.table[axis as usize][usize::from(range & 0b11)] = offset;
    }

    /// Zeroes every slot
    pub fn clear(&mut self) {
        self.table = [[0; 4]; 6];
    }
}
