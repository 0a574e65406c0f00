use hal::i2c::{self, Error as _, ErrorKind};

use crate::Register;

/// I2C address of the MPU6050, selected by the AD0 pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlaveAddress {
    /// AD0 tied to ground
    Ad0Low = 0x68,
    /// AD0 tied to VCC
    Ad0High = 0x69,
}

impl Default for SlaveAddress {
    fn default() -> Self {
        SlaveAddress::Ad0Low
    }
}

/// Outcome of a failed single-register bus transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportStatus {
    /// Another transaction owns the bus
    BusBusy,
    /// The device did not acknowledge
    Nack,
    /// Data could not be sent
    WriteFailed,
    /// Data could not be received
    ReadFailed,
}

/// Releasable describes a type that can be destroyed
/// with a released asset.
pub trait Releasable {
    /// The type to be released
    type Released;

    /// Release the underlying asset
    fn release(self) -> Self::Released;
}

/// An MPU communication device abstraction
///
/// Each call addresses exactly one register. Multi-byte values are read
/// with one call per byte.
pub trait Device: Releasable {
    /// Read a single value from the register
    fn read(&mut self, reg: Register) -> Result<u8, TransportStatus>;

    /// Write the provided value to register
    fn write(&mut self, reg: Register, val: u8) -> Result<(), TransportStatus>;

    /// Modify the value in the register using the provided closure. The closure
    /// accepts the current value of the register, permitting conditional checks
    /// before modification.
    fn modify<F>(&mut self, reg: Register, f: F) -> Result<(), TransportStatus>
        where F: FnOnce(u8) -> u8
    {
        let r = self.read(reg)?;
        self.write(reg, f(r))?;

        Ok(())
    }
}

/// An I2C device. Use I2cDevice when the
/// MPU6050 is connected via I2C
pub struct I2cDevice<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cDevice<I2C> where I2C: i2c::I2c
{
    /// Create a new I2C device at the AD0 low address (0x68)
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SlaveAddress::default())
    }

    /// Create a new I2C device at the given address
    pub fn with_address(i2c: I2C, address: SlaveAddress) -> Self {
        I2cDevice { i2c,
                    address: address as u8 }
    }
}

impl<I2C> Releasable for I2cDevice<I2C> where I2C: i2c::I2c
{
    type Released = I2C;

    fn release(self) -> I2C {
        self.i2c
    }
}

// Classifies a HAL error; `failed` is used for anything that is neither
// arbitration loss nor a missing acknowledge.
fn classify<E: i2c::Error>(error: E, failed: TransportStatus) -> TransportStatus {
    match error.kind() {
        ErrorKind::ArbitrationLoss => TransportStatus::BusBusy,
        ErrorKind::NoAcknowledge(_) => TransportStatus::Nack,
        _ => failed,
    }
}

impl<I2C> Device for I2cDevice<I2C> where I2C: i2c::I2c
{
    fn read(&mut self, reg: Register) -> Result<u8, TransportStatus> {
        let mut buffer = [0; 1];
        self.i2c
            .write_read(self.address, &[reg.addr()], &mut buffer)
            .map_err(|e| classify(e, TransportStatus::ReadFailed))?;
        Ok(buffer[0])
    }

    fn write(&mut self, reg: Register, val: u8) -> Result<(), TransportStatus> {
        self.i2c
            .write(self.address, &[reg.addr(), val])
            .map_err(|e| classify(e, TransportStatus::WriteFailed))
    }
}
