//! I2C bus abstractions
//!
//! Provides the write-side I2C master operations a display controller needs.
//! A blanket implementation covers every `embedded_hal::i2c::I2c`.

use embedded_hal::i2c::{I2c, Operation};

/// I2C bus master
///
/// Display controllers are write-only devices, so only writes are modelled.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Write a prefix followed by a payload as one transfer
    ///
    /// The bus must not issue a STOP or repeated START between `prefix` and
    /// `data`; the device sees a single write of `prefix ++ data`.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `prefix` - Leading bytes (typically a control byte)
    /// * `data` - Payload bytes
    fn write_prefixed(&mut self, address: u8, prefix: &[u8], data: &[u8])
        -> Result<(), Self::Error>;
}

impl<T> I2cBus for T
where
    T: I2c,
{
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        <T as I2c>::write(self, address, data)
    }

    fn write_prefixed(
        &mut self,
        address: u8,
        prefix: &[u8],
        data: &[u8],
    ) -> Result<(), Self::Error> {
        // Adjacent write operations are merged into one transfer
        self.transaction(address, &mut [Operation::Write(prefix), Operation::Write(data)])
    }
}
