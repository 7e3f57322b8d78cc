//! I2C transport
//!
//! Frames commands and display data with the SSD1306 control byte:
//!
//! - `0x80` (Co=1, D/C#=0): a single command byte follows
//! - `0x40` (Co=0, D/C#=1): every following byte is display RAM data

use monodot_hal::I2cBus;

use crate::backend::DisplayTransport;

/// Default 7-bit address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte announcing one command byte
pub const CONTROL_COMMAND: u8 = 0x80;

/// Control byte announcing a data stream
pub const CONTROL_DATA_STREAM: u8 = 0x40;

/// Display transport over an I2C bus
pub struct I2cTransport<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> I2cTransport<B> {
    /// Create a transport for the device at `address`
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> DisplayTransport for I2cTransport<B> {
    type Error = B::Error;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.bus.write(self.address, &[CONTROL_COMMAND, command])
    }

    fn send_data_stream(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus
            .write_prefixed(self.address, &[CONTROL_DATA_STREAM], data)
    }
}
