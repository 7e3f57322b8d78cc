//! Transport seam and error types
//!
//! Defines the interface to the bus that carries commands and pixel data
//! to the controller, and the errors drawing and controller operations
//! report.

/// Errors from frame buffer and rasterizer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawError {
    /// Coordinate or cursor position outside the buffer geometry
    OutOfRange,
    /// Bitmap asset header or pixel data is truncated
    InvalidBitmap,
}

/// Errors from display controller operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Coordinate or cursor position outside the buffer geometry
    OutOfRange,
    /// Bitmap asset header or pixel data is truncated
    InvalidBitmap,
    /// Width or page count unsupported by the frame buffer
    InvalidGeometry,
    /// The underlying bus operation failed
    Transport(E),
}

impl<E> From<DrawError> for DisplayError<E> {
    fn from(e: DrawError) -> Self {
        match e {
            DrawError::OutOfRange => DisplayError::OutOfRange,
            DrawError::InvalidBitmap => DisplayError::InvalidBitmap,
        }
    }
}

/// Command/data transport to the display controller
///
/// The driver never opens, configures or closes the bus; it only issues
/// command bytes and data streams in order. Implementations must keep
/// every transfer in the order it was issued.
pub trait DisplayTransport {
    /// Error type for bus operations
    type Error;

    /// Send a single command byte
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send a block of display RAM data as one logical transfer
    fn send_data_stream(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for &mut T {
    type Error = T::Error;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        (**self).send_command(command)
    }

    fn send_data_stream(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).send_data_stream(data)
    }
}
