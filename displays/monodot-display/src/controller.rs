//! Display controller
//!
//! Ties a frame buffer, a text cursor and a font to a transport, and
//! sequences the controller: initialization, display modes, and pushing
//! the frame buffer to display RAM.

use crate::backend::{DisplayError, DisplayTransport};
use crate::bitmap::Bitmap;
use crate::config::{cmd, DisplayConfig};
use crate::cursor::Cursor;
use crate::font::{Font, FONT_5X8};
use crate::framebuffer::FrameBuffer;
use crate::raster::Rasterizer;

/// SSD1306-class display driver
pub struct DisplayController<T> {
    transport: T,
    config: DisplayConfig,
    buffer: FrameBuffer,
    cursor: Cursor,
    font: Font<'static>,
}

impl<T: DisplayTransport> DisplayController<T> {
    /// Create a driver with the bundled 5x8 font
    ///
    /// Nothing is sent until [`initialize`](Self::initialize).
    pub fn new(transport: T, config: DisplayConfig) -> Result<Self, DisplayError<T::Error>> {
        Self::with_font(transport, config, FONT_5X8)
    }

    /// Create a driver with a custom font
    pub fn with_font(
        transport: T,
        config: DisplayConfig,
        font: Font<'static>,
    ) -> Result<Self, DisplayError<T::Error>> {
        let buffer = FrameBuffer::new(config.geometry).ok_or(DisplayError::InvalidGeometry)?;

        Ok(Self {
            transport,
            config,
            buffer,
            cursor: Cursor::new(config.geometry),
            font,
        })
    }

    /// Send the initialization command table
    ///
    /// Stops at the first failed command. The controller is then partially
    /// configured and the session should be considered lost.
    pub fn initialize(&mut self) -> Result<(), DisplayError<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Initializing {}x{} display",
            self.config.geometry.width,
            self.config.geometry.height()
        );

        for command in self.config.init_sequence() {
            self.command(command)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Display initialized");

        Ok(())
    }

    /// Send the whole frame buffer to display RAM
    pub fn flush(&mut self) -> Result<(), DisplayError<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Flushing {} bytes", self.buffer.len());

        self.transport
            .send_data_stream(self.buffer.as_bytes())
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::warn!("Display flush failed");
                DisplayError::Transport(e)
            })
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError<T::Error>> {
        if inverted {
            self.command(cmd::SET_INVERSE)
        } else {
            self.command(cmd::SET_NORMAL)
        }
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError<T::Error>> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)?;
        self.config.contrast = contrast;
        Ok(())
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError<T::Error>> {
        if on {
            self.command(cmd::DISPLAY_ON)
        } else {
            self.command(cmd::DISPLAY_OFF)
        }
    }

    /// Restrict display RAM writes to columns `x1..=x2` of pages
    /// `page1..=page2`
    pub fn set_window(
        &mut self,
        x1: u8,
        x2: u8,
        page1: u8,
        page2: u8,
    ) -> Result<(), DisplayError<T::Error>> {
        let g = self.config.geometry;
        if x1 > x2 || u16::from(x2) >= g.width || page1 > page2 || page2 >= g.page_count {
            return Err(DisplayError::OutOfRange);
        }

        for command in [cmd::SET_COLUMN_ADDR, x1, x2, cmd::SET_PAGE_ADDR, page1, page2] {
            self.command(command)?;
        }
        Ok(())
    }

    /// Clear the frame buffer (the screen changes on the next flush)
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Move the text cursor to column `x` of `page`
    pub fn set_position(&mut self, x: usize, page: usize) {
        self.cursor.set_position(x, page);
    }

    /// Turn on one pixel
    pub fn draw_pixel(&mut self, x: i32, y: i32) -> Result<(), DisplayError<T::Error>> {
        Ok(self.rasterizer().draw_pixel(x, y)?)
    }

    /// Draw a line, both endpoints included
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) -> Result<(), DisplayError<T::Error>> {
        Ok(self.rasterizer().draw_line(x1, y1, x2, y2)?)
    }

    /// Draw a character at the text cursor
    pub fn draw_char(&mut self, ch: char) -> Result<(), DisplayError<T::Error>> {
        let Self {
            buffer,
            cursor,
            font,
            ..
        } = self;
        Ok(Rasterizer::new(buffer).draw_glyph(ch, cursor, font)?)
    }

    /// Draw a string at the text cursor
    pub fn draw_string(&mut self, text: &str) -> Result<(), DisplayError<T::Error>> {
        let Self {
            buffer,
            cursor,
            font,
            ..
        } = self;
        Ok(Rasterizer::new(buffer).draw_string(text, cursor, font)?)
    }

    /// Parse a bitmap asset and blit it with its top-left corner just
    /// below `(x, y)`
    pub fn blit_bitmap(
        &mut self,
        x: i32,
        y: i32,
        asset: &[u8],
    ) -> Result<(), DisplayError<T::Error>> {
        let bitmap = Bitmap::parse(asset)?;
        Ok(self.rasterizer().blit_bitmap(x, y, &bitmap)?)
    }

    /// Drawing session over the frame buffer
    pub fn rasterizer(&mut self) -> Rasterizer<'_> {
        Rasterizer::new(&mut self.buffer)
    }

    /// Frame buffer
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Mutable frame buffer
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }

    /// Text cursor
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Active configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.transport
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError<T::Error>> {
        self.transport.send_command(command).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Display command {=u8:#x} failed", command);
            DisplayError::Transport(e)
        })
    }
}
