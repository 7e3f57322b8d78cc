//! `embedded-graphics` integration
//!
//! Lets the frame buffer be used as a `DrawTarget` for the
//! `embedded-graphics` primitives, fonts and images. Pixels outside the
//! buffer are skipped, as the `DrawTarget` contract requires; use the
//! [`Rasterizer`](crate::raster::Rasterizer) for fail-fast drawing.

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;

use crate::framebuffer::FrameBuffer;

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Off-screen pixels are clipped
            let _ = match color {
                BinaryColor::On => self.or_bit(point.x, point.y),
                BinaryColor::Off => self.clear_bit(point.x, point.y),
            };
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        match color {
            BinaryColor::Off => FrameBuffer::clear(self),
            BinaryColor::On => {
                for index in 0..self.len() {
                    let _ = self.raw_index_write(index, 0xFF);
                }
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}
