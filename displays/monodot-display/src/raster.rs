//! Rasterizer
//!
//! Integer-only drawing into a [`FrameBuffer`]: pixels, Bresenham lines,
//! axis-aligned lines and rectangles, text, and bitmap blits.
//!
//! Every operation is fail-fast and non-transactional. The first pixel that
//! falls outside the buffer aborts the call with `OutOfRange`; whatever was
//! drawn before it stays in the buffer.

use crate::backend::DrawError;
use crate::bitmap::Bitmap;
use crate::cursor::Cursor;
use crate::font::Font;
use crate::framebuffer::FrameBuffer;

/// Nibble to byte bit-doubling table
///
/// Each source bit becomes two adjacent output bits, so a 4-bit half of a
/// glyph column fills a whole page byte: glyphs come out twice as tall.
const NIBBLE_DOUBLE: [u8; 16] = [
    0x00, // 0000 -> 0000 0000
    0x03, // 0001 -> 0000 0011
    0x0C, // 0010 -> 0000 1100
    0x0F, // 0011 -> 0000 1111
    0x30, // 0100 -> 0011 0000
    0x33, // 0101 -> 0011 0011
    0x3C, // 0110 -> 0011 1100
    0x3F, // 0111 -> 0011 1111
    0xC0, // 1000 -> 1100 0000
    0xC3, // 1001 -> 1100 0011
    0xCC, // 1010 -> 1100 1100
    0xCF, // 1011 -> 1100 1111
    0xF0, // 1100 -> 1111 0000
    0xF3, // 1101 -> 1111 0011
    0xFC, // 1110 -> 1111 1100
    0xFF, // 1111 -> 1111 1111
];

/// Drawing session over a frame buffer
pub struct Rasterizer<'a> {
    fb: &'a mut FrameBuffer,
}

impl<'a> Rasterizer<'a> {
    /// Start drawing into `fb`
    pub fn new(fb: &'a mut FrameBuffer) -> Self {
        Self { fb }
    }

    /// Turn on the pixel at `(x, y)`
    pub fn draw_pixel(&mut self, x: i32, y: i32) -> Result<(), DrawError> {
        self.fb.or_bit(x, y)
    }

    /// Draw a line between two points, both endpoints included
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), DrawError> {
        let (mut x, mut y) = (x1, y1);
        let sx = if x2 < x1 { -1 } else { 1 };
        let sy = if y2 < y1 { -1 } else { 1 };
        // Widened so the decision variable cannot overflow
        let dx = (i64::from(x2) - i64::from(x1)).abs();
        let dy = (i64::from(y2) - i64::from(y1)).abs();

        self.draw_pixel(x, y)?;

        if dy < dx {
            // Shallow: one pixel per column
            let mut d = 2 * dy - dx;
            while x != x2 {
                x += sx;
                if d >= 0 {
                    y += sy;
                    d -= 2 * dx;
                }
                d += 2 * dy;
                self.draw_pixel(x, y)?;
            }
        } else {
            // Steep: one pixel per row
            let mut d = dy - 2 * dx;
            while y != y2 {
                y += sy;
                if d <= 0 {
                    x += sx;
                    d += 2 * dy;
                }
                d -= 2 * dx;
                self.draw_pixel(x, y)?;
            }
        }

        Ok(())
    }

    /// Horizontal line of `len` pixels starting at `(x, y)`
    pub fn draw_hline(&mut self, x: i32, y: i32, len: u32) -> Result<(), DrawError> {
        if len == 0 {
            return Ok(());
        }
        self.draw_line(x, y, x.saturating_add(span(len)), y)
    }

    /// Vertical line of `len` pixels starting at `(x, y)`
    pub fn draw_vline(&mut self, x: i32, y: i32, len: u32) -> Result<(), DrawError> {
        if len == 0 {
            return Ok(());
        }
        self.draw_line(x, y, x, y.saturating_add(span(len)))
    }

    /// Rectangle outline with its top-left corner at `(x, y)`
    pub fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) -> Result<(), DrawError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let right = x.saturating_add(span(width));
        let bottom = y.saturating_add(span(height));

        self.draw_hline(x, y, width)?;
        self.draw_hline(x, bottom, width)?;
        self.draw_vline(x, y, height)?;
        self.draw_vline(right, y, height)
    }

    /// Filled rectangle with its top-left corner at `(x, y)`
    pub fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) -> Result<(), DrawError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        for row in 0..height.min(i32::MAX as u32) as i32 {
            self.draw_hline(x, y.saturating_add(row), width)?;
        }
        Ok(())
    }

    /// Draw one character at the cursor and advance it
    ///
    /// Glyph columns are split into nibbles and each nibble is stretched
    /// to a full byte: the low nibble lands in the cursor's page, the high
    /// nibble in the page below.
    pub fn draw_glyph(
        &mut self,
        ch: char,
        cursor: &mut Cursor,
        font: &Font<'_>,
    ) -> Result<(), DrawError> {
        let glyph_width = font.glyph_width();
        cursor.advance_for_glyph(glyph_width)?;

        let glyph = font.glyph(ch);
        let width = self.fb.width();

        // The high nibble of the last column is the furthest write
        let start = cursor.index().ok_or(DrawError::OutOfRange)?;
        let furthest = start
            .checked_add(glyph.len().saturating_sub(1))
            .and_then(|i| i.checked_add(width))
            .ok_or(DrawError::OutOfRange)?;
        if !glyph.is_empty() && furthest >= self.fb.len() {
            return Err(DrawError::OutOfRange);
        }

        for (i, &column) in glyph.iter().enumerate() {
            let index = start + i;
            self.fb
                .raw_index_write(index, NIBBLE_DOUBLE[(column & 0x0F) as usize])?;
            self.fb
                .raw_index_write(index + width, NIBBLE_DOUBLE[(column >> 4) as usize])?;
        }

        // One column per glyph column plus the inter-character gap
        cursor.advance(glyph.len() + 1)
    }

    /// Draw a string at the cursor, stopping at the first failing character
    pub fn draw_string(
        &mut self,
        text: &str,
        cursor: &mut Cursor,
        font: &Font<'_>,
    ) -> Result<(), DrawError> {
        for ch in text.chars() {
            self.draw_glyph(ch, cursor, font)?;
        }
        Ok(())
    }

    /// Copy the set pixels of a bitmap into the buffer
    ///
    /// Stored row `y` is drawn at `origin_y + rows - y`, so the image
    /// occupies rows `origin_y + 1 ..= origin_y + rows`. Unset bits leave
    /// the buffer untouched.
    pub fn blit_bitmap(
        &mut self,
        origin_x: i32,
        origin_y: i32,
        bitmap: &Bitmap<'_>,
    ) -> Result<(), DrawError> {
        let rows = bitmap.rows();
        for y in 0..rows {
            for x in 0..bitmap.columns() {
                if bitmap.bit(x, y) {
                    let px = offset(origin_x, x)?;
                    let py = offset(origin_y, rows - y)?;
                    self.draw_pixel(px, py)?;
                }
            }
        }
        Ok(())
    }
}

/// Distance from the first to the last pixel of a `len` pixel run
fn span(len: u32) -> i32 {
    len.saturating_sub(1).min(i32::MAX as u32) as i32
}

/// `origin + delta`, with anything unrepresentable reported as off-screen
fn offset(origin: i32, delta: usize) -> Result<i32, DrawError> {
    i32::try_from(delta)
        .ok()
        .and_then(|d| origin.checked_add(d))
        .ok_or(DrawError::OutOfRange)
}
