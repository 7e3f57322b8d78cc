//! Paged frame buffer
//!
//! One bit per pixel, laid out the way the controller's display RAM is:
//! each byte holds 8 vertically stacked pixels of one page, bit 0 on top.
//! Byte `x + page * width` covers column `x`, rows `page*8 ..= page*8 + 7`.

use heapless::Vec;

use crate::backend::DrawError;
use crate::config::{Geometry, MAX_BUFFER_LEN};

/// In-memory copy of the display RAM
#[derive(Clone)]
pub struct FrameBuffer {
    geometry: Geometry,
    /// `width * page_count` bytes, never resized after construction
    data: Vec<u8, MAX_BUFFER_LEN>,
}

impl FrameBuffer {
    /// Create a zeroed frame buffer
    ///
    /// Returns `None` when the geometry does not fit the controller.
    pub fn new(geometry: Geometry) -> Option<Self> {
        if !geometry.is_valid() {
            return None;
        }

        let mut data = Vec::new();
        data.resize(geometry.buffer_len(), 0).ok()?;

        Some(Self { geometry, data })
    }

    /// Geometry fixed at construction
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.geometry.width as usize
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.geometry.height() as usize
    }

    /// Buffer length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a valid geometry has at least one byte
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Set every pixel off
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Turn a pixel on, leaving the rest of its byte untouched
    ///
    /// Both axes are bounds checked, negative coordinates included.
    pub fn or_bit(&mut self, x: i32, y: i32) -> Result<(), DrawError> {
        let (index, mask) = self.locate(x, y)?;
        self.data[index] |= mask;
        Ok(())
    }

    /// Turn a pixel off
    pub fn clear_bit(&mut self, x: i32, y: i32) -> Result<(), DrawError> {
        let (index, mask) = self.locate(x, y)?;
        self.data[index] &= !mask;
        Ok(())
    }

    /// Read a pixel; anything outside the buffer reads as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match self.locate(x, y) {
            Ok((index, mask)) => self.data[index] & mask != 0,
            Err(_) => false,
        }
    }

    /// Store a whole byte at a linear index
    ///
    /// The only check is against the buffer length; callers derive the
    /// index as `x + page * width` themselves.
    pub fn raw_index_write(&mut self, index: usize, byte: u8) -> Result<(), DrawError> {
        let slot = self.data.get_mut(index).ok_or(DrawError::OutOfRange)?;
        *slot = byte;
        Ok(())
    }

    /// Byte at a linear index
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    /// Linear index of column `x` in `page`
    pub fn index_of(&self, x: usize, page: usize) -> usize {
        x + page * self.width()
    }

    /// Bytes of one page, or `None` past the last page
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        let width = self.width();
        let start = page.checked_mul(width)?;
        self.data.get(start..start + width)
    }

    /// Whole buffer in display RAM order
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Byte index and bit mask of pixel `(x, y)`
    fn locate(&self, x: i32, y: i32) -> Result<(usize, u8), DrawError> {
        if x < 0 || y < 0 {
            return Err(DrawError::OutOfRange);
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width() || y >= self.height() {
            return Err(DrawError::OutOfRange);
        }

        let page = y >> 3;
        let mask = 1u8 << (y & 7);
        Ok((self.index_of(x, page), mask))
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("geometry", &self.geometry)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> FrameBuffer {
        FrameBuffer::new(Geometry::W128_H64).unwrap()
    }

    #[test]
    fn test_new_is_zeroed() {
        let fb = buffer();
        assert_eq!(fb.len(), 1024);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rejects_invalid_geometry() {
        assert!(FrameBuffer::new(Geometry::new(0, 8)).is_none());
        assert!(FrameBuffer::new(Geometry::new(128, 9)).is_none());
        assert!(FrameBuffer::new(Geometry::new(200, 4)).is_none());
    }

    #[test]
    fn test_or_bit_paged_layout() {
        let mut fb = buffer();

        fb.or_bit(0, 0).unwrap();
        assert_eq!(fb.byte(0), Some(0x01));

        fb.or_bit(0, 7).unwrap();
        assert_eq!(fb.byte(0), Some(0x81));

        // y = 9 is page 1, bit 1
        fb.or_bit(5, 9).unwrap();
        assert_eq!(fb.byte(5 + 128), Some(0x02));

        fb.or_bit(127, 63).unwrap();
        assert_eq!(fb.byte(1023), Some(0x80));
    }

    #[test]
    fn test_or_bit_never_clears() {
        let mut fb = buffer();
        fb.raw_index_write(3, 0xF0).unwrap();
        fb.or_bit(3, 0).unwrap();
        assert_eq!(fb.byte(3), Some(0xF1));
    }

    #[test]
    fn test_or_bit_bounds() {
        let mut fb = buffer();

        assert_eq!(fb.or_bit(128, 0), Err(DrawError::OutOfRange));
        assert_eq!(fb.or_bit(0, 64), Err(DrawError::OutOfRange));
        // Either axis alone is enough to reject
        assert_eq!(fb.or_bit(500, 3), Err(DrawError::OutOfRange));
        assert_eq!(fb.or_bit(3, 500), Err(DrawError::OutOfRange));
        assert_eq!(fb.or_bit(-1, 0), Err(DrawError::OutOfRange));
        assert_eq!(fb.or_bit(0, -1), Err(DrawError::OutOfRange));
        assert_eq!(fb.or_bit(i32::MIN, i32::MAX), Err(DrawError::OutOfRange));

        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_width_is_fixed_at_construction() {
        let mut fb = FrameBuffer::new(Geometry::new(64, 4)).unwrap();

        fb.or_bit(63, 8).unwrap();
        assert_eq!(fb.byte(63 + 64), Some(0x01));
        assert_eq!(fb.or_bit(64, 0), Err(DrawError::OutOfRange));
        assert_eq!(fb.or_bit(0, 32), Err(DrawError::OutOfRange));
    }

    #[test]
    fn test_clear_bit_and_pixel() {
        let mut fb = buffer();
        fb.or_bit(10, 20).unwrap();
        assert!(fb.pixel(10, 20));

        fb.clear_bit(10, 20).unwrap();
        assert!(!fb.pixel(10, 20));
        assert!(!fb.pixel(-4, 300));
    }

    #[test]
    fn test_raw_index_write_bounds() {
        let mut fb = buffer();
        assert!(fb.raw_index_write(1023, 0xAA).is_ok());
        assert_eq!(fb.raw_index_write(1024, 0xAA), Err(DrawError::OutOfRange));
    }

    #[test]
    fn test_page_slices() {
        let mut fb = FrameBuffer::new(Geometry::W128_H32).unwrap();
        fb.or_bit(1, 24).unwrap();

        assert_eq!(fb.page(3).map(|p| p[1]), Some(0x01));
        assert!(fb.page(4).is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut fb = buffer();
        fb.or_bit(1, 1).unwrap();
        fb.or_bit(100, 50).unwrap();

        fb.clear();
        let once = fb.clone();
        fb.clear();

        assert_eq!(once.as_bytes(), fb.as_bytes());
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }
}
