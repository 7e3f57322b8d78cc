//! Monochrome bitmap assets
//!
//! Reads 1-bpp images stored in the legacy Windows bitmap container. Only
//! the fields the blitter needs are parsed, at their fixed offsets:
//!
//! | Offset | Size | Field                              |
//! |--------|------|------------------------------------|
//! | 18     | 4    | columns (little-endian u32)        |
//! | 22     | 4    | rows (little-endian u32)           |
//! | 62     | -    | pixel rows, each padded to 32 bits |
//!
//! Pixels are packed MSB first. Row 0 of the data is the bottom row of the
//! image, which is why the blitter flips vertically.

use crate::backend::DrawError;

/// Offset of the column count
pub const COLUMNS_OFFSET: usize = 18;

/// Offset of the row count
pub const ROWS_OFFSET: usize = 22;

/// Offset of the first pixel byte
pub const PIXEL_DATA_OFFSET: usize = 62;

/// Parsed view over a bitmap asset
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    columns: usize,
    rows: usize,
    padded_columns: usize,
    pixels: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// Parse a bitmap asset
    ///
    /// Fails with `InvalidBitmap` when the header or the pixel rows it
    /// announces are not all present.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, DrawError> {
        let columns = read_u32_le(bytes, COLUMNS_OFFSET)? as usize;
        let rows = read_u32_le(bytes, ROWS_OFFSET)? as usize;
        let pixels = bytes
            .get(PIXEL_DATA_OFFSET..)
            .ok_or(DrawError::InvalidBitmap)?;

        let padded_columns = columns
            .checked_add(31)
            .map(|c| c / 32 * 32)
            .ok_or(DrawError::InvalidBitmap)?;
        let needed = rows
            .checked_mul(padded_columns)
            .map(|bits| bits / 8)
            .ok_or(DrawError::InvalidBitmap)?;
        if pixels.len() < needed {
            return Err(DrawError::InvalidBitmap);
        }

        Ok(Self {
            columns,
            rows,
            padded_columns,
            pixels,
        })
    }

    /// Image width in pixels
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Image height in pixels
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row stride in bits
    pub fn padded_columns(&self) -> usize {
        self.padded_columns
    }

    /// Bit at column `x` of stored row `row`
    pub fn bit(&self, x: usize, row: usize) -> bool {
        if x >= self.columns || row >= self.rows {
            return false;
        }
        let bit = row * self.padded_columns + x;
        self.pixels
            .get(bit / 8)
            .is_some_and(|&byte| (byte >> (7 - (bit % 8))) & 1 != 0)
    }
}

fn read_u32_le(bytes: &[u8], offset: usize) -> Result<u32, DrawError> {
    let field = bytes
        .get(offset..offset + 4)
        .ok_or(DrawError::InvalidBitmap)?;
    Ok(u32::from_le_bytes([field[0], field[1], field[2], field[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Asset with a zeroed header and the given pixel rows
    fn asset<const N: usize>(columns: u32, rows: u32, pixels: [u8; N]) -> [u8; 128] {
        let mut bytes = [0u8; 128];
        bytes[0] = b'B';
        bytes[1] = b'M';
        bytes[COLUMNS_OFFSET..COLUMNS_OFFSET + 4].copy_from_slice(&columns.to_le_bytes());
        bytes[ROWS_OFFSET..ROWS_OFFSET + 4].copy_from_slice(&rows.to_le_bytes());
        bytes[PIXEL_DATA_OFFSET..PIXEL_DATA_OFFSET + N].copy_from_slice(&pixels);
        bytes
    }

    #[test]
    fn test_parse_header() {
        let bytes = asset(10, 3, [0u8; 12]);
        let bmp = Bitmap::parse(&bytes).unwrap();

        assert_eq!(bmp.columns(), 10);
        assert_eq!(bmp.rows(), 3);
        assert_eq!(bmp.padded_columns(), 32);
    }

    #[test]
    fn test_padding_to_32_bits() {
        let bytes = asset(33, 1, [0u8; 8]);
        assert_eq!(Bitmap::parse(&bytes).unwrap().padded_columns(), 64);

        let bytes = asset(32, 1, [0u8; 4]);
        assert_eq!(Bitmap::parse(&bytes).unwrap().padded_columns(), 32);
    }

    #[test]
    fn test_msb_first_bits() {
        // Row 0: 1000_0001, row 1 (next 32-bit word): 0100_0000
        let bytes = asset(8, 2, [0x81, 0, 0, 0, 0x40, 0, 0, 0]);
        let bmp = Bitmap::parse(&bytes).unwrap();

        assert!(bmp.bit(0, 0));
        assert!(!bmp.bit(1, 0));
        assert!(bmp.bit(7, 0));
        assert!(bmp.bit(1, 1));
        assert!(!bmp.bit(0, 1));
        // Outside the image
        assert!(!bmp.bit(8, 0));
        assert!(!bmp.bit(0, 2));
    }

    #[test]
    fn test_truncated_header() {
        assert_eq!(Bitmap::parse(&[0u8; 20]).unwrap_err(), DrawError::InvalidBitmap);
        assert_eq!(Bitmap::parse(&[0u8; 61]).unwrap_err(), DrawError::InvalidBitmap);
    }

    #[test]
    fn test_truncated_pixels() {
        let bytes = asset(64, 8, [0u8; 0]);
        // 8 rows of 8 bytes each
        assert_eq!(
            Bitmap::parse(&bytes[..PIXEL_DATA_OFFSET + 63]).unwrap_err(),
            DrawError::InvalidBitmap
        );
        assert!(Bitmap::parse(&bytes[..PIXEL_DATA_OFFSET + 64]).is_ok());
    }

    #[test]
    fn test_huge_dimensions_rejected() {
        let bytes = asset(u32::MAX, u32::MAX, [0u8; 0]);
        assert_eq!(Bitmap::parse(&bytes).unwrap_err(), DrawError::InvalidBitmap);
    }
}
