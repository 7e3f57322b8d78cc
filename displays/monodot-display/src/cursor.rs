//! Text cursor
//!
//! Tracks where the next glyph goes as a (column, page) pair. The pair
//! always maps onto a frame buffer index `x + page * width`, and advancing
//! works on that linear index so a column overflow carries into the next
//! page the same way the controller's horizontal addressing does.

use crate::backend::DrawError;
use crate::config::Geometry;

/// Text write position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    geometry: Geometry,
    /// Column (0..width-1 after normalisation)
    x: usize,
    /// Page (0..page_count-1 in normal use)
    page: usize,
}

impl Cursor {
    /// Create a cursor at the top-left corner
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            x: 0,
            page: 0,
        }
    }

    /// Move to column `x` of `page`
    ///
    /// Not validated: positions come from layout code, and an invalid one
    /// surfaces as `OutOfRange` on the next draw.
    pub fn set_position(&mut self, x: usize, page: usize) {
        self.x = x;
        self.page = page;
    }

    /// Current `(column, page)`
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.page)
    }

    /// Frame buffer index of the cursor, `None` if it does not fit a `usize`
    pub fn index(&self) -> Option<usize> {
        self.page
            .checked_mul(self.width())
            .and_then(|row| row.checked_add(self.x))
    }

    /// Advance by `columns` along the linear index
    pub fn advance(&mut self, columns: usize) -> Result<(), DrawError> {
        let index = self
            .index()
            .and_then(|i| i.checked_add(columns))
            .ok_or(DrawError::OutOfRange)?;
        let width = self.width();
        self.page = index / width;
        self.x = index % width;
        Ok(())
    }

    /// Make room for a glyph of `glyph_width` columns plus its gap
    ///
    /// When the glyph would run past the last column the cursor wraps to
    /// the start of the next page. On the last page that is an error.
    /// On the page just above the last one neither happens and the glyph
    /// spills into the next page's start through the linear index.
    pub fn advance_for_glyph(&mut self, glyph_width: usize) -> Result<(), DrawError> {
        let (x, page) = self.position();
        let last_column = self.width() - 1;
        let last_page = self.geometry.last_page() as usize;

        let x_end = x
            .checked_add(glyph_width)
            .and_then(|end| end.checked_add(1))
            .ok_or(DrawError::OutOfRange)?;
        if x_end > last_column {
            if page >= last_page {
                return Err(DrawError::OutOfRange);
            } else if page + 1 < last_page {
                self.set_position(0, page + 1);
            }
        }

        Ok(())
    }

    fn width(&self) -> usize {
        // Geometry width is never zero once a frame buffer accepted it
        (self.geometry.width as usize).max(1)
    }
}
