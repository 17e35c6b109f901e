//! # Dot Bitmap
//!
//! In-memory model of a flip-dot panel: a fixed `width × height` grid of dot
//! states, where `true` means the dot shows its bright side.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────► x (column, 0..width)
//!   │
//!   │  ● ○ ○ ● ...
//!   │  ○ ● ○ ● ...
//!   ▼
//!   y (row, 0..height)
//! ```
//!
//! Coordinates are signed so animation code can move sprites past the edges
//! without special-casing: [`Bitmap::set`] ignores (and logs) anything that
//! lands outside the grid.

use std::fmt;

use log::warn;

use crate::error::PanelError;
use crate::protocol::frame::unpack_column;

/// Largest dot count a bitmap may hold
pub const MAX_DOTS: usize = i32::MAX as usize;

/// Grid of dot states, stored column by column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Bitmap {
    /// Create a bitmap with every dot off.
    ///
    /// Both dimensions must be positive, and the dot count must stay within
    /// [`MAX_DOTS`] so every dot is reachable with `i32` coordinates.
    pub fn new(width: usize, height: usize) -> Result<Self, PanelError> {
        let dots = width
            .checked_mul(height)
            .filter(|&dots| dots > 0 && dots <= MAX_DOTS)
            .ok_or(PanelError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![false; dots],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(x * self.height + y)
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> PanelError {
        PanelError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// State of the dot at `(x, y)`. Dots outside the grid read as off.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// State of the dot at `(x, y)` as `0` or `1`.
    pub fn get_bit(&self, x: i32, y: i32) -> u8 {
        u8::from(self.get(x, y))
    }

    /// Strict read: fails instead of reporting off for outside coordinates.
    pub fn try_get(&self, x: i32, y: i32) -> Result<bool, PanelError> {
        self.index(x, y)
            .map(|i| self.cells[i])
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Set the dot at `(x, y)`.
    ///
    /// Outside coordinates are skipped with a warning; nothing is changed.
    pub fn set(&mut self, x: i32, y: i32, state: bool) {
        if let Err(e) = self.try_set(x, y, state) {
            warn!("Skipping set: {}", e);
        }
    }

    /// Strict write: reports outside coordinates instead of skipping them.
    pub fn try_set(&mut self, x: i32, y: i32, state: bool) -> Result<(), PanelError> {
        let i = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.cells[i] = state;
        Ok(())
    }

    /// Set every dot to `state`.
    pub fn clear(&mut self, state: bool) {
        self.cells.fill(state);
    }

    /// The dots of column `x`, top row first.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width`.
    pub fn column(&self, x: usize) -> &[bool] {
        let start = x * self.height;
        &self.cells[start..start + self.height]
    }

    /// Mutable view of column `x`, top row first.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width`.
    pub fn column_mut(&mut self, x: usize) -> &mut [bool] {
        let start = x * self.height;
        &mut self.cells[start..start + self.height]
    }

    /// Iterate over the columns, left to right.
    pub fn columns(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.height)
    }

    /// Load packed column bytes (the payload format) into the bitmap.
    ///
    /// Byte `i` fills column `i`, row 0 taken from the highest used bit.
    /// Extra bytes are ignored; columns without a byte are left untouched.
    pub fn fill_columns(&mut self, bytes: &[u8]) {
        let height = self.height;
        for (column, &byte) in self.cells.chunks_mut(height).zip(bytes) {
            column.copy_from_slice(&unpack_column(byte, height));
        }
    }

    /// Text rendering with the default dot glyphs.
    pub fn render(&self) -> Render<'_> {
        Render::new(self, Glyphs::DOTS)
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render().fmt(f)
    }
}

// ============================================================================
// TEXT RENDERING
// ============================================================================

/// Characters used for lit and unlit dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub on: &'static str,
    pub off: &'static str,
}

impl Glyphs {
    /// Black and white circles, as the console shows them.
    pub const DOTS: Self = Self {
        on: "⚫️",
        off: "⚪️",
    };

    /// Plain ASCII for terminals without emoji.
    pub const ASCII: Self = Self { on: "#", off: "." };
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::DOTS
    }
}

/// Row-major text view of a [`Bitmap`].
///
/// Nothing is formatted until [`Render::lines`] is iterated or the value is
/// displayed, and both can be repeated.
#[derive(Debug, Clone, Copy)]
pub struct Render<'a> {
    bitmap: &'a Bitmap,
    glyphs: Glyphs,
}

impl<'a> Render<'a> {
    pub fn new(bitmap: &'a Bitmap, glyphs: Glyphs) -> Self {
        Self { bitmap, glyphs }
    }

    /// Same bitmap, different glyphs.
    pub fn with_glyphs(self, glyphs: Glyphs) -> Self {
        Self { glyphs, ..self }
    }

    /// One string per row, top to bottom.
    pub fn lines(self) -> impl Iterator<Item = String> + 'a {
        let bitmap = self.bitmap;
        let glyphs = self.glyphs;
        (0..bitmap.height).map(move |y| {
            (0..bitmap.width)
                .map(|x| {
                    if bitmap.cells[x * bitmap.height + y] {
                        glyphs.on
                    } else {
                        glyphs.off
                    }
                })
                .collect()
        })
    }
}

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
