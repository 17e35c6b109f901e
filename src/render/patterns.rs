//! # Test Patterns
//!
//! Simple dot patterns for checking a board: every dot flipping, addressing,
//! column order and row order.
//!
//! ## Adding a New Pattern
//!
//! 1. Add a struct implementing [`Pattern`]
//! 2. Add its name to [`PATTERNS`] and a match arm to [`by_name`]

use crate::panel::Bitmap;

/// All available patterns, in display order.
pub const PATTERNS: &[&str] = &[
    "fill", "clear", "checker", "stripes", "border", "diagonal", "random",
];

/// Trait for pattern generators.
pub trait Pattern {
    /// Pattern name (lowercase, e.g., "checker").
    fn name(&self) -> &'static str;

    /// Whether the dot at `(x, y)` is on for a `width × height` board.
    fn dot(&self, x: usize, y: usize, width: usize, height: usize) -> bool;
}

/// List all available pattern names.
pub fn list_patterns() -> &'static [&'static str] {
    PATTERNS
}

/// Get a pattern by name.
pub fn by_name(name: &str) -> Option<Box<dyn Pattern>> {
    match name.to_lowercase().as_str() {
        "fill" | "on" => Some(Box::new(Fill(true))),
        "clear" | "off" => Some(Box::new(Fill(false))),
        "checker" => Some(Box::new(Checker)),
        "stripes" => Some(Box::new(Stripes::default())),
        "border" => Some(Box::new(Border)),
        "diagonal" => Some(Box::new(Diagonal)),
        "random" => Some(Box::new(Random::default())),
        _ => None,
    }
}

/// Paint `pattern` over the whole bitmap.
pub fn draw(pattern: &dyn Pattern, bitmap: &mut Bitmap) {
    let (width, height) = (bitmap.width(), bitmap.height());
    for x in 0..width {
        for (y, dot) in bitmap.column_mut(x).iter_mut().enumerate() {
            *dot = pattern.dot(x, y, width, height);
        }
    }
}

/// Every dot the same.
#[derive(Debug, Clone, Copy)]
pub struct Fill(pub bool);

impl Pattern for Fill {
    fn name(&self) -> &'static str {
        if self.0 { "fill" } else { "clear" }
    }

    fn dot(&self, _x: usize, _y: usize, _width: usize, _height: usize) -> bool {
        self.0
    }
}

/// Alternating dots, top-left on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checker;

impl Pattern for Checker {
    fn name(&self) -> &'static str {
        "checker"
    }

    fn dot(&self, x: usize, y: usize, _width: usize, _height: usize) -> bool {
        (x + y) % 2 == 0
    }
}

/// Vertical bars, `period` columns apart.
#[derive(Debug, Clone, Copy)]
pub struct Stripes {
    pub period: usize,
}

impl Default for Stripes {
    fn default() -> Self {
        Self { period: 2 }
    }
}

impl Pattern for Stripes {
    fn name(&self) -> &'static str {
        "stripes"
    }

    fn dot(&self, x: usize, _y: usize, _width: usize, _height: usize) -> bool {
        x % self.period.max(1) == 0
    }
}

/// One-dot frame around the edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Border;

impl Pattern for Border {
    fn name(&self) -> &'static str {
        "border"
    }

    fn dot(&self, x: usize, y: usize, width: usize, height: usize) -> bool {
        x == 0 || y == 0 || x + 1 == width || y + 1 == height
    }
}

/// Diagonal lines rising to the right, one per `height` columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagonal;

impl Pattern for Diagonal {
    fn name(&self) -> &'static str {
        "diagonal"
    }

    fn dot(&self, x: usize, y: usize, _width: usize, height: usize) -> bool {
        x % height == height - 1 - y
    }
}

/// Dots on with probability `density`.
#[derive(Debug, Clone, Copy)]
pub struct Random {
    pub density: f32,
}

impl Default for Random {
    fn default() -> Self {
        Self { density: 0.5 }
    }
}

impl Pattern for Random {
    fn name(&self) -> &'static str {
        "random"
    }

    fn dot(&self, _x: usize, _y: usize, _width: usize, _height: usize) -> bool {
        rand::random::<f32>() < self.density
    }
}

// ============================================================================
// TESTS
// ============================================================================
