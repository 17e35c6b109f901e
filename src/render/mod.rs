//! # Rendering Module
//!
//! Tools for putting content on a [`Bitmap`](crate::panel::Bitmap).
//!
//! ## Modules
//!
//! - [`patterns`]: Built-in test patterns (fill, checker, stripes, ...)
//!
//! ## Usage Example
//!
//! ```
//! use flipdot_panel::panel::Bitmap;
//! use flipdot_panel::render::patterns;
//!
//! let mut bitmap = Bitmap::new(28, 7).unwrap();
//! let checker = patterns::by_name("checker").unwrap();
//! patterns::draw(checker.as_ref(), &mut bitmap);
//! assert!(bitmap.get(0, 0));
//! assert!(!bitmap.get(1, 0));
//! ```

pub mod patterns;
