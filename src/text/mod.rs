//! Display-width-aware text primitives.

pub mod columns;
pub mod fit;
pub mod width;

pub use columns::{column_width, distribute};
pub use fit::{Align, ELLIPSIS, fit, fit_with_ellipsis};
pub use width::{char_width, display_width};
