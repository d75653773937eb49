//! Layout data model and structural validation.

pub mod model;
pub mod validate;

pub use model::{
    ContentRegion, ContentRegionType, LayoutMode, Padding, Position, Size, TerminalLayout,
    TerminalSize,
};
pub use validate::{validate_layout, validate_region};
