//! Terminal side of the engine.
//!
//! Organized along pure/effect boundaries:
//! - `theme`: color constants
//! - `field`, `screen`: field state and the interaction loop
//! - `render`: laid-out lines onto a surface
//! - `dialog`: message, error and confirmation boxes
//! - `surface`: the only module that touches the real terminal

pub mod dialog;
pub mod field;
pub mod render;
pub mod screen;
pub mod surface;
pub mod theme;

pub use field::Response;
pub use screen::Screen;
pub use surface::{CrosstermSurface, Surface};
