//! Deterministic raster core
//!
//! Everything that decides what gets painted lives here:
//! - Integer-only geometry (midpoint circles, Bresenham lines)
//! - Plane-scoped, bounds-checked writes through the `Host`
//! - Ripple and path state advanced only by timer ticks
//! - Randomness only through the host

pub mod background;
pub mod circle;
pub mod grid;
pub mod line;
pub mod path;
pub mod ripple;
pub mod surface;

pub use background::{ChannelRange, FloorPalette, draw_floor};
pub use circle::{circle_outline, octant, outline_points, rasterize_circle_outline};
pub use grid::{Grid, PlaneId, Rgb};
pub use line::line_points;
pub use path::PathFollower;
pub use ripple::{RippleConfig, RippleController, RippleStart, RippleState, RippleStep, RippleStyle};
pub use surface::{Paint, Surface};
