//! Bead Ripples - touch-driven ripples on a layered bead grid
//!
//! Core modules:
//! - `sim`: Deterministic raster core (circle rasterizer, planes, ripples, path follower)
//! - `host`: The engine boundary (`Host` primitives, `Game` hooks, headless backend)
//! - `toy`: The ripple toy itself, wiring the sim into the lifecycle hooks
//! - `settings`: Serializable configuration

pub mod error;
pub mod host;
pub mod settings;
pub mod sim;
pub mod toy;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::PondError;
pub use host::{Game, Host};
pub use settings::Settings;
pub use toy::RippleToy;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    use crate::sim::PlaneId;

    /// Grid dimensions (beads)
    pub const GRID_WIDTH: u32 = 32;
    pub const GRID_HEIGHT: u32 = 32;

    /// Engine timer rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Static ocean floor
    pub const FLOOR_PLANE: PlaneId = PlaneId(0);
    /// Hover highlight overlay
    pub const HOVER_PLANE: PlaneId = PlaneId(1);
    /// Plane the fish sprite is drawn on
    pub const ACTOR_PLANE: PlaneId = PlaneId(2);
    /// First plane handed out to ripples (`base + x + width * y`)
    pub const RIPPLE_PLANE_BASE: PlaneId = PlaneId(3);

    /// Ripples stop growing at this radius
    pub const MAX_RIPPLE_RADIUS: u32 = 45;
    /// Ripple timer interval (ticks per ring)
    pub const RIPPLE_TICK_INTERVAL: u32 = 1;
    /// Path timer interval (6 ticks = 1/10 sec)
    pub const PATH_TICK_INTERVAL: u32 = 6;
    /// Points advanced per path tick
    pub const PATH_STRIDE: usize = 1;

    /// Cell the sprite appears on once its image loads
    pub const SPRITE_START: (i32, i32) = (3, 3);
}

/// Integer bead coordinate. Signed so rasterizers can produce off-grid points.
pub type GridPoint = IVec2;

/// Shorthand constructor for a grid point
#[inline]
pub fn point(x: i32, y: i32) -> GridPoint {
    IVec2::new(x, y)
}
