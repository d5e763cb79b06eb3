//! Engine boundary
//!
//! The engine owns the grid, event dispatch, sprites, images, audio and
//! timers. `Host` is the slice of it this crate calls; `Game` is the set of
//! lifecycle hooks the engine calls back into.
//!
//! Everything runs on one logical thread: the engine delivers one event at a
//! time and a hook never blocks. The only way to be called again later is a
//! timer.

pub mod headless;
pub mod runner;

pub use headless::{Bead, HeadlessHost, ImageLoad, PaintWrite, SpriteState};
pub use runner::Runner;

use serde::{Deserialize, Serialize};

use crate::GridPoint;
use crate::sim::{PlaneId, Rgb, line_points};

/// Handle returned by `Host::timer_start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u32);

/// Handle for a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(pub u32);

/// Handle for a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// Keys the toy reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    /// Anything the toy does not bind
    Other,
}

/// Key event payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
        }
    }
}

/// Primitives the engine provides.
///
/// Coordinates are unsigned: callers bounds-check before calling (see
/// `sim::Surface`). Bead writes go to the plane last selected with
/// `grid_plane`.
pub trait Host {
    /// Resize the grid. Called once during `Game::init`.
    fn grid_size(&mut self, width: u32, height: u32);
    /// Color behind the grid
    fn grid_color(&mut self, color: Rgb);
    /// Border width of every bead
    fn border(&mut self, width: u32);

    /// Select the plane for subsequent bead writes
    fn grid_plane(&mut self, plane: PlaneId);
    fn bead_color(&mut self, x: u32, y: u32, color: Rgb);
    fn bead_alpha(&mut self, x: u32, y: u32, alpha: u8);
    /// Make every bead of the selected plane fully transparent
    fn clear_plane(&mut self);
    /// Number of addressable planes (valid ids are `0..max_planes`)
    fn max_planes(&self) -> u32;

    /// Start loading an image. Completion arrives via `Game::image_loaded` or
    /// `Game::image_failed`.
    fn image_load(&mut self, name: &str);
    fn sprite_image(&mut self, image: ImageId) -> SpriteId;
    fn sprite_move(&mut self, sprite: SpriteId, x: u32, y: u32);
    fn sprite_plane(&mut self, sprite: SpriteId, plane: PlaneId);

    /// Call `Game::timer` with the returned id every `interval` ticks
    fn timer_start(&mut self, interval: u32) -> TimerId;
    fn timer_stop(&mut self, timer: TimerId);

    /// Beads on the line between two points, endpoints included
    fn line(&self, from: GridPoint, to: GridPoint) -> Vec<GridPoint> {
        line_points(from, to)
    }

    fn audio_load(&mut self, name: &str);
    fn audio_play(&mut self, name: &str);

    /// Single line of text above the grid
    fn status_text(&mut self, text: &str);

    /// Random integer in `1..=max`
    fn random(&mut self, max: u32) -> u32;
}

/// Lifecycle hooks the engine calls.
///
/// Hooks return nothing: the engine has no recovery story for a failing
/// hook, so implementations log and carry on.
pub trait Game {
    fn init(&mut self, host: &mut dyn Host);

    fn touch(&mut self, _host: &mut dyn Host, _x: u32, _y: u32) {}
    fn release(&mut self, _host: &mut dyn Host, _x: u32, _y: u32) {}
    fn enter(&mut self, _host: &mut dyn Host, _x: u32, _y: u32) {}
    fn exit(&mut self, _host: &mut dyn Host, _x: u32, _y: u32) {}
    /// Pointer left the grid entirely
    fn exit_grid(&mut self, _host: &mut dyn Host) {}

    fn key_down(&mut self, _host: &mut dyn Host, _event: KeyEvent) {}
    fn key_up(&mut self, _host: &mut dyn Host, _event: KeyEvent) {}

    /// A timer started with `Host::timer_start` fired
    fn timer(&mut self, _host: &mut dyn Host, _timer: TimerId) {}

    fn image_loaded(&mut self, _host: &mut dyn Host, _name: &str, _image: ImageId) {}
    fn image_failed(&mut self, _host: &mut dyn Host, name: &str) {
        log::warn!("Image {name} failed to load");
    }
}
