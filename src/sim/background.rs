//! Procedural ocean floor for plane 0

use serde::{Deserialize, Serialize};

use super::grid::{Grid, PlaneId, Rgb};
use super::surface::{Paint, Surface};
use crate::error::PondError;
use crate::host::Host;

/// One color channel: `base + (random(spread) - 1)`, i.e. `base..base + spread`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub base: u8,
    pub spread: u8,
}

impl ChannelRange {
    pub const fn new(base: u8, spread: u8) -> Self {
        Self { base, spread }
    }

    /// Largest value this range can produce
    pub fn max_value(&self) -> u32 {
        u32::from(self.base) + u32::from(self.spread.max(1)) - 1
    }

    fn sample(&self, host: &mut dyn Host) -> u8 {
        let offset = host.random(u32::from(self.spread.max(1))).saturating_sub(1);
        (u32::from(self.base) + offset).min(255) as u8
    }
}

/// Per-channel ranges of the floor palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorPalette {
    pub red: ChannelRange,
    pub green: ChannelRange,
    pub blue: ChannelRange,
}

impl Default for FloorPalette {
    fn default() -> Self {
        Self {
            red: ChannelRange::new(150, 30),
            green: ChannelRange::new(180, 30),
            blue: ChannelRange::new(224, 32),
        }
    }
}

impl FloorPalette {
    pub fn sample(&self, host: &mut dyn Host) -> Rgb {
        let r = self.red.sample(host);
        let g = self.green.sample(host);
        let b = self.blue.sample(host);
        Rgb::new(r, g, b)
    }

    pub fn contains(&self, color: Rgb) -> bool {
        let within = |range: &ChannelRange, v: u8| {
            u32::from(v) >= u32::from(range.base) && u32::from(v) <= range.max_value()
        };
        within(&self.red, color.r) && within(&self.green, color.g) && within(&self.blue, color.b)
    }
}

/// Paint every bead of `plane` with a random floor color, row by row
pub fn draw_floor(
    host: &mut dyn Host,
    grid: Grid,
    plane: PlaneId,
    palette: &FloorPalette,
) -> Result<(), PondError> {
    Surface::new(grid, host).fill(plane, |_, host| Paint::opaque(palette.sample(host)))?;
    log::debug!("Ocean floor drawn on plane {} ({} beads)", plane.0, grid.len());
    Ok(())
}
