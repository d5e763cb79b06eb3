//! Grid geometry, plane ids and colors

use serde::{Deserialize, Serialize};

use crate::consts::RIPPLE_PLANE_BASE;
use crate::error::PondError;
use crate::{GridPoint, point};

/// One independent raster layer. Higher planes composite over lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaneId(pub u32);

/// 24-bit bead color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed as 0xRRGGBB
    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Blend `self` over `below` with the given opacity
    pub fn over(self, below: Rgb, alpha: u8) -> Rgb {
        let a = u16::from(alpha);
        let mix = |top: u8, bottom: u8| -> u8 {
            ((u16::from(top) * a + u16::from(bottom) * (255 - a) + 127) / 255) as u8
        };
        Rgb::new(mix(self.r, below.r), mix(self.g, below.g), mix(self.b, below.b))
    }
}

/// Fixed-size bead grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total bead count
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, p: GridPoint) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    /// Validate a coordinate and convert it to the host's unsigned form
    pub fn check(&self, p: GridPoint) -> Result<(u32, u32), PondError> {
        if self.contains(p) {
            Ok((p.x as u32, p.y as u32))
        } else {
            Err(PondError::OutOfBounds { x: p.x, y: p.y })
        }
    }

    /// Plane owned by a ripple centered on `cell`.
    ///
    /// `RIPPLE_PLANE_BASE + x + width * y`: one plane per bead, so ripples on
    /// distinct beads never share paint state. Two touches on the same bead
    /// land on the same plane, which is how a re-touch finds the ripple it
    /// restarts. The caller validates `cell` first.
    pub fn ripple_plane(&self, cell: GridPoint) -> PlaneId {
        PlaneId(RIPPLE_PLANE_BASE.0 + cell.x as u32 + self.width * cell.y as u32)
    }

    /// Highest plane id `ripple_plane` can return for this grid
    pub fn last_ripple_plane(&self) -> PlaneId {
        PlaneId(RIPPLE_PLANE_BASE.0 + (self.len() as u32).saturating_sub(1))
    }

    /// Every bead, row by row
    pub fn cells(&self) -> impl Iterator<Item = GridPoint> + use<> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| point(x, y)))
    }

    /// Row-major index of an in-bounds bead
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
