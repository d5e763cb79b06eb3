//! Layered raster surface
//!
//! Thin guard over the host's per-plane bead storage. Holds no paint state of
//! its own; every write is bounds-checked, then forwarded to the host with the
//! target plane selected first.

use super::grid::{Grid, PlaneId, Rgb};
use crate::GridPoint;
use crate::error::PondError;
use crate::host::Host;

/// Color plus opacity for one bead on one plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: u8,
}

impl Paint {
    pub const fn opaque(color: Rgb) -> Self {
        Self { color, alpha: 255 }
    }

    pub const fn with_alpha(color: Rgb, alpha: u8) -> Self {
        Self { color, alpha }
    }
}

pub struct Surface<'a> {
    grid: Grid,
    host: &'a mut dyn Host,
}

impl<'a> Surface<'a> {
    pub fn new(grid: Grid, host: &'a mut dyn Host) -> Self {
        Self { grid, host }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Whether the host can address `plane`
    pub fn check_plane(&self, plane: PlaneId) -> Result<(), PondError> {
        let capacity = self.host.max_planes();
        if plane.0 < capacity {
            Ok(())
        } else {
            Err(PondError::PlaneExhausted { plane, capacity })
        }
    }

    pub fn paint(&mut self, p: GridPoint, plane: PlaneId, paint: Paint) -> Result<(), PondError> {
        let (x, y) = self.grid.check(p)?;
        self.check_plane(plane)?;
        self.host.grid_plane(plane);
        self.host.bead_color(x, y, paint.color);
        self.host.bead_alpha(x, y, paint.alpha);
        Ok(())
    }

    /// Make one bead transparent so lower planes show through
    pub fn clear(&mut self, p: GridPoint, plane: PlaneId) -> Result<(), PondError> {
        let (x, y) = self.grid.check(p)?;
        self.check_plane(plane)?;
        self.host.grid_plane(plane);
        self.host.bead_alpha(x, y, 0);
        Ok(())
    }

    /// Make every bead of `plane` transparent
    pub fn clear_plane(&mut self, plane: PlaneId) -> Result<(), PondError> {
        self.check_plane(plane)?;
        self.host.grid_plane(plane);
        self.host.clear_plane();
        Ok(())
    }

    /// Paint every bead of `plane`, row by row
    pub fn fill<F>(&mut self, plane: PlaneId, mut paint: F) -> Result<(), PondError>
    where
        F: FnMut(GridPoint, &mut dyn Host) -> Paint,
    {
        self.check_plane(plane)?;
        self.host.grid_plane(plane);
        for p in self.grid.cells() {
            let value = paint(p, &mut *self.host);
            let (x, y) = (p.x as u32, p.y as u32);
            self.host.bead_color(x, y, value.color);
            self.host.bead_alpha(x, y, value.alpha);
        }
        Ok(())
    }
}
