//! Ripple animation controller
//!
//! One `RippleState` per touched bead, each on its own plane and driven by
//! its own host timer. Every timer id routes back through `on_timer`, which
//! advances exactly one ripple:
//!
//! - radius 0: prime (clear the plane), no ring yet
//! - radius 1..max: stamp the ring of that radius, then grow by one
//! - radius == max: stop the timer, clear the plane, forget the ripple

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::circle::rasterize_circle_outline;
use super::grid::{Grid, PlaneId, Rgb};
use super::surface::{Paint, Surface};
use crate::GridPoint;
use crate::consts::{MAX_RIPPLE_RADIUS, RIPPLE_TICK_INTERVAL};
use crate::error::PondError;
use crate::host::{Host, TimerId};

/// How earlier rings are treated when the next one is stamped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RippleStyle {
    /// Rings accumulate into a blooming trail until the ripple retires
    #[default]
    Trail,
    /// The plane is cleared before each ring, so only one ring shows
    SingleRing,
}

impl RippleStyle {
    pub fn toggled(self) -> Self {
        match self {
            RippleStyle::Trail => RippleStyle::SingleRing,
            RippleStyle::SingleRing => RippleStyle::Trail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    /// Radius at which a ripple retires
    pub max_radius: u32,
    /// Ticks between rings
    pub interval: u32,
    pub style: RippleStyle,
    pub color: Rgb,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            max_radius: MAX_RIPPLE_RADIUS,
            interval: RIPPLE_TICK_INTERVAL,
            style: RippleStyle::Trail,
            color: Rgb::WHITE,
        }
    }
}

/// A live ripple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RippleState {
    pub center: GridPoint,
    pub plane: PlaneId,
    /// Radius of the next ring; 0 means the plane has not been primed yet
    pub radius: u32,
    pub max_radius: u32,
    pub timer: TimerId,
}

/// Outcome of a touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RippleStart {
    /// Fresh ripple with a new timer
    Started { plane: PlaneId, timer: TimerId },
    /// A ripple was already growing here; its radius went back to 0
    Restarted { plane: PlaneId, timer: TimerId },
}

impl RippleStart {
    pub fn plane(&self) -> PlaneId {
        match *self {
            RippleStart::Started { plane, .. } | RippleStart::Restarted { plane, .. } => plane,
        }
    }
}

/// What one timer tick did to its ripple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RippleStep {
    pub plane: PlaneId,
    /// Ring radius handled this tick (0 = priming tick)
    pub radius: u32,
    /// Beads painted this tick
    pub painted: usize,
    /// Timer stopped and plane cleared
    pub finished: bool,
}

pub struct RippleController {
    grid: Grid,
    config: RippleConfig,
    ripples: BTreeMap<PlaneId, RippleState>,
    owners: HashMap<TimerId, PlaneId>,
}

impl RippleController {
    pub fn new(grid: Grid, config: RippleConfig) -> Self {
        Self {
            grid,
            config,
            ripples: BTreeMap::new(),
            owners: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    /// Applies to rings stamped from now on, including live ripples
    pub fn set_style(&mut self, style: RippleStyle) {
        self.config.style = style;
    }

    pub fn active_count(&self) -> usize {
        self.ripples.len()
    }

    /// Live ripples ordered by plane
    pub fn ripples(&self) -> impl Iterator<Item = &RippleState> {
        self.ripples.values()
    }

    pub fn ripple_at(&self, cell: GridPoint) -> Option<&RippleState> {
        if !self.grid.contains(cell) {
            return None;
        }
        self.ripples.get(&self.grid.ripple_plane(cell))
    }

    /// Whether `timer` drives one of our ripples
    pub fn owns(&self, timer: TimerId) -> bool {
        self.owners.contains_key(&timer)
    }

    /// Start a ripple centered on `cell`, or restart the one already there.
    ///
    /// Fails without touching the host when `cell` is off the grid or its
    /// plane is beyond the host's capacity.
    pub fn start(
        &mut self,
        host: &mut dyn Host,
        cell: GridPoint,
    ) -> Result<RippleStart, PondError> {
        self.grid.check(cell)?;
        let plane = self.grid.ripple_plane(cell);
        Surface::new(self.grid, host).check_plane(plane)?;

        if let Some(state) = self.ripples.get_mut(&plane) {
            state.radius = 0;
            let timer = state.timer;
            Surface::new(self.grid, host).clear_plane(plane)?;
            log::debug!("Ripple on plane {} restarted", plane.0);
            return Ok(RippleStart::Restarted { plane, timer });
        }

        Surface::new(self.grid, host).clear_plane(plane)?;
        let timer = host.timer_start(self.config.interval.max(1));
        self.ripples.insert(
            plane,
            RippleState {
                center: cell,
                plane,
                radius: 0,
                max_radius: self.config.max_radius,
                timer,
            },
        );
        self.owners.insert(timer, plane);
        log::debug!(
            "Ripple at ({}, {}) started on plane {} (timer {})",
            cell.x,
            cell.y,
            plane.0,
            timer.0
        );
        Ok(RippleStart::Started { plane, timer })
    }

    /// Advance the ripple driven by `timer`. `None` if the timer is not ours.
    pub fn on_timer(&mut self, host: &mut dyn Host, timer: TimerId) -> Option<RippleStep> {
        let plane = *self.owners.get(&timer)?;
        let state = self.ripples.get_mut(&plane)?;
        let style = self.config.style;
        let paint = Paint::opaque(self.config.color);

        let radius = state.radius;
        let mut painted = 0;
        if radius < state.max_radius {
            let mut surface = Surface::new(self.grid, host);
            if radius == 0 {
                surface.clear_plane(plane).ok();
            } else {
                if style == RippleStyle::SingleRing {
                    surface.clear_plane(plane).ok();
                }
                painted = rasterize_circle_outline(
                    &self.grid,
                    state.center,
                    radius,
                    plane,
                    |p, plane| {
                        surface.paint(p, plane, paint).ok();
                    },
                );
            }
            state.radius += 1;
        }

        let finished = state.radius >= state.max_radius;
        if finished {
            self.retire(host, plane);
        }

        Some(RippleStep {
            plane,
            radius,
            painted,
            finished,
        })
    }

    fn retire(&mut self, host: &mut dyn Host, plane: PlaneId) {
        let Some(state) = self.ripples.remove(&plane) else {
            return;
        };
        self.owners.remove(&state.timer);
        host.timer_stop(state.timer);
        Surface::new(self.grid, host).clear_plane(plane).ok();
        log::debug!("Ripple on plane {} done", plane.0);
    }
}
