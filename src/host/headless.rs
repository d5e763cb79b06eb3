//! In-memory host
//!
//! Backs the native binary, the wasm build and the tests. Keeps per-plane
//! bead storage, a tick-driven timer table, sprites, and logs of everything
//! the game asked for so callers can inspect it.

use std::collections::{BTreeMap, BTreeSet};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Host, ImageId, SpriteId, TimerId};
use crate::sim::{PlaneId, Rgb};

/// Engine default before `grid_size` is called
pub const DEFAULT_GRID_SIZE: u32 = 8;
/// Planes addressable unless overridden with `with_max_planes`
pub const DEFAULT_MAX_PLANES: u32 = 4096;

/// One bead on one plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bead {
    pub color: Rgb,
    pub alpha: u8,
}

/// A bead write that reached the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintWrite {
    pub plane: PlaneId,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteState {
    pub image: ImageId,
    /// `None` until first moved
    pub position: Option<(u32, u32)>,
    pub plane: PlaneId,
}

/// Result of an image request, handed back by `take_image_loads`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLoad {
    Loaded { name: String, image: ImageId },
    Failed { name: String },
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    interval: u32,
    countdown: u32,
}

pub struct HeadlessHost {
    width: u32,
    height: u32,
    grid_color: Rgb,
    border: u32,
    current_plane: PlaneId,
    planes: BTreeMap<PlaneId, Vec<Bead>>,
    max_planes: u32,
    /// Registration order is firing order
    timers: Vec<Timer>,
    next_timer: u32,
    timers_started: usize,
    ticks: u64,
    pending_images: Vec<String>,
    missing_images: BTreeSet<String>,
    images: Vec<String>,
    sprites: Vec<SpriteState>,
    loaded_sounds: BTreeSet<String>,
    played_sounds: Vec<String>,
    status: String,
    rng: Pcg32,
    /// Only recorded when enabled with `with_paint_log`
    paint_log: Option<Vec<PaintWrite>>,
    rejected_writes: usize,
}

impl HeadlessHost {
    pub fn new(seed: u64) -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            grid_color: Rgb::WHITE,
            border: 1,
            current_plane: PlaneId(0),
            planes: BTreeMap::new(),
            max_planes: DEFAULT_MAX_PLANES,
            timers: Vec::new(),
            next_timer: 1,
            timers_started: 0,
            ticks: 0,
            pending_images: Vec::new(),
            missing_images: BTreeSet::new(),
            images: Vec::new(),
            sprites: Vec::new(),
            loaded_sounds: BTreeSet::new(),
            played_sounds: Vec::new(),
            status: String::new(),
            rng: Pcg32::seed_from_u64(seed),
            paint_log: None,
            rejected_writes: 0,
        }
    }

    pub fn with_max_planes(mut self, max_planes: u32) -> Self {
        self.max_planes = max_planes;
        self
    }

    /// Record every bead write that reaches a plane
    pub fn with_paint_log(mut self) -> Self {
        self.paint_log = Some(Vec::new());
        self
    }

    /// Requests for `name` will fail instead of loading
    pub fn with_missing_image(mut self, name: &str) -> Self {
        self.missing_images.insert(name.to_string());
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Rgb {
        self.grid_color
    }

    pub fn border_width(&self) -> u32 {
        self.border
    }

    /// Engine ticks elapsed
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// A plane that was never written reads as the engine default
    pub fn bead(&self, plane: PlaneId, x: u32, y: u32) -> Option<Bead> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let beads = self.planes.get(&plane)?;
        beads.get(self.index(x, y)).copied()
    }

    /// Final color of a bead with every plane blended bottom-up
    pub fn composite(&self, x: u32, y: u32) -> Rgb {
        let index = self.index(x, y);
        self.planes
            .values()
            .filter_map(|beads| beads.get(index))
            .fold(self.grid_color, |below, bead| bead.color.over(below, bead.alpha))
    }

    /// Composited grid, row-major
    pub fn frame(&self) -> Vec<Rgb> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.composite(x, y));
            }
        }
        out
    }

    /// Empty unless the log was enabled
    pub fn paint_log(&self) -> &[PaintWrite] {
        self.paint_log.as_deref().unwrap_or_default()
    }

    pub fn take_paint_log(&mut self) -> Vec<PaintWrite> {
        self.paint_log.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Writes dropped because they addressed a bead or plane that does not exist
    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes
    }

    pub fn active_timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn timer_active(&self, timer: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == timer)
    }

    /// Timers ever started
    pub fn timers_started(&self) -> usize {
        self.timers_started
    }

    /// Advance one engine tick and return the timers due, in registration order
    pub fn fire_due_timers(&mut self) -> Vec<TimerId> {
        self.ticks += 1;
        let mut due = Vec::new();
        for timer in &mut self.timers {
            timer.countdown = timer.countdown.saturating_sub(1);
            if timer.countdown == 0 {
                timer.countdown = timer.interval;
                due.push(timer.id);
            }
        }
        due
    }

    /// Resolve every outstanding `image_load`
    pub fn take_image_loads(&mut self) -> Vec<ImageLoad> {
        let pending = std::mem::take(&mut self.pending_images);
        pending
            .into_iter()
            .map(|name| {
                if self.missing_images.contains(&name) {
                    ImageLoad::Failed { name }
                } else {
                    let image = ImageId(self.images.len() as u32);
                    self.images.push(name.clone());
                    ImageLoad::Loaded { name, image }
                }
            })
            .collect()
    }

    pub fn sprite(&self, sprite: SpriteId) -> Option<&SpriteState> {
        self.sprites.get(sprite.0 as usize)
    }

    pub fn sprites(&self) -> &[SpriteState] {
        &self.sprites
    }

    pub fn sound_loaded(&self, name: &str) -> bool {
        self.loaded_sounds.contains(name)
    }

    pub fn played_sounds(&self) -> &[String] {
        &self.played_sounds
    }

    pub fn take_played_sounds(&mut self) -> Vec<String> {
        std::mem::take(&mut self.played_sounds)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn blank_plane(&self, plane: PlaneId) -> Vec<Bead> {
        // The floor starts opaque, everything above it transparent
        let alpha = if plane.0 == 0 { 255 } else { 0 };
        vec![
            Bead {
                color: Rgb::WHITE,
                alpha
            };
            self.width as usize * self.height as usize
        ]
    }

    /// Bead slot for a write on the current plane, or `None` if it must be dropped
    fn writable(&mut self, x: u32, y: u32) -> Option<&mut Bead> {
        let plane = self.current_plane;
        if x >= self.width || y >= self.height || plane.0 >= self.max_planes {
            self.rejected_writes += 1;
            log::warn!("Dropped write to bead ({x}, {y}) on plane {}", plane.0);
            return None;
        }
        if let Some(writes) = self.paint_log.as_mut() {
            writes.push(PaintWrite { plane, x, y });
        }
        let index = self.index(x, y);
        if !self.planes.contains_key(&plane) {
            let blank = self.blank_plane(plane);
            self.planes.insert(plane, blank);
        }
        self.planes.get_mut(&plane).and_then(|beads| beads.get_mut(index))
    }
}

impl Host for HeadlessHost {
    fn grid_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.planes.clear();
        log::info!("Grid resized to {}x{}", self.width, self.height);
    }

    fn grid_color(&mut self, color: Rgb) {
        self.grid_color = color;
    }

    fn border(&mut self, width: u32) {
        self.border = width;
    }

    fn grid_plane(&mut self, plane: PlaneId) {
        self.current_plane = plane;
    }

    fn bead_color(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(bead) = self.writable(x, y) {
            bead.color = color;
        }
    }

    fn bead_alpha(&mut self, x: u32, y: u32, alpha: u8) {
        if let Some(bead) = self.writable(x, y) {
            bead.alpha = alpha;
        }
    }

    fn clear_plane(&mut self) {
        let plane = self.current_plane;
        if plane.0 >= self.max_planes {
            self.rejected_writes += 1;
            log::warn!("Dropped clear of plane {}", plane.0);
            return;
        }
        let blank = self.blank_plane(plane);
        let beads = self.planes.entry(plane).or_insert(blank);
        for bead in beads.iter_mut() {
            bead.alpha = 0;
        }
    }

    fn max_planes(&self) -> u32 {
        self.max_planes
    }

    fn image_load(&mut self, name: &str) {
        self.pending_images.push(name.to_string());
    }

    fn sprite_image(&mut self, image: ImageId) -> SpriteId {
        let id = SpriteId(self.sprites.len() as u32);
        self.sprites.push(SpriteState {
            image,
            position: None,
            plane: self.current_plane,
        });
        id
    }

    fn sprite_move(&mut self, sprite: SpriteId, x: u32, y: u32) {
        let (width, height) = (self.width, self.height);
        let Some(state) = self.sprites.get_mut(sprite.0 as usize) else {
            log::warn!("sprite_move on unknown sprite {}", sprite.0);
            return;
        };
        if x >= width || y >= height {
            self.rejected_writes += 1;
            log::warn!("Dropped sprite move to ({x}, {y})");
            return;
        }
        state.position = Some((x, y));
    }

    fn sprite_plane(&mut self, sprite: SpriteId, plane: PlaneId) {
        if let Some(state) = self.sprites.get_mut(sprite.0 as usize) {
            state.plane = plane;
        }
    }

    fn timer_start(&mut self, interval: u32) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers_started += 1;
        let interval = interval.max(1);
        self.timers.push(Timer {
            id,
            interval,
            countdown: interval,
        });
        id
    }

    fn timer_stop(&mut self, timer: TimerId) {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != timer);
        if self.timers.len() == before {
            log::warn!("timer_stop on unknown timer {}", timer.0);
        }
    }

    fn audio_load(&mut self, name: &str) {
        self.loaded_sounds.insert(name.to_string());
    }

    fn audio_play(&mut self, name: &str) {
        if !self.loaded_sounds.contains(name) {
            log::debug!("Playing {name} without preload");
        }
        self.played_sounds.push(name.to_string());
    }

    fn status_text(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn random(&mut self, max: u32) -> u32 {
        self.rng.random_range(1..=max.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_registration_order() {
        let mut host = HeadlessHost::new(0);
        let slow = host.timer_start(3);
        let fast = host.timer_start(1);
        assert_eq!(host.fire_due_timers(), vec![fast]);
        assert_eq!(host.fire_due_timers(), vec![fast]);
        assert_eq!(host.fire_due_timers(), vec![slow, fast]);

        host.timer_stop(fast);
        assert!(!host.timer_active(fast));
        assert!(host.fire_due_timers().is_empty());
        assert_eq!(host.ticks(), 4);
    }

    #[test]
    fn test_out_of_range_writes_are_dropped() {
        let mut host = HeadlessHost::new(0).with_max_planes(3).with_paint_log();
        host.grid_size(4, 4);
        host.grid_plane(PlaneId(1));
        host.bead_alpha(4, 0, 255);
        host.grid_plane(PlaneId(3));
        host.bead_alpha(0, 0, 255);
        host.clear_plane();
        assert_eq!(host.rejected_writes(), 3);
        assert!(host.paint_log().is_empty());
    }

    #[test]
    fn test_paint_log_is_opt_in() {
        let mut host = HeadlessHost::new(0);
        host.grid_size(4, 4);
        host.grid_plane(PlaneId(2));
        host.bead_alpha(1, 1, 255);
        assert!(host.paint_log().is_empty());
        assert!(host.take_paint_log().is_empty());

        let mut host = HeadlessHost::new(0).with_paint_log();
        host.grid_size(4, 4);
        host.grid_plane(PlaneId(2));
        host.bead_alpha(1, 1, 255);
        assert_eq!(host.paint_log(), [PaintWrite { plane: PlaneId(2), x: 1, y: 1 }]);
        assert_eq!(host.take_paint_log().len(), 1);
        assert!(host.paint_log().is_empty());
    }

    #[test]
    fn test_composite_blends_planes_bottom_up() {
        let mut host = HeadlessHost::new(0);
        host.grid_size(2, 2);
        host.grid_plane(PlaneId(0));
        host.bead_color(0, 0, Rgb::new(0, 0, 255));
        assert_eq!(host.composite(0, 0), Rgb::new(0, 0, 255));

        host.grid_plane(PlaneId(40));
        host.bead_color(0, 0, Rgb::WHITE);
        // Color alone does not show: upper planes start transparent
        assert_eq!(host.composite(0, 0), Rgb::new(0, 0, 255));
        host.bead_alpha(0, 0, 255);
        assert_eq!(host.composite(0, 0), Rgb::WHITE);

        host.clear_plane();
        assert_eq!(host.composite(0, 0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_random_is_bounded() {
        let mut host = HeadlessHost::new(42);
        for _ in 0..500 {
            let v = host.random(30);
            assert!((1..=30).contains(&v));
        }
        assert_eq!(host.random(0), 1);
    }

    #[test]
    fn test_image_loads_resolve_once() {
        let mut host = HeadlessHost::new(0).with_missing_image("shark.png");
        host.image_load("fish.png");
        host.image_load("shark.png");
        let loads = host.take_image_loads();
        assert_eq!(
            loads,
            vec![
                ImageLoad::Loaded {
                    name: "fish.png".to_string(),
                    image: ImageId(0)
                },
                ImageLoad::Failed {
                    name: "shark.png".to_string()
                },
            ]
        );
        assert!(host.take_image_loads().is_empty());
    }
}
