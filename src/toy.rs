//! The ripple toy
//!
//! Session state for one run: the ripple controller, the sprite's path
//! follower, and the bits of UI state the hooks share. The engine only ever
//! talks to it through `Game`.

use crate::consts::{ACTOR_PLANE, FLOOR_PLANE, HOVER_PLANE};
use crate::error::PondError;
use crate::host::{Game, Host, ImageId, Key, KeyEvent, SpriteId, TimerId};
use crate::settings::Settings;
use crate::sim::{Grid, Paint, PathFollower, RippleController, RippleStyle, Surface, draw_floor};
use crate::{GridPoint, point};

pub struct RippleToy {
    settings: Settings,
    grid: Grid,
    ripples: RippleController,
    actor: PathFollower,
    sprite: Option<SpriteId>,
    path_timer: Option<TimerId>,
    /// Next entry of `touch_sounds` to play
    next_sound: usize,
    hovered: Option<GridPoint>,
}

impl Default for RippleToy {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl RippleToy {
    pub fn new(settings: Settings) -> Self {
        let grid = settings.grid();
        let (sx, sy) = settings.sprite_start;
        Self {
            ripples: RippleController::new(grid, settings.ripple),
            actor: PathFollower::new(point(sx, sy)).with_stride(settings.path_stride),
            grid,
            settings,
            sprite: None,
            path_timer: None,
            next_sound: 0,
            hovered: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ripples(&self) -> &RippleController {
        &self.ripples
    }

    pub fn actor(&self) -> &PathFollower {
        &self.actor
    }

    pub fn sprite(&self) -> Option<SpriteId> {
        self.sprite
    }

    pub fn ripple_style(&self) -> RippleStyle {
        self.ripples.config().style
    }

    pub fn follow_pointer(&self) -> bool {
        self.settings.follow_pointer
    }

    fn cell(&self, x: u32, y: u32) -> Option<GridPoint> {
        let cell = point(x as i32, y as i32);
        self.grid.contains(cell).then_some(cell)
    }

    fn play_touch_sound(&mut self, host: &mut dyn Host) {
        if self.settings.muted || self.settings.touch_sounds.is_empty() {
            return;
        }
        let index = self.next_sound % self.settings.touch_sounds.len();
        self.next_sound = index + 1;
        if let Some(name) = self.settings.touch_sounds.get(index) {
            host.audio_play(name);
        }
    }

    fn set_hover(&mut self, host: &mut dyn Host, cell: GridPoint, on: bool) {
        let mut surface = Surface::new(self.grid, host);
        let result = if on {
            surface.paint(cell, HOVER_PLANE, Paint::opaque(self.settings.hover_color))
        } else {
            surface.clear(cell, HOVER_PLANE)
        };
        if let Err(e) = result {
            log::warn!("Hover highlight skipped: {e}");
            return;
        }
        self.hovered = if on { Some(cell) } else { self.hovered.filter(|&h| h != cell) };
    }

    /// Point the sprite at `target`. Ignored until the sprite exists.
    fn retarget(&mut self, host: &mut dyn Host, target: GridPoint) {
        if self.sprite.is_none() {
            return;
        }
        if let Err(e) = self.grid.check(target) {
            log::debug!("Sprite target ignored: {e}");
            return;
        }
        match self.actor.set_target(host, target) {
            Ok(steps) => log::debug!(
                "Sprite heading to ({}, {}), {steps} steps",
                target.x,
                target.y
            ),
            Err(PondError::InvalidPath { .. }) => {}
            Err(e) => log::warn!("Sprite path rejected: {e}"),
        }
    }

    fn step_actor(&mut self, host: &mut dyn Host) {
        let Some(pos) = self.actor.advance() else {
            return;
        };
        if let Some(sprite) = self.sprite {
            host.sprite_move(sprite, pos.x as u32, pos.y as u32);
        }
    }
}

impl Game for RippleToy {
    fn init(&mut self, host: &mut dyn Host) {
        host.grid_size(self.grid.width, self.grid.height);
        host.border(self.settings.border);
        host.grid_color(self.settings.grid_color);

        if let Err(e) = draw_floor(host, self.grid, FLOOR_PLANE, &self.settings.floor) {
            log::warn!("Ocean floor not drawn: {e}");
        }

        host.status_text(&self.settings.welcome_text);
        for sound in &self.settings.touch_sounds {
            host.audio_load(sound);
        }
        if let Some(image) = &self.settings.sprite_image {
            host.image_load(image);
        }

        let highest = self.grid.last_ripple_plane();
        if highest.0 >= host.max_planes() {
            log::warn!(
                "Host has {} planes; beads needing plane {} and up cannot ripple",
                host.max_planes(),
                highest.0
            );
        }

        self.path_timer = Some(host.timer_start(self.settings.path_interval));
        log::info!(
            "Ripple toy ready: {}x{} grid, max radius {}, {:?} ripples",
            self.grid.width,
            self.grid.height,
            self.settings.ripple.max_radius,
            self.settings.ripple.style
        );
    }

    fn touch(&mut self, host: &mut dyn Host, x: u32, y: u32) {
        let Some(cell) = self.cell(x, y) else {
            log::warn!("Touch outside the grid at ({x}, {y})");
            return;
        };

        host.status_text(&self.settings.touch_text);
        self.play_touch_sound(host);

        match self.ripples.start(host, cell) {
            Ok(start) => log::trace!("Touch at ({x}, {y}) rippling on plane {}", start.plane().0),
            Err(e @ PondError::PlaneExhausted { .. }) => log::debug!("Ripple not started: {e}"),
            Err(e) => log::warn!("Ripple not started: {e}"),
        }
    }

    fn release(&mut self, host: &mut dyn Host, x: u32, y: u32) {
        if let Some(cell) = self.cell(x, y) {
            self.set_hover(host, cell, false);
        }
    }

    fn enter(&mut self, host: &mut dyn Host, x: u32, y: u32) {
        let Some(cell) = self.cell(x, y) else {
            return;
        };
        self.set_hover(host, cell, true);
        if self.settings.follow_pointer {
            self.retarget(host, cell);
        }
    }

    fn exit(&mut self, host: &mut dyn Host, x: u32, y: u32) {
        if let Some(cell) = self.cell(x, y) {
            self.set_hover(host, cell, false);
        }
    }

    fn exit_grid(&mut self, host: &mut dyn Host) {
        if let Some(cell) = self.hovered {
            self.set_hover(host, cell, false);
        }
    }

    fn key_down(&mut self, host: &mut dyn Host, event: KeyEvent) {
        let nudge = match event.key {
            Key::ArrowUp => Some(point(0, -1)),
            Key::ArrowDown => Some(point(0, 1)),
            Key::ArrowLeft => Some(point(-1, 0)),
            Key::ArrowRight => Some(point(1, 0)),
            _ => None,
        };
        if let Some(offset) = nudge {
            self.retarget(host, self.actor.position() + offset);
            return;
        }

        match event.key {
            Key::Space => {
                let style = self.ripple_style().toggled();
                self.ripples.set_style(style);
                self.settings.ripple.style = style;
                host.status_text(match style {
                    RippleStyle::Trail => "Ripples leave a trail",
                    RippleStyle::SingleRing => "Ripples show one ring",
                });
            }
            Key::Char('f' | 'F') => {
                self.settings.follow_pointer = !self.settings.follow_pointer;
                host.status_text(if self.settings.follow_pointer {
                    "The fish follows you"
                } else {
                    "The fish stays put"
                });
            }
            Key::Escape => {
                self.actor.cancel();
                host.status_text("The fish stops");
            }
            Key::Char('m' | 'M') => {
                self.settings.muted = !self.settings.muted;
            }
            Key::Char(c @ '1'..='9') => {
                let stride = c.to_digit(10).unwrap_or(1) as usize;
                self.actor.set_stride(stride);
                self.settings.path_stride = stride;
                host.status_text(&format!("Fish speed {stride}"));
            }
            _ => {}
        }
    }

    fn timer(&mut self, host: &mut dyn Host, timer: TimerId) {
        if Some(timer) == self.path_timer {
            self.step_actor(host);
            return;
        }
        if self.ripples.on_timer(host, timer).is_none() {
            log::warn!("Timer {} has no owner", timer.0);
        }
    }

    fn image_loaded(&mut self, host: &mut dyn Host, name: &str, image: ImageId) {
        if self.settings.sprite_image.as_deref() != Some(name) {
            return;
        }
        let sprite = host.sprite_image(image);
        host.sprite_plane(sprite, ACTOR_PLANE);
        let (sx, sy) = self.settings.sprite_start;
        let start = point(sx, sy);
        host.sprite_move(sprite, start.x as u32, start.y as u32);
        self.actor.teleport(start);
        self.sprite = Some(sprite);
        log::info!("Sprite {name} placed at ({sx}, {sy})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessHost, Runner};
    use crate::sim::{PlaneId, Rgb};

    fn runner(settings: Settings) -> Runner<RippleToy> {
        Runner::new(HeadlessHost::new(2024), RippleToy::new(settings))
    }

    #[test]
    fn test_init_sets_up_grid_floor_and_assets() {
        let mut r = runner(Settings::default());
        let host = r.host();
        assert_eq!((host.width(), host.height()), (32, 32));
        assert_eq!(host.border_width(), 0);
        assert_eq!(host.background(), Rgb::new(170, 170, 240));
        assert_eq!(host.status(), "Tap the screen to create ripples!");
        assert!(host.sound_loaded("fx_drip1"));
        assert!(host.sound_loaded("fx_drip2"));
        let floor = r.game().settings().floor;
        assert!(floor.contains(host.composite(0, 0)));
        assert!(floor.contains(host.composite(31, 31)));

        // Image resolves on the first tick
        r.tick();
        let sprite = r.game().sprite().unwrap();
        let state = r.host().sprite(sprite).unwrap();
        assert_eq!(state.position, Some((3, 3)));
        assert_eq!(state.plane, ACTOR_PLANE);
    }

    #[test]
    fn test_touch_ripples_and_plays_sounds() {
        let mut r = runner(Settings::default());
        r.touch(5, 5);
        assert_eq!(r.host().status(), "Bloop!");
        assert_eq!(r.host().played_sounds(), ["fx_drip1".to_string()]);
        assert!(r.game().ripples().ripple_at(point(5, 5)).is_some());

        r.touch(20, 20);
        assert_eq!(r.host().played_sounds().len(), 2);
        assert_eq!(r.host().played_sounds()[1], "fx_drip2");

        // Rings show up in the composited frame
        r.advance(4);
        assert_eq!(r.host().composite(8, 5), Rgb::WHITE);

        r.advance(45);
        assert_eq!(r.game().ripples().active_count(), 0);
        // Only the path timer is left
        assert_eq!(r.host().active_timer_count(), 1);
        let floor = r.game().settings().floor;
        assert!(floor.contains(r.host().composite(8, 5)));
    }

    #[test]
    fn test_hover_highlight_on_enter_and_exit() {
        let mut r = runner(Settings::default());
        r.enter(12, 9);
        let bead = r.host().bead(HOVER_PLANE, 12, 9).unwrap();
        assert_eq!(bead.alpha, 255);
        r.exit(12, 9);
        assert_eq!(r.host().bead(HOVER_PLANE, 12, 9).map(|b| b.alpha), Some(0));

        r.enter(1, 1);
        r.release(1, 1);
        assert_eq!(r.host().bead(HOVER_PLANE, 1, 1).map(|b| b.alpha), Some(0));

        r.enter(2, 2);
        r.exit_grid();
        assert_eq!(r.host().bead(HOVER_PLANE, 2, 2).map(|b| b.alpha), Some(0));
    }

    #[test]
    fn test_sprite_follows_pointer() {
        let mut r = runner(Settings::default());
        r.tick();
        r.enter(10, 3);
        assert!(!r.game().actor().is_idle());
        r.advance(60);
        let sprite = r.game().sprite().unwrap();
        assert_eq!(r.host().sprite(sprite).unwrap().position, Some((10, 3)));
        assert_eq!(r.game().actor().position(), point(10, 3));
        assert!(r.game().actor().is_idle());
    }

    #[test]
    fn test_enter_before_sprite_loads_is_ignored() {
        let mut r = runner(Settings::default());
        r.enter(10, 3);
        assert!(r.game().actor().is_idle());
    }

    #[test]
    fn test_keys_toggle_style_follow_and_stride() {
        let mut r = runner(Settings::default());
        r.tick();
        r.key_down(KeyEvent::new(Key::Space));
        assert_eq!(r.game().ripple_style(), RippleStyle::SingleRing);
        r.key_down(KeyEvent::new(Key::Space));
        assert_eq!(r.game().ripple_style(), RippleStyle::Trail);

        r.key_down(KeyEvent::new(Key::Char('f')));
        assert!(!r.game().follow_pointer());
        r.enter(20, 20);
        assert!(r.game().actor().is_idle());

        r.key_down(KeyEvent::new(Key::Char('3')));
        assert_eq!(r.game().actor().stride(), 3);

        r.key_down(KeyEvent::new(Key::ArrowRight));
        assert_eq!(r.game().actor().path().map(<[GridPoint]>::len), Some(2));
        r.advance(6);
        assert_eq!(r.game().actor().position(), point(4, 3));
    }

    #[test]
    fn test_escape_stops_the_fish() {
        let mut r = runner(Settings::default());
        r.tick();
        r.enter(20, 3);
        r.advance(12);
        let stopped_at = r.game().actor().position();
        assert_ne!(stopped_at, point(20, 3));

        r.key_down(KeyEvent::new(Key::Escape));
        assert!(r.game().actor().is_idle());
        r.advance(30);
        assert_eq!(r.game().actor().position(), stopped_at);
    }

    #[test]
    fn test_long_session_keeps_host_state_bounded() {
        let mut r = runner(Settings::default());
        for i in 0..20 {
            r.touch(i, 31 - i);
            r.advance(50);
        }
        assert_eq!(r.game().ripples().active_count(), 0);
        assert_eq!(r.host().active_timer_count(), 1);
        assert!(r.host().paint_log().is_empty());
        assert_eq!(r.host_mut().take_played_sounds().len(), 20);
        assert!(r.host().played_sounds().is_empty());
    }

    #[test]
    fn test_muted_touch_is_silent() {
        let mut r = runner(Settings::default());
        r.key_down(KeyEvent::new(Key::Char('m')));
        r.touch(3, 3);
        assert!(r.host().played_sounds().is_empty());
        assert!(r.game().ripples().ripple_at(point(3, 3)).is_some());
    }

    #[test]
    fn test_plane_exhaustion_degrades_to_no_ripple() {
        let host = HeadlessHost::new(1).with_max_planes(64);
        let mut r = Runner::new(host, RippleToy::default());
        r.touch(31, 31);
        assert_eq!(r.game().ripples().active_count(), 0);
        assert_eq!(r.host().status(), "Bloop!");
        r.touch(0, 0);
        assert_eq!(r.game().ripples().active_count(), 1);
        assert_eq!(r.game().ripples().ripple_at(point(0, 0)).map(|s| s.plane), Some(PlaneId(3)));
    }

    #[test]
    fn test_touch_outside_grid_is_ignored() {
        let mut r = runner(Settings::default());
        r.touch(40, 2);
        assert_eq!(r.game().ripples().active_count(), 0);
        assert!(r.host().played_sounds().is_empty());
        assert_eq!(r.host().rejected_writes(), 0);
    }

    #[test]
    fn test_missing_sprite_image_leaves_toy_running() {
        let host = HeadlessHost::new(3).with_missing_image("fish.png");
        let mut r = Runner::new(host, RippleToy::default());
        r.tick();
        assert!(r.game().sprite().is_none());
        r.touch(4, 4);
        r.advance(50);
        assert_eq!(r.game().ripples().active_count(), 0);
    }
}
