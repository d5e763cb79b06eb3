//! Event loop over the headless host
//!
//! Plays the engine's role: forwards pointer and key events to the `Game`
//! hooks, and on every tick resolves image loads and fires due timers.

use super::headless::{HeadlessHost, ImageLoad};
use super::{Game, KeyEvent};

pub struct Runner<G: Game> {
    host: HeadlessHost,
    game: G,
}

impl<G: Game> Runner<G> {
    /// Take ownership of both sides and call `Game::init`
    pub fn new(mut host: HeadlessHost, mut game: G) -> Self {
        game.init(&mut host);
        Self { host, game }
    }

    pub fn host(&self) -> &HeadlessHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut HeadlessHost {
        &mut self.host
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn touch(&mut self, x: u32, y: u32) {
        self.game.touch(&mut self.host, x, y);
    }

    pub fn release(&mut self, x: u32, y: u32) {
        self.game.release(&mut self.host, x, y);
    }

    pub fn enter(&mut self, x: u32, y: u32) {
        self.game.enter(&mut self.host, x, y);
    }

    pub fn exit(&mut self, x: u32, y: u32) {
        self.game.exit(&mut self.host, x, y);
    }

    pub fn exit_grid(&mut self) {
        self.game.exit_grid(&mut self.host);
    }

    pub fn key_down(&mut self, event: KeyEvent) {
        self.game.key_down(&mut self.host, event);
    }

    pub fn key_up(&mut self, event: KeyEvent) {
        self.game.key_up(&mut self.host, event);
    }

    /// Run one engine tick
    pub fn tick(&mut self) {
        for load in self.host.take_image_loads() {
            match load {
                ImageLoad::Loaded { name, image } => {
                    self.game.image_loaded(&mut self.host, &name, image);
                }
                ImageLoad::Failed { name } => self.game.image_failed(&mut self.host, &name),
            }
        }

        for timer in self.host.fire_due_timers() {
            // A callback earlier in this tick may have stopped it
            if self.host.timer_active(timer) {
                self.game.timer(&mut self.host, timer);
            }
        }
    }

    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Hand back the host and game
    pub fn into_parts(self) -> (HeadlessHost, G) {
        (self.host, self.game)
    }
}
