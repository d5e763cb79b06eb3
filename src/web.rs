//! Browser binding
//!
//! The page owns the canvas, the fish image and the audio elements. It
//! forwards pointer/key events here, calls `tick` 60 times a second, and
//! paints whatever `frame` returns.

use wasm_bindgen::prelude::*;

use crate::host::{HeadlessHost, Key, KeyEvent, Runner};
use crate::settings::Settings;
use crate::toy::RippleToy;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

/// Map a `KeyboardEvent.key` value
fn parse_key(key: &str) -> Key {
    match key {
        " " | "Spacebar" => Key::Space,
        "ArrowUp" => Key::ArrowUp,
        "ArrowDown" => Key::ArrowDown,
        "ArrowLeft" => Key::ArrowLeft,
        "ArrowRight" => Key::ArrowRight,
        "Escape" => Key::Escape,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => Key::Other,
            }
        }
    }
}

#[wasm_bindgen]
pub struct WebPond {
    runner: Runner<RippleToy>,
}

#[wasm_bindgen]
impl WebPond {
    /// Seeded from the clock, settings from LocalStorage
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebPond {
        Self::with_seed(js_sys::Date::now() as u32)
    }

    pub fn with_seed(seed: u32) -> WebPond {
        let settings = Settings::load();
        log::info!("Starting bead ripples with seed {seed}");
        let runner = Runner::new(HeadlessHost::new(u64::from(seed)), RippleToy::new(settings));
        WebPond { runner }
    }

    pub fn width(&self) -> u32 {
        self.runner.host().width()
    }

    pub fn height(&self) -> u32 {
        self.runner.host().height()
    }

    pub fn touch(&mut self, x: u32, y: u32) {
        self.runner.touch(x, y);
    }

    pub fn release(&mut self, x: u32, y: u32) {
        self.runner.release(x, y);
    }

    pub fn enter(&mut self, x: u32, y: u32) {
        self.runner.enter(x, y);
    }

    pub fn exit(&mut self, x: u32, y: u32) {
        self.runner.exit(x, y);
    }

    pub fn exit_grid(&mut self) {
        self.runner.exit_grid();
    }

    pub fn key_down(&mut self, key: &str, shift: bool, ctrl: bool) {
        self.runner.key_down(KeyEvent {
            key: parse_key(key),
            shift,
            ctrl,
        });
    }

    pub fn tick(&mut self) {
        self.runner.tick();
    }

    /// Composited beads, row-major, as 0xRRGGBB
    pub fn frame(&self) -> Vec<u32> {
        self.runner.host().frame().into_iter().map(|c| c.to_u32()).collect()
    }

    pub fn status(&self) -> String {
        self.runner.host().status().to_string()
    }

    /// `[x, y]` of the fish, or empty before it has loaded
    pub fn sprite_position(&self) -> Vec<u32> {
        self.runner
            .game()
            .sprite()
            .and_then(|id| self.runner.host().sprite(id))
            .and_then(|s| s.position)
            .map(|(x, y)| vec![x, y])
            .unwrap_or_default()
    }

    /// Sounds requested since the last call, for the page to play
    pub fn drain_sounds(&mut self) -> Vec<String> {
        self.runner.host_mut().take_played_sounds()
    }

    /// Persist the current settings (ripple style, stride, follow, mute)
    pub fn save_settings(&self) {
        self.runner.game().settings().save();
    }
}

impl Default for WebPond {
    fn default() -> Self {
        Self::new()
    }
}
