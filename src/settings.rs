//! Toy settings
//!
//! Loaded from JSON (LocalStorage on web). Every field has a default, so a
//! partial document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::PondError;
use crate::sim::{FloorPalette, Grid, RippleConfig, Rgb};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    pub grid_width: u32,
    pub grid_height: u32,
    /// Color around and behind the beads
    pub grid_color: Rgb,
    /// Bead border width (0 = borderless)
    pub border: u32,

    // === Ripples ===
    pub ripple: RippleConfig,

    // === Sprite path ===
    /// Ticks between sprite steps
    pub path_interval: u32,
    /// Path points advanced per step
    pub path_stride: usize,
    /// Retarget the sprite whenever the pointer enters a bead
    pub follow_pointer: bool,

    // === Visuals ===
    pub hover_color: Rgb,
    pub floor: FloorPalette,

    // === Sprite ===
    /// Image loaded for the sprite; `None` disables it
    pub sprite_image: Option<String>,
    pub sprite_start: (i32, i32),

    // === Audio ===
    /// Preloaded at init and played in rotation on touch
    pub touch_sounds: Vec<String>,
    pub muted: bool,

    // === Status line ===
    pub welcome_text: String,
    pub touch_text: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            grid_color: Rgb::new(170, 170, 240),
            border: 0,

            ripple: RippleConfig::default(),

            path_interval: PATH_TICK_INTERVAL,
            path_stride: PATH_STRIDE,
            follow_pointer: true,

            hover_color: Rgb::new(255, 230, 140),
            floor: FloorPalette::default(),

            sprite_image: Some("fish.png".to_string()),
            sprite_start: SPRITE_START,

            touch_sounds: vec!["fx_drip1".to_string(), "fx_drip2".to_string()],
            muted: false,

            welcome_text: "Tap the screen to create ripples!".to_string(),
            touch_text: "Bloop!".to_string(),
        }
    }
}

impl Settings {
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, PondError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, PondError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the toy cannot run with
    pub fn validate(&self) -> Result<(), PondError> {
        let fail = |msg: String| Err(PondError::InvalidConfig(msg));

        if self.grid_width == 0 || self.grid_height == 0 {
            return fail(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }
        let planes = u64::from(RIPPLE_PLANE_BASE.0)
            + u64::from(self.grid_width) * u64::from(self.grid_height);
        let longest = self.grid_width.max(self.grid_height);
        if planes > u64::from(u32::MAX) || longest > i32::MAX as u32 {
            return fail(format!(
                "grid {}x{} needs more planes than can be numbered",
                self.grid_width, self.grid_height
            ));
        }
        if self.ripple.max_radius == 0 {
            return fail("ripple.max_radius must be at least 1".to_string());
        }
        if self.ripple.interval == 0 || self.path_interval == 0 {
            return fail("timer intervals must be at least 1 tick".to_string());
        }
        if self.path_stride == 0 {
            return fail("path_stride must be at least 1".to_string());
        }
        for (name, range) in [
            ("red", self.floor.red),
            ("green", self.floor.green),
            ("blue", self.floor.blue),
        ] {
            if range.max_value() > 255 {
                return fail(format!("floor.{name} reaches {}", range.max_value()));
            }
        }
        let (sx, sy) = self.sprite_start;
        if !self.grid().contains(crate::point(sx, sy)) {
            return fail(format!("sprite_start ({sx}, {sy}) is outside the grid"));
        }
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "bead_ripples_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
