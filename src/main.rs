//! Bead Ripples entry point
//!
//! Native: runs a short scripted session on the headless host and prints the
//! grid as text. Web: the page drives `web::WebPond`; nothing runs here.

#[cfg(not(target_arch = "wasm32"))]
use bead_ripples::{
    RippleToy, Settings,
    consts::TICKS_PER_SECOND,
    host::{HeadlessHost, Runner},
};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bead Ripples (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => load_settings(&path),
        None => Settings::load(),
    };
    let ripple_color = settings.ripple.color;

    let mut runner = Runner::new(HeadlessHost::new(0x5eed), RippleToy::new(settings));
    runner.tick();

    runner.touch(8, 8);
    runner.touch(22, 14);
    runner.enter(20, 20);
    runner.advance(9);
    print_frame(&runner, ripple_color);

    runner.touch(8, 8);
    runner.advance(TICKS_PER_SECOND);
    print_frame(&runner, ripple_color);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> Settings {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| Settings::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(settings) => {
            log::info!("Loaded settings from {path}");
            settings
        }
        Err(e) => {
            log::error!("Could not use {path}: {e}; falling back to defaults");
            Settings::default()
        }
    }
}

/// `F` fish, `o` ripple, `+` hover/other overlays, `~` ocean floor
#[cfg(not(target_arch = "wasm32"))]
fn print_frame(runner: &Runner<RippleToy>, ripple_color: bead_ripples::sim::Rgb) {
    let host = runner.host();
    let fish = runner
        .game()
        .sprite()
        .and_then(|id| host.sprite(id))
        .and_then(|s| s.position);
    let floor = runner.game().settings().floor;

    println!("\n[tick {}] {}", host.ticks(), host.status());
    for y in 0..host.height() {
        let row: String = (0..host.width())
            .map(|x| {
                let color = host.composite(x, y);
                if fish == Some((x, y)) {
                    'F'
                } else if color == ripple_color {
                    'o'
                } else if floor.contains(color) {
                    '~'
                } else {
                    '+'
                }
            })
            .collect();
        println!("{row}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
