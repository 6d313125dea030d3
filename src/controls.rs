//! Keyboard shortcuts of the windowed runner.
//!
//! | Key | Action |
//! |-----|--------|
//! | `L` | Next layout mode |
//! | `E` | Next effect mode |
//! | `S` | Toggle stars |
//! | `U` | Toggle sun |
//! | `A` | Toggle audio reactivity |
//! | `V` | Toggle variable speed |
//! | `Up` / `Down` | More / fewer streams |
//! | `Right` / `Left` | Faster / slower flow |
//!
//! Shortcuts never edit the running configuration in place: they build the
//! next snapshot, which the runner hands to the following tick.

use crate::config::Config;
use crate::input::{Input, KeyCode};

const SPEED_STEP: f32 = 25.0;

/// The configuration after applying this frame's key presses, or `None` if
/// no shortcut fired.
pub fn apply_shortcuts(input: &Input, config: &Config) -> Option<Config> {
    let mut next = config.clone();
    let pressed = |key| input.key_pressed(key);

    if pressed(KeyCode::L) {
        next.layout_mode = next.layout_mode.next();
    }
    if pressed(KeyCode::E) {
        next.effect_mode = next.effect_mode.next();
    }
    if pressed(KeyCode::S) {
        next.stars.enabled = !next.stars.enabled;
    }
    if pressed(KeyCode::U) {
        next.sun_enabled = !next.sun_enabled;
    }
    if pressed(KeyCode::A) {
        next.audio_reactive = !next.audio_reactive;
    }
    if pressed(KeyCode::V) {
        next.variable_speed = !next.variable_speed;
    }
    if pressed(KeyCode::Up) {
        next.stream_count += 1;
    }
    if pressed(KeyCode::Down) {
        next.stream_count = next.stream_count.saturating_sub(1);
    }
    if pressed(KeyCode::Right) {
        next.silk_speed += SPEED_STEP;
    }
    if pressed(KeyCode::Left) {
        next.silk_speed -= SPEED_STEP;
    }

    let next = next.clamped();
    if next == *config {
        return None;
    }
    log::info!(
        "config: layout {:?}, effect {:?}, {} stream(s), speed {}%",
        next.layout_mode,
        next.effect_mode,
        next.stream_count,
        next.silk_speed
    );
    Some(next)
}
