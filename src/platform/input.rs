//! Keyboard mapping
//!
//! WASD steps the frog, arrows fire, 1/2/3 pick a fire mode. Everything is
//! edge-triggered: one key press becomes one command for the next tick.

use crate::sim::{Direction, FireMode, TickInput};

/// Host-neutral key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Digit1,
    Digit2,
    Digit3,
    P,
    H,
    Z,
    Escape,
    /// Anything the game does not use
    Other,
}

impl Key {
    /// Parse a DOM-style key code ("KeyW", "ArrowUp", "Digit1", ...)
    pub fn from_code(code: &str) -> Key {
        match code {
            "KeyW" => Key::W,
            "KeyA" => Key::A,
            "KeyS" => Key::S,
            "KeyD" => Key::D,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Digit1" => Key::Digit1,
            "Digit2" => Key::Digit2,
            "Digit3" => Key::Digit3,
            "KeyP" => Key::P,
            "KeyH" => Key::H,
            "KeyZ" => Key::Z,
            "Escape" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Fold one key press into the pending tick input.
/// Returns false for keys the game ignores.
pub fn map_key(input: &mut TickInput, key: Key) -> bool {
    match key {
        Key::W => input.step = Some(Direction::Up),
        Key::A => input.step = Some(Direction::Left),
        Key::S => input.step = Some(Direction::Down),
        Key::D => input.step = Some(Direction::Right),
        Key::ArrowUp => input.fire = Some(Direction::Up),
        Key::ArrowDown => input.fire = Some(Direction::Down),
        Key::ArrowLeft => input.fire = Some(Direction::Left),
        Key::ArrowRight => input.fire = Some(Direction::Right),
        Key::Digit1 => input.select_mode = Some(FireMode::Single),
        Key::Digit2 => input.select_mode = Some(FireMode::Spread),
        Key::Digit3 => input.select_mode = Some(FireMode::Nova),
        // Toggles cancel out when pressed twice within one tick
        Key::P => input.pause = !input.pause,
        Key::H => input.toggle_help = !input.toggle_help,
        Key::Z => input.skip_level = true,
        Key::Escape => input.back_to_menu = true,
        Key::Other => return false,
    }
    true
}
