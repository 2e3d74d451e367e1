//! Held-key state
//!
//! The embedding driver translates raw key events into [`Key`]s and flips
//! them in the [`InputMask`]; the game only reads it.

use serde::{Deserialize, Serialize};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Launch,
}

impl Key {
    pub const COUNT: usize = 5;

    pub const ALL: [Key; Key::COUNT] = [Key::Left, Key::Right, Key::Up, Key::Down, Key::Launch];

    fn index(self) -> usize {
        self as usize
    }

    /// Map a key name to its binding (WASD + space, arrows also accepted)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "a" | "left" | "arrowleft" => Some(Key::Left),
            "d" | "right" | "arrowright" => Some(Key::Right),
            "w" | "up" | "arrowup" => Some(Key::Up),
            "s" | "down" | "arrowdown" => Some(Key::Down),
            "space" | " " => Some(Key::Launch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputMask {
    held: [bool; Key::COUNT],
}

impl InputMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, held: bool) {
        self.held[key.index()] = held;
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    pub fn clear(&mut self) {
        self.held = [false; Key::COUNT];
    }

    pub fn any_held(&self) -> bool {
        self.held.iter().any(|&h| h)
    }
}
