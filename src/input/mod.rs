//! Input handling module
//!
//! This module provides keyboard events and handlers, pointer and seat
//! state, the evdev name table, and parsing of synthetic key combos.

pub mod codes;
pub mod keyboard;
pub mod pointer;
pub mod seat;
pub mod synthetic;

pub use keyboard::{KeyEvent, KeyState, Keyboard, KeyboardAction, KeyboardInteraction};
pub use pointer::Pointer;
pub use seat::Seat;
pub use synthetic::{parse_combo, ButtonMode, InputError, KeyCombo};
