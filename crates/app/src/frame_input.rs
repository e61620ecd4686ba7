//! Keyboard capture for one rendered frame. The simulation takes held
//! keys and edge-detects its own actions; menu navigation and text entry
//! are app-level concerns captured separately.

use game_core::InputFrame;
use macroquad::prelude::{KeyCode, get_char_pressed, is_key_down, is_key_pressed};

#[derive(Clone, Debug, Default)]
pub struct UiInput {
    pub menu_up: bool,
    pub menu_down: bool,
    pub confirm: bool,
    pub escape: bool,
    pub new_entry: bool,
    pub delete_entry: bool,
    pub upgrade_entry: bool,
    pub quiz: bool,
    /// Answer pick: keys 1..=4 map to option indices 0..=3.
    pub digit: Option<usize>,
    pub text: Vec<char>,
    pub backspace: bool,
}

#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub frame: InputFrame,
    pub ui: UiInput,
}

pub fn capture() -> FrameInput {
    let frame = InputFrame {
        up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
        down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
        left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
        interact: is_key_down(KeyCode::E),
        attack: is_key_down(KeyCode::Space),
        cancel: is_key_down(KeyCode::Escape),
        spellbook: is_key_down(KeyCode::Tab),
    };

    let digit = if is_key_pressed(KeyCode::Key1) {
        Some(0)
    } else if is_key_pressed(KeyCode::Key2) {
        Some(1)
    } else if is_key_pressed(KeyCode::Key3) {
        Some(2)
    } else if is_key_pressed(KeyCode::Key4) {
        Some(3)
    } else {
        None
    };

    let mut text = Vec::new();
    while let Some(character) = get_char_pressed() {
        if !character.is_control() {
            text.push(character);
        }
    }

    let ui = UiInput {
        menu_up: is_key_pressed(KeyCode::Up),
        menu_down: is_key_pressed(KeyCode::Down),
        confirm: is_key_pressed(KeyCode::Enter),
        escape: is_key_pressed(KeyCode::Escape),
        new_entry: is_key_pressed(KeyCode::N),
        delete_entry: is_key_pressed(KeyCode::X),
        upgrade_entry: is_key_pressed(KeyCode::U),
        quiz: is_key_pressed(KeyCode::Q),
        digit,
        text,
        backspace: is_key_pressed(KeyCode::Backspace),
    };

    FrameInput { frame, ui }
}
