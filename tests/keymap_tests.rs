// Host-side tests for key bindings.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keymap {
    include!("../src/keymap.rs");
}

use keymap::{action_for_key, KeyAction};

#[test]
fn arrows_rotate_the_carousel_in_opposite_directions() {
    assert_eq!(action_for_key("ArrowLeft"), Some(KeyAction::Shift(1)));
    assert_eq!(action_for_key("ArrowRight"), Some(KeyAction::Shift(-1)));
}

#[test]
fn escape_closes() {
    assert_eq!(action_for_key("Escape"), Some(KeyAction::Close));
}

#[test]
fn r_reframes_in_either_case() {
    assert_eq!(action_for_key("r"), Some(KeyAction::Reframe));
    assert_eq!(action_for_key("R"), Some(KeyAction::Reframe));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["ArrowUp", "Enter", " ", "a", ""] {
        assert_eq!(action_for_key(key), None, "key {:?}", key);
    }
}
