/// What a key press asks the current page to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Rotate the carousel by this many slots.
    Shift(i32),
    /// Close the modal and hide the hover label.
    Close,
    /// Re-run auto-framing on the detail page.
    Reframe,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowLeft" => Some(KeyAction::Shift(1)),
        "ArrowRight" => Some(KeyAction::Shift(-1)),
        "Escape" => Some(KeyAction::Close),
        "r" | "R" => Some(KeyAction::Reframe),
        _ => None,
    }
}
