pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_keydown;
pub use pointer::{on_mouse, on_pointer, on_wheel};
