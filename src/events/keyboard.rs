use crate::keymap::{action_for_key, KeyAction};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Route mapped keys to the page; unmapped keys fall through untouched.
pub fn wire_keydown(mut handler: impl FnMut(KeyAction) + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() {
            return;
        }
        if let Some(action) = action_for_key(&ev.key()) {
            handler(action);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
