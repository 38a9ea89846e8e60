use crate::constants::{MODAL_SHOW_CLASS, ROTATE_HINT_ID};
use crate::dom;
use candy_core::interact::rotate_hint_visible;
use web_sys as web;

/// Modal overlays toggle a class; the stylesheet animates the rest.
#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1(MODAL_SHOW_CLASS);
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1(MODAL_SHOW_CLASS);
    }
}

#[inline]
pub fn is_shown(document: &web::Document, id: &str) -> bool {
    document
        .get_element_by_id(id)
        .map(|el| el.class_list().contains(MODAL_SHOW_CLASS))
        .unwrap_or(false)
}

/// Inline `display` switch, for overlays without a show class.
#[inline]
pub fn set_display(document: &web::Document, id: &str, display: &str) {
    if let Some(el) = dom::html_element(document, id) {
        dom::set_style(&el, "display", display);
    }
}

#[inline]
pub fn set_opacity(el: &web::HtmlElement, visible: bool) {
    dom::set_style(el, "opacity", if visible { "1" } else { "0" });
}

pub fn update_rotate_hint(document: &web::Document) {
    let (w, h) = dom::viewport_size();
    let display = if rotate_hint_visible(w, h) { "flex" } else { "none" };
    set_display(document, ROTATE_HINT_ID, display);
}
