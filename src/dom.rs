use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Listener on the window for events that carry no payload we need.
pub fn on_window(event: &str, mut handler: impl FnMut() + 'static) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

#[inline]
pub fn set_px(el: &web::HtmlElement, property: &str, value: f64) {
    set_style(el, property, &format!("{}px", value));
}

#[inline]
pub fn set_text(el: &web::Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Keep the canvas backing store at CSS size times devicePixelRatio. Returns
/// the CSS size in pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
        return (rect.width().max(1.0) as f32, rect.height().max(1.0) as f32);
    }
    (canvas.width().max(1) as f32, canvas.height().max(1) as f32)
}

/// Client coordinates relative to the canvas' top-left corner, in CSS pixels.
#[inline]
pub fn canvas_offset(canvas: &web::HtmlCanvasElement, client_x: f64, client_y: f64) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    ((client_x - rect.left()) as f32, (client_y - rect.top()) as f32)
}

#[inline]
pub fn navigate(url: &str) {
    if let Some(w) = web::window() {
        _ = w.location().set_href(url);
    }
}

#[inline]
pub fn viewport_size() -> (f64, f64) {
    web::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            (width, height)
        })
        .unwrap_or((0.0, 0.0))
}
