pub mod emotion;
pub mod home;
pub mod shop;

use crate::frame::{self, FrameContext, PageFrame};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Bring up the GPU for `canvas` and drive `page` every animation frame. The
/// page keeps running its DOM side even if WebGPU is unavailable.
pub async fn run<P: PageFrame + 'static>(
    page: Rc<RefCell<P>>,
    canvas: web::HtmlCanvasElement,
    started: Instant,
) {
    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] no renderer, overlays only");
    }
    let ctx = Rc::new(RefCell::new(FrameContext::new(page, canvas, gpu, started)));
    frame::start_loop(ctx);
}
