use crate::dom;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// What the frame loop needs from a page.
pub trait PageFrame {
    /// Canvas CSS size changed.
    fn resized(&mut self, width: f32, height: f32);
    /// Advance simulation and DOM overlays; `now_sec` counts from load.
    fn update(&mut self, now_sec: f64);
    fn draw(&mut self, gpu: &mut render::GpuState, now_sec: f64) -> Result<(), wgpu::SurfaceError>;
}

pub struct FrameContext<P: PageFrame> {
    pub page: Rc<RefCell<P>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub started: Instant,
    pub css_size: (f32, f32),
}

impl<P: PageFrame> FrameContext<P> {
    pub fn new(
        page: Rc<RefCell<P>>,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState>,
        started: Instant,
    ) -> Self {
        Self {
            page,
            canvas,
            gpu,
            started,
            css_size: (0.0, 0.0),
        }
    }

    #[inline]
    pub fn now_sec(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn frame(&mut self) {
        let now = self.now_sec();

        // Backing size tracks CSS size every frame; resize events alone miss
        // layout changes that do not resize the window.
        let size = dom::sync_canvas_backing_size(&self.canvas);
        if size != self.css_size {
            self.css_size = size;
            self.page.borrow_mut().resized(size.0, size.1);
        }

        let mut page = self.page.borrow_mut();
        page.update(now);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        match page.draw(gpu, now) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory, stopping renderer");
                self.gpu = None;
            }
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop<P: PageFrame + 'static>(frame_ctx: Rc<RefCell<FrameContext<P>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
