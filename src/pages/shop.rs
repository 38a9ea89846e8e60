//! Carousel page: six candies on a ring, a detail modal for the front one,
//! and a ribbon following the cursor.

use crate::assets::spawn_model_load;
use crate::config::PageConfig;
use crate::constants::{
    asset_url, CANDY_LABEL_ID, DECO_MODEL, MODAL_BTN_ID, MODAL_DESC_ID, MODAL_ID, MODAL_IMG_ID,
    MODAL_TITLE_ID, PAGE_LOADED_CLASS, PAGE_WRAP_ID, WRAPPER_MODEL,
};
use crate::dom;
use crate::events::{self, on_mouse, on_pointer};
use crate::frame::PageFrame;
use crate::keymap::KeyAction;
use crate::overlay;
use crate::render::{GpuState, RibbonDraw};
use candy_core::constants::RIBBON_OPACITY;
use candy_core::interact::CarouselClick;
use candy_core::shop::ShopSession;
use candy_core::Emotion;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct ShopPage {
    session: ShopSession,
    document: web::Document,
    label: Option<web::HtmlElement>,
    modal_emotion: Option<Emotion>,
    base: &'static str,
    started: Instant,
}

impl ShopPage {
    #[inline]
    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn set_label(&self, visible: bool, client: Option<(f64, f64)>) {
        let Some(label) = &self.label else {
            return;
        };
        overlay::set_opacity(label, visible);
        if let (true, Some((x, y))) = (visible, client) {
            dom::set_px(label, "left", x);
            dom::set_px(label, "top", y);
        }
    }

    fn open_modal(&mut self, emotion: Emotion) {
        let info = emotion.info();
        if let Some(img) = self
            .document
            .get_element_by_id(MODAL_IMG_ID)
            .and_then(|el| el.dyn_into::<web::HtmlImageElement>().ok())
        {
            img.set_src(&asset_url(self.base, info.image));
        }
        if let Some(el) = self.document.get_element_by_id(MODAL_TITLE_ID) {
            dom::set_text(&el, info.title);
        }
        if let Some(el) = self.document.get_element_by_id(MODAL_DESC_ID) {
            dom::set_text(&el, info.description);
        }
        self.modal_emotion = Some(emotion);
        overlay::show(&self.document, MODAL_ID);
        log::info!("[shop] detail for {}", emotion.name());
    }

    fn close(&mut self) {
        if overlay::is_shown(&self.document, MODAL_ID) {
            overlay::hide(&self.document, MODAL_ID);
            log::info!("[shop] detail closed");
        }
        self.set_label(false, None);
    }

    fn key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Shift(step) => {
                let now = self.now();
                self.session.shift(step, now);
            }
            KeyAction::Close => self.close(),
            KeyAction::Reframe => {}
        }
    }
}

impl PageFrame for ShopPage {
    fn resized(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    fn update(&mut self, now_sec: f64) {
        self.session.tick(now_sec);
    }

    fn draw(&mut self, gpu: &mut GpuState, now_sec: f64) -> Result<(), wgpu::SurfaceError> {
        let plan = self.session.plan();
        let [r, g, b] = self.session.ribbon_color();
        let ribbon = RibbonDraw {
            mesh: self.session.ribbon(),
            color: [r, g, b, RIBBON_OPACITY],
        };
        gpu.render(
            &self.session.scene,
            &self.session.camera,
            &plan,
            now_sec as f32,
            Some(ribbon),
        )
    }
}

pub fn mount(
    document: &web::Document,
    config: &PageConfig,
    canvas: &web::HtmlCanvasElement,
    started: Instant,
) -> anyhow::Result<Rc<RefCell<ShopPage>>> {
    let (w, h) = dom::sync_canvas_backing_size(canvas);
    let page = Rc::new(RefCell::new(ShopPage {
        session: ShopSession::new(w, h, started.elapsed().as_secs_f64()),
        document: document.clone(),
        label: dom::html_element(document, CANDY_LABEL_ID),
        modal_emotion: None,
        base: config.base,
        started,
    }));

    load_assets(&page, config);
    wire_pointer(&page, canvas)?;
    wire_modal(&page, document);

    let page_key = page.clone();
    events::wire_keydown(move |action| page_key.borrow_mut().key(action));

    let doc_hint = document.clone();
    overlay::update_rotate_hint(document);
    dom::on_window("resize", move || overlay::update_rotate_hint(&doc_hint));
    let doc_orient = document.clone();
    dom::on_window("orientationchange", move || overlay::update_rotate_hint(&doc_orient));

    let doc_load = document.clone();
    dom::on_window("load", move || {
        if let Some(el) = doc_load.get_element_by_id(PAGE_WRAP_ID) {
            _ = el.class_list().add_1(PAGE_LOADED_CLASS);
        }
    });
    Ok(page)
}

fn load_assets(page: &Rc<RefCell<ShopPage>>, config: &PageConfig) {
    for emotion in Emotion::ALL {
        let p = page.clone();
        spawn_model_load(config.asset(emotion.info().model), move |model| {
            p.borrow_mut().session.candy_loaded(emotion, model);
        });
    }
    let p = page.clone();
    spawn_model_load(config.asset(WRAPPER_MODEL), move |model| {
        p.borrow_mut().session.wrapper_loaded(model);
    });
    let p = page.clone();
    spawn_model_load(config.asset(DECO_MODEL), move |model| {
        p.borrow_mut().session.deco_loaded(model);
    });
}

fn wire_pointer(page: &Rc<RefCell<ShopPage>>, canvas: &web::HtmlCanvasElement) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;

    // Trail and hover label follow the mouse anywhere on the page.
    let p = page.clone();
    let c = canvas.clone();
    on_mouse(&window, "mousemove", move |ev| {
        let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);
        let (x, y) = dom::canvas_offset(&c, cx, cy);
        let mut page = p.borrow_mut();
        page.session.pointer_moved(x, y);
        let visible = page.session.hover_label_visible(x, y);
        page.set_label(visible, Some((cx, cy)));
    });

    let p = page.clone();
    let c = canvas.clone();
    on_pointer(canvas, "pointerdown", move |ev| {
        let (x, y) = dom::canvas_offset(&c, ev.client_x() as f64, ev.client_y() as f64);
        let mut page = p.borrow_mut();
        let now = page.now();
        if let CarouselClick::OpenDetail(i) = page.session.click(x, y, now) {
            page.open_modal(Emotion::from_ordinal(i));
        }
    });
    Ok(())
}

fn wire_modal(page: &Rc<RefCell<ShopPage>>, document: &web::Document) {
    let p = page.clone();
    dom::add_click_listener(document, MODAL_BTN_ID, move || {
        let page = p.borrow();
        if let Some(emotion) = page.modal_emotion {
            dom::navigate(&asset_url(page.base, emotion.info().link));
        }
    });

    // Backdrop click closes; clicks inside the card do not.
    if let Some(modal) = document.get_element_by_id(MODAL_ID) {
        let doc = document.clone();
        let modal_target: web::EventTarget = modal.clone().into();
        on_mouse(&modal, "click", move |ev| {
            if ev.target().as_ref() == Some(&modal_target) {
                overlay::hide(&doc, MODAL_ID);
            }
        });
    }
}
