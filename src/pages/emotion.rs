//! Single-candy page: drag to rotate, wheel to zoom, a tilting info card and
//! a first-visit usage hint.

use crate::assets::spawn_model_load;
use crate::config::PageConfig;
use crate::constants::{
    DECO_MODEL, HINT_CLOSE_ID, HINT_MODAL_ID, HINT_OPEN_ID, INFO_CARD_ID, TILT_RX_VAR, TILT_RY_VAR,
    WRAPPER_MODEL,
};
use crate::dom;
use crate::events::{self, on_mouse, on_pointer, on_wheel};
use crate::frame::PageFrame;
use crate::keymap::KeyAction;
use crate::overlay;
use crate::render::GpuState;
use crate::storage::BrowserStore;
use candy_core::detail::DetailSession;
use candy_core::interact::CardTilt;
use candy_core::{Emotion, HintScheduler};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct EmotionPage {
    session: DetailSession,
    document: web::Document,
    card: Option<web::HtmlElement>,
    tilt: CardTilt,
    hint: HintScheduler,
    store: BrowserStore,
}

impl EmotionPage {
    fn key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Reframe => {
                if self.session.reframe().is_none() {
                    log::info!("[emotion] nothing to frame yet, retrying");
                }
            }
            KeyAction::Close => overlay::set_display(&self.document, HINT_MODAL_ID, "none"),
            KeyAction::Shift(_) => {}
        }
    }

    fn apply_tilt(&mut self) {
        let Some(card) = &self.card else {
            return;
        };
        if self.tilt.is_settled() {
            return;
        }
        let r = self.tilt.step();
        dom::set_style(card, TILT_RX_VAR, &format!("{}deg", r.x));
        dom::set_style(card, TILT_RY_VAR, &format!("{}deg", r.y));
    }
}

impl PageFrame for EmotionPage {
    fn resized(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    fn update(&mut self, now_sec: f64) {
        self.session.tick();
        if self.hint.poll(&mut self.store, now_sec) {
            log::info!("[emotion] showing usage hint");
            overlay::set_display(&self.document, HINT_MODAL_ID, "flex");
        }
        self.apply_tilt();
    }

    fn draw(&mut self, gpu: &mut GpuState, _now_sec: f64) -> Result<(), wgpu::SurfaceError> {
        let plan = self.session.plan();
        let time = self.session.time();
        gpu.render(&self.session.scene, &self.session.camera, &plan, time, None)
    }
}

pub fn mount(
    document: &web::Document,
    config: &PageConfig,
    emotion: Emotion,
    canvas: &web::HtmlCanvasElement,
    started: Instant,
) -> anyhow::Result<Rc<RefCell<EmotionPage>>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let (w, h) = dom::sync_canvas_backing_size(canvas);
    let store = BrowserStore::open();
    let hint = HintScheduler::new(&store, started.elapsed().as_secs_f64());

    let mut session = DetailSession::new(emotion, w, h);
    session.request_frame();
    let page = Rc::new(RefCell::new(EmotionPage {
        session,
        document: document.clone(),
        card: dom::html_element(document, INFO_CARD_ID),
        tilt: CardTilt::default(),
        hint,
        store,
    }));
    log::info!("[emotion] mounted {} at {}x{}", emotion.name(), w, h);

    let p = page.clone();
    spawn_model_load(config.asset(emotion.info().model), move |model| {
        p.borrow_mut().session.candy_loaded(model);
    });
    let p = page.clone();
    spawn_model_load(config.asset(WRAPPER_MODEL), move |model| {
        p.borrow_mut().session.wrapper_loaded(model);
    });
    let p = page.clone();
    spawn_model_load(config.asset(DECO_MODEL), move |model| {
        p.borrow_mut().session.deco_loaded(model);
    });

    // Drag keeps working when the pointer leaves the canvas.
    let p = page.clone();
    on_pointer(&window, "pointerdown", move |ev| {
        p.borrow_mut()
            .session
            .press(ev.client_x() as f32, ev.client_y() as f32);
    });
    let p = page.clone();
    on_pointer(&window, "pointermove", move |ev| {
        p.borrow_mut()
            .session
            .drag(ev.client_x() as f32, ev.client_y() as f32);
    });
    let p = page.clone();
    on_pointer(&window, "pointerup", move |_| p.borrow_mut().session.release());
    let p = page.clone();
    on_pointer(&window, "pointercancel", move |_| p.borrow_mut().session.release());
    let p = page.clone();
    on_wheel(&window, move |ev| p.borrow_mut().session.wheel(ev.delta_y()));

    let p = page.clone();
    events::wire_keydown(move |action| p.borrow_mut().key(action));

    wire_hint(document);
    wire_card(&page);
    Ok(page)
}

fn wire_hint(document: &web::Document) {
    let doc = document.clone();
    dom::add_click_listener(document, HINT_OPEN_ID, move || {
        overlay::set_display(&doc, HINT_MODAL_ID, "flex");
    });
    let doc = document.clone();
    dom::add_click_listener(document, HINT_CLOSE_ID, move || {
        overlay::set_display(&doc, HINT_MODAL_ID, "none");
    });
    if let Some(modal) = document.get_element_by_id(HINT_MODAL_ID) {
        let doc = document.clone();
        let modal_target: web::EventTarget = modal.clone().into();
        on_mouse(&modal, "click", move |ev| {
            if ev.target().as_ref() == Some(&modal_target) {
                overlay::set_display(&doc, HINT_MODAL_ID, "none");
            }
        });
    }
}

fn wire_card(page: &Rc<RefCell<EmotionPage>>) {
    let Some(card) = page.borrow().card.clone() else {
        return;
    };
    let p = page.clone();
    let c = card.clone();
    on_mouse(&card, "mousemove", move |ev| {
        let rect = c.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let u = (ev.client_x() as f64 - rect.left()) / rect.width();
        let v = (ev.client_y() as f64 - rect.top()) / rect.height();
        p.borrow_mut().tilt.point(u as f32, v as f32);
    });
    let p = page.clone();
    on_mouse(&card, "mouseleave", move |_| p.borrow_mut().tilt.leave());
}
