//! Landing page: five refractive bubbles that open info cards or the music
//! panel, and can dance to the background track.

use crate::assets::spawn_model_load;
use crate::audio::{self, Bgm};
use crate::config::PageConfig;
use crate::constants::{
    BGM_TRACK, BUBBLE_HINT_ID, BUBBLE_LABEL_CLASS, BUBBLE_LABEL_OFFSET, BUBBLE_MODEL,
    DANCE_TOGGLE_ID, INFO_BOX_ID, INFO_DATA_ID, INFO_FADE_MS, INFO_MORE_DEFAULT, INFO_MORE_ID,
    INFO_TEXT_ID, INFO_TITLE_ID, LABEL_DATA_ID, SOUND_PANEL_ID,
};
use crate::dom;
use crate::events::on_mouse;
use crate::frame::PageFrame;
use crate::overlay;
use crate::render::GpuState;
use candy_core::bubbles::{
    has_call_to_action, info_box_position, sound_panel_position, BubbleAction, BUBBLE_COUNT,
};
use candy_core::home::HomeSession;
use instant::Instant;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One `[data-index]` child of the hidden info data node.
#[derive(Clone, Debug, Default)]
struct InfoData {
    title: String,
    text: String,
    url: String,
    button: Option<String>,
}

fn data_node(document: &web::Document, root_id: &str, index: usize) -> Option<web::HtmlElement> {
    document
        .query_selector(&format!("#{} [data-index=\"{}\"]", root_id, index))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

fn read_info(document: &web::Document, index: usize) -> InfoData {
    let Some(el) = data_node(document, INFO_DATA_ID, index) else {
        return InfoData::default();
    };
    let data = el.dataset();
    InfoData {
        title: data.get("title").unwrap_or_default(),
        text: data.get("text").unwrap_or_default(),
        url: data.get("url").unwrap_or_default(),
        button: data.get("btn"),
    }
}

fn read_label(document: &web::Document, index: usize) -> String {
    data_node(document, LABEL_DATA_ID, index)
        .and_then(|el| el.text_content())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

struct Overlays {
    info_box: Option<web::HtmlElement>,
    info_title: Option<web::Element>,
    info_text: Option<web::Element>,
    info_more: Option<web::HtmlElement>,
    hint: Option<web::HtmlElement>,
    sound_panel: Option<web::HtmlElement>,
    dance: Option<web::HtmlInputElement>,
    labels: Vec<(web::HtmlElement, String)>,
}

impl Overlays {
    fn find(document: &web::Document) -> Self {
        let body = document.body();
        let labels = (0..BUBBLE_COUNT)
            .filter_map(|i| {
                let text = read_label(document, i);
                let el = document
                    .create_element("div")
                    .ok()?
                    .dyn_into::<web::HtmlElement>()
                    .ok()?;
                el.set_class_name(BUBBLE_LABEL_CLASS);
                el.set_inner_text(&text);
                dom::set_style(&el, "position", "absolute");
                dom::set_style(&el, "display", "none");
                if let Some(b) = &body {
                    _ = b.append_child(&el);
                }
                Some((el, text))
            })
            .collect();
        Self {
            info_box: dom::html_element(document, INFO_BOX_ID),
            info_title: document.get_element_by_id(INFO_TITLE_ID),
            info_text: document.get_element_by_id(INFO_TEXT_ID),
            info_more: dom::html_element(document, INFO_MORE_ID),
            hint: dom::html_element(document, BUBBLE_HINT_ID),
            sound_panel: dom::html_element(document, SOUND_PANEL_ID),
            dance: document
                .get_element_by_id(DANCE_TOGGLE_ID)
                .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok()),
            labels,
        }
    }

    fn set_hint(&self, visible: bool) {
        if let Some(h) = &self.hint {
            overlay::set_opacity(h, visible);
        }
    }

    fn show_info(&self, info: &InfoData) {
        if let Some(el) = &self.info_title {
            dom::set_text(el, &info.title);
        }
        if let Some(el) = &self.info_text {
            dom::set_text(el, &info.text);
        }
        if let Some(more) = &self.info_more {
            dom::set_text(more, info.button.as_deref().unwrap_or(INFO_MORE_DEFAULT));
            let display = if has_call_to_action(&info.url) {
                "inline-block"
            } else {
                "none"
            };
            dom::set_style(more, "display", display);
        }
        if let Some(b) = &self.info_box {
            dom::set_style(b, "display", "block");
            overlay::set_opacity(b, true);
        }
    }

    /// Fade out, then drop from layout once the transition is over, unless it
    /// was shown again meanwhile.
    fn hide_info(&self) {
        self.set_hint(false);
        let Some(b) = self.info_box.clone() else {
            return;
        };
        overlay::set_opacity(&b, false);
        let after = Closure::once_into_js(move || {
            let still_hidden = b
                .style()
                .get_property_value("opacity")
                .map(|o| o == "0")
                .unwrap_or(true);
            if still_hidden {
                dom::set_style(&b, "display", "none");
            }
        });
        if let Some(w) = web::window() {
            _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                after.unchecked_ref(),
                INFO_FADE_MS,
            );
        }
    }

    fn show_sound_panel(&self, visible: bool) {
        if let Some(p) = &self.sound_panel {
            dom::set_style(p, "display", if visible { "block" } else { "none" });
            overlay::set_opacity(p, visible);
        }
    }

    fn dancing(&self) -> bool {
        self.dance.as_ref().map(|d| d.checked()).unwrap_or(false)
    }
}

pub struct HomePage {
    session: HomeSession,
    overlays: Overlays,
    document: web::Document,
    bgm: Option<Rc<Bgm>>,
    info_url: String,
    pointer_client: (f64, f64),
    started: Instant,
}

impl HomePage {
    #[inline]
    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn click(&mut self, x: f32, y: f32) {
        let now = self.now();
        let Some(action) = self.session.click(x, y, now) else {
            return;
        };
        match action {
            BubbleAction::OpenSound { index, .. } => {
                log::info!("[home] sound panel from bubble {}", index);
                self.overlays.hide_info();
                self.overlays.show_sound_panel(true);
                if let Some(bgm) = &self.bgm {
                    bgm.ensure_playing();
                }
                self.overlays.set_hint(true);
            }
            BubbleAction::OpenInfo { index, .. } => {
                log::info!("[home] info for bubble {}", index);
                self.overlays.show_sound_panel(false);
                let info = read_info(&self.document, index);
                self.overlays.show_info(&info);
                self.info_url = info.url;
                self.overlays.set_hint(true);
            }
            BubbleAction::Close { .. } => {
                self.overlays.hide_info();
                self.overlays.show_sound_panel(false);
            }
        }
    }

    fn follow_overlays(&self) {
        let viewport = self.session.viewport();
        let field = self.session.field();
        if let (Some(i), Some(b)) = (field.active(), &self.overlays.info_box) {
            if field.sound_follow().is_none() {
                if let Some(screen) = self.session.screen_position(i) {
                    let p = info_box_position(i, screen, viewport);
                    dom::set_px(b, "left", p.x as f64);
                    dom::set_px(b, "top", p.y as f64);
                }
            }
        }
        if let (Some(i), Some(panel)) = (field.sound_follow(), &self.overlays.sound_panel) {
            if let Some(screen) = self.session.screen_position(i) {
                let p = sound_panel_position(i, screen, viewport);
                dom::set_px(panel, "left", p.x as f64);
                dom::set_px(panel, "top", p.y as f64);
            }
        }
    }

    fn update_labels(&self) {
        let hovered = self.session.hovered();
        for (i, (el, text)) in self.overlays.labels.iter().enumerate() {
            if hovered == Some(i) && !text.is_empty() {
                dom::set_style(el, "display", "block");
                dom::set_px(el, "left", self.pointer_client.0 + BUBBLE_LABEL_OFFSET.0);
                dom::set_px(el, "top", self.pointer_client.1 + BUBBLE_LABEL_OFFSET.1);
            } else {
                dom::set_style(el, "display", "none");
            }
        }
    }
}

impl PageFrame for HomePage {
    fn resized(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    fn update(&mut self, now_sec: f64) {
        let dance = if self.overlays.dancing() {
            Some(self.bgm.as_ref().map(|b| b.level()).unwrap_or(0.0))
        } else {
            None
        };
        self.session.tick(now_sec, now_sec as f32, dance);
        self.follow_overlays();
        self.update_labels();
    }

    fn draw(&mut self, gpu: &mut GpuState, now_sec: f64) -> Result<(), wgpu::SurfaceError> {
        let plan = self.session.plan();
        gpu.render(&self.session.scene, &self.session.camera, &plan, now_sec as f32, None)
    }
}

pub fn mount(
    document: &web::Document,
    config: &PageConfig,
    canvas: &web::HtmlCanvasElement,
    started: Instant,
) -> anyhow::Result<Rc<RefCell<HomePage>>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let (w, h) = dom::sync_canvas_backing_size(canvas);

    let bgm = match Bgm::new(&config.asset(BGM_TRACK)) {
        Ok(b) => {
            audio::wire_volume_controls(document, &b);
            audio::wire_first_gesture(&b);
            Some(b)
        }
        Err(e) => {
            log::warn!("[audio] disabled: {:?}", e);
            None
        }
    };

    let page = Rc::new(RefCell::new(HomePage {
        session: HomeSession::new(w, h),
        overlays: Overlays::find(document),
        document: document.clone(),
        bgm,
        info_url: String::new(),
        pointer_client: (0.0, 0.0),
        started,
    }));

    let urls: Vec<String> = (0..BUBBLE_COUNT)
        .map(|i| read_info(document, i).url)
        .collect();
    let p = page.clone();
    spawn_model_load(config.asset(BUBBLE_MODEL), move |model| {
        let mut rng = rand::thread_rng();
        p.borrow_mut()
            .session
            .bubbles_loaded(model, &urls, || rng.gen::<f32>() * 10.0);
    });

    let p = page.clone();
    let c = canvas.clone();
    on_mouse(&window, "mousemove", move |ev| {
        let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);
        let (x, y) = dom::canvas_offset(&c, cx, cy);
        let mut page = p.borrow_mut();
        page.pointer_client = (cx, cy);
        page.session.pointer_moved(x, y);
    });

    let p = page.clone();
    let c = canvas.clone();
    on_mouse(&window, "click", move |ev| {
        let (x, y) = dom::canvas_offset(&c, ev.client_x() as f64, ev.client_y() as f64);
        p.borrow_mut().click(x, y);
    });

    let p = page.clone();
    dom::add_click_listener(document, INFO_MORE_ID, move || {
        let url = p.borrow().info_url.clone();
        if has_call_to_action(&url) {
            dom::navigate(&url);
        }
    });

    log::info!("[home] mounted {}x{}", w, h);
    Ok(page)
}
