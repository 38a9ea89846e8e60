use crate::constants::{ANALYSER_FFT_SIZE, VOLUME_CONTROLS};
use crate::dom;
use candy_core::bubbles::audio_level;
use candy_core::VolumeState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Looping background track routed through an analyser so the bubbles can
/// dance to it.
pub struct Bgm {
    element: web::HtmlAudioElement,
    ctx: Option<web::AudioContext>,
    analyser: Option<web::AnalyserNode>,
    bins: Rc<RefCell<Vec<u8>>>,
    volume: Rc<RefCell<VolumeState>>,
    started: Rc<Cell<bool>>,
}

impl Bgm {
    pub fn new(url: &str) -> anyhow::Result<Rc<Self>> {
        let element = web::HtmlAudioElement::new_with_src(url)
            .map_err(|e| anyhow::anyhow!(format!("audio element: {:?}", e)))?;
        element.set_loop(true);
        let volume = VolumeState::default();
        element.set_volume(volume.effective() as f64);

        // The element still plays without a graph; only dancing is lost.
        let (ctx, analyser, bins) = match web::AudioContext::new() {
            Ok(ctx) => {
                let (analyser, bins) = create_analyser(&ctx);
                if let Some(a) = &analyser {
                    match ctx.create_media_element_source(&element) {
                        Ok(src) => {
                            _ = src.connect_with_audio_node(a);
                            _ = a.connect_with_audio_node(&ctx.destination());
                        }
                        Err(e) => log::warn!("[audio] media source error: {:?}", e),
                    }
                }
                (Some(ctx), analyser, bins)
            }
            Err(e) => {
                log::warn!("[audio] AudioContext error: {:?}", e);
                (None, None, Rc::new(RefCell::new(Vec::new())))
            }
        };
        log::info!("[audio] bgm ready: {}", url);
        Ok(Rc::new(Self {
            element,
            ctx,
            analyser,
            bins,
            volume: Rc::new(RefCell::new(volume)),
            started: Rc::new(Cell::new(false)),
        }))
    }

    /// Resume a suspended context and start playback. A rejected `play()`
    /// (autoplay policy) is ignored; the next gesture tries again.
    pub fn ensure_playing(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web::AudioContextState::Suspended {
                _ = ctx.resume();
            }
        }
        if self.started.get() {
            return;
        }
        match self.element.play() {
            Ok(promise) => {
                let started = self.started.clone();
                started.set(true);
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::debug!("[audio] play rejected: {:?}", e);
                        started.set(false);
                    }
                });
            }
            Err(e) => log::debug!("[audio] play error: {:?}", e),
        }
    }

    /// Average analyser level in 0..1.
    pub fn level(&self) -> f32 {
        let Some(a) = &self.analyser else {
            return 0.0;
        };
        let mut bins = self.bins.borrow_mut();
        a.get_byte_frequency_data(bins.as_mut_slice());
        audio_level(&bins)
    }

    fn apply(&self, document: &web::Document) {
        let state = *self.volume.borrow();
        self.element.set_volume(state.effective() as f64);
        for (slider_id, mute_id) in VOLUME_CONTROLS {
            if let Some(input) = document
                .get_element_by_id(slider_id)
                .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
            {
                input.set_value(&state.slider_value().to_string());
            }
            if let Some(btn) = document.get_element_by_id(mute_id) {
                dom::set_text(&btn, state.mute_label());
            }
        }
    }
}

/// Every volume slider and mute button drives the same state; all of them
/// are re-synced after any change.
pub fn wire_volume_controls(document: &web::Document, bgm: &Rc<Bgm>) {
    bgm.apply(document);
    for (slider_id, mute_id) in VOLUME_CONTROLS {
        if let Some(input) = document
            .get_element_by_id(slider_id)
            .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        {
            let bgm_input = bgm.clone();
            let doc = document.clone();
            let input_for_cb = input.clone();
            let closure = Closure::wrap(Box::new(move || {
                if bgm_input
                    .volume
                    .borrow_mut()
                    .set_from_str(&input_for_cb.value())
                {
                    bgm_input.apply(&doc);
                }
            }) as Box<dyn FnMut()>);
            _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let bgm_mute = bgm.clone();
        let doc = document.clone();
        dom::add_click_listener(document, mute_id, move || {
            bgm_mute.volume.borrow_mut().toggle_mute();
            bgm_mute.apply(&doc);
        });
    }
}

/// First click anywhere on the page unlocks audio.
pub fn wire_first_gesture(bgm: &Rc<Bgm>) {
    let bgm = bgm.clone();
    dom::on_window("click", move || bgm.ensure_playing());
}

pub fn create_analyser(
    audio_ctx: &web::AudioContext,
) -> (Option<web::AnalyserNode>, Rc<RefCell<Vec<u8>>>) {
    let analyser: Option<web::AnalyserNode> = match audio_ctx.create_analyser() {
        Ok(a) => Some(a),
        Err(e) => {
            log::error!("AnalyserNode error: {:?}", e);
            None
        }
    };
    if let Some(a) = &analyser {
        a.set_fft_size(ANALYSER_FFT_SIZE);
    }
    let buf: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    if let Some(a) = &analyser {
        let bins = a.frequency_bin_count() as usize;
        buf.borrow_mut().resize(bins, 0);
    }
    (analyser, buf)
}
