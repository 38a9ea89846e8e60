#![cfg(target_arch = "wasm32")]
use crate::config::{PageConfig, PageKind};
use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod assets;
mod audio;
mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod keymap;
mod overlay;
mod pages;
mod render;
mod storage;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("candy-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = PageConfig::from_document(&window, &document)?;
    log::info!("[page] {:?} (base '{}')", config.kind, config.base);
    let canvas = dom::canvas_by_id(&document, config.canvas_id())?;
    let started = Instant::now();

    match config.kind {
        PageKind::Home => {
            let page = pages::home::mount(&document, &config, &canvas, started)?;
            pages::run(page, canvas, started).await;
        }
        PageKind::Shop => {
            let page = pages::shop::mount(&document, &config, &canvas, started)?;
            pages::run(page, canvas, started).await;
        }
        PageKind::Emotion(emotion) => {
            let page = pages::emotion::mount(&document, &config, emotion, &canvas, started)?;
            pages::run(page, canvas, started).await;
        }
    }
    Ok(())
}
