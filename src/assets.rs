use candy_core::Model;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!(format!("fetch {}: {:?}", url, e)))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

pub async fn load_model(url: &str) -> anyhow::Result<Model> {
    let bytes = fetch_bytes(url).await?;
    let model = Model::from_glb(&bytes)?;
    log::info!("[assets] {} ({} parts)", url, model.parts.len());
    Ok(model)
}

/// Fetch and parse in the background; `on_loaded` runs only on success. A
/// failed asset is logged and its entity simply never completes.
pub fn spawn_model_load(url: String, on_loaded: impl FnOnce(Model) + 'static) {
    spawn_local(async move {
        match load_model(&url).await {
            Ok(model) => on_loaded(model),
            Err(e) => log::warn!("[assets] {} failed: {:?}", url, e),
        }
    });
}
