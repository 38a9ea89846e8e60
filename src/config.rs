use crate::constants::{asset_url, base_path_for_host, EMOTION_CANVAS_ID, HOME_CANVAS_ID, SHOP_CANVAS_ID};
use candy_core::Emotion;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Shop,
    Emotion(Emotion),
}

/// Per-page runtime configuration read from the document:
/// `<body data-page="home|shop|emotion" data-emotion="ANXIETY">`.
#[derive(Clone, Debug)]
pub struct PageConfig {
    pub kind: PageKind,
    pub base: &'static str,
}

impl PageConfig {
    pub fn from_document(window: &web::Window, document: &web::Document) -> anyhow::Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no body"))?;
        let data = body.dataset();
        let page = data.get("page").unwrap_or_default();
        let kind = match page.as_str() {
            "shop" => PageKind::Shop,
            "emotion" => {
                let name = data.get("emotion").unwrap_or_default();
                PageKind::Emotion(Emotion::from_name_or_default(&name))
            }
            "" | "home" => PageKind::Home,
            other => {
                log::warn!("[page] unknown data-page '{}', treating as home", other);
                PageKind::Home
            }
        };
        let host = window.location().hostname().unwrap_or_default();
        Ok(Self {
            kind,
            base: base_path_for_host(&host),
        })
    }

    pub fn canvas_id(&self) -> &'static str {
        match self.kind {
            PageKind::Home => HOME_CANVAS_ID,
            PageKind::Shop => SHOP_CANVAS_ID,
            PageKind::Emotion(_) => EMOTION_CANVAS_ID,
        }
    }

    #[inline]
    pub fn asset(&self, path: &str) -> String {
        asset_url(self.base, path)
    }
}
