/// DOM ids, asset paths and page-level tuning for the web front-end.
///
/// Pure data only: this file is also compiled on the host by the root tests.

// Deployment
pub const GITHUB_PAGES_HOST: &str = "github.io";
pub const GITHUB_PAGES_BASE: &str = "/Candy_Factory";

// Shared assets (relative to the base path)
pub const WRAPPER_MODEL: &str = "assets/models/container_3.glb";
pub const DECO_MODEL: &str = "assets/models/deco-4.glb";
pub const BUBBLE_MODEL: &str = "assets/models/bubble.glb";
pub const BGM_TRACK: &str = "assets/sounds/tech glow.mp3";

// Canvas ids
pub const HOME_CANVAS_ID: &str = "webgl";
pub const SHOP_CANVAS_ID: &str = "webgl-shop";
pub const EMOTION_CANVAS_ID: &str = "webgl";

// Shop page
pub const MODAL_ID: &str = "candy-modal";
pub const MODAL_IMG_ID: &str = "modal-img";
pub const MODAL_TITLE_ID: &str = "modal-title";
pub const MODAL_DESC_ID: &str = "modal-desc";
pub const MODAL_BTN_ID: &str = "modal-btn";
pub const MODAL_SHOW_CLASS: &str = "show";
pub const CANDY_LABEL_ID: &str = "candy-label";
pub const PAGE_WRAP_ID: &str = "pageWrap";
pub const PAGE_LOADED_CLASS: &str = "loaded";
pub const ROTATE_HINT_ID: &str = "rotate-hint";

// Home page
pub const INFO_BOX_ID: &str = "bubble-info";
pub const INFO_TITLE_ID: &str = "info-title";
pub const INFO_TEXT_ID: &str = "info-text";
pub const INFO_MORE_ID: &str = "info-more";
pub const BUBBLE_HINT_ID: &str = "bubble-hint";
pub const INFO_DATA_ID: &str = "bubble-info-data";
pub const LABEL_DATA_ID: &str = "bubble-labels-data";
pub const BUBBLE_LABEL_CLASS: &str = "label";
pub const DANCE_TOGGLE_ID: &str = "bubble-dance";
pub const SOUND_PANEL_ID: &str = "soundPanel";
pub const INFO_MORE_DEFAULT: &str = "了解更多";
pub const INFO_FADE_MS: i32 = 350;
pub const BUBBLE_LABEL_OFFSET: (f64, f64) = (20.0, 10.0);

// Volume controls: (slider, mute button) pairs kept in sync
pub const VOLUME_CONTROLS: [(&str, &str); 2] = [
    ("bgm-volume", "bgm-mute"),
    ("bgm-volume-info", "bgm-mute-info"),
];

// Emotion page
pub const HINT_OPEN_ID: &str = "openHint";
pub const HINT_CLOSE_ID: &str = "closeHint";
pub const HINT_MODAL_ID: &str = "hintModal";
pub const INFO_CARD_ID: &str = "info-card";
pub const TILT_RX_VAR: &str = "--tilt-rx";
pub const TILT_RY_VAR: &str = "--tilt-ry";

// Audio
pub const ANALYSER_FFT_SIZE: u32 = 32;

// Renderer
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.0];
pub const OBJECT_UNIFORM_STRIDE: u64 = 256;
pub const MAX_DRAWS_PER_PASS: u64 = 256;
pub const RIBBON_MAX_VERTICES: u64 = 64;

/// `/Candy_Factory` on GitHub Pages, empty elsewhere.
pub fn base_path_for_host(hostname: &str) -> &'static str {
    if hostname.contains(GITHUB_PAGES_HOST) {
        GITHUB_PAGES_BASE
    } else {
        ""
    }
}

/// Prefix a relative asset path with the deployment base.
pub fn asset_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
