//! Background music volume and mute state shared by every volume control.

pub const DEFAULT_VOLUME: f32 = 0.6;
pub const MUTE_LABEL: &str = "靜音";
pub const UNMUTE_LABEL: &str = "取消靜音";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeState {
    volume: f32,
    muted: bool,
}

impl Default for VolumeState {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }
}

impl VolumeState {
    #[inline]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    #[inline]
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Level actually sent to the audio element.
    #[inline]
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Value every slider should display.
    #[inline]
    pub fn slider_value(&self) -> f32 {
        self.effective()
    }

    /// Set from a slider. Zero mutes; a positive level unmutes.
    pub fn set_volume(&mut self, v: f32) {
        let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        self.volume = v;
        self.muted = v == 0.0;
    }

    /// Parse a slider's string value. Unparseable input is ignored.
    pub fn set_from_str(&mut self, raw: &str) -> bool {
        match raw.trim().parse::<f32>() {
            Ok(v) => {
                self.set_volume(v);
                true
            }
            Err(_) => false,
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if !self.muted && self.volume == 0.0 {
            self.volume = DEFAULT_VOLUME;
        }
    }

    pub fn mute_label(&self) -> &'static str {
        if self.muted || self.volume == 0.0 {
            UNMUTE_LABEL
        } else {
            MUTE_LABEL
        }
    }
}
