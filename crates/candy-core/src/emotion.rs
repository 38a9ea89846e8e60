//! The fixed catalogue of emotion candies.
//!
//! Order matters: the carousel derives slots from the ordinal, and the DOM
//! data nodes are indexed by it.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emotion {
    Tired,
    Sad,
    Boring,
    Upset,
    Happy,
    Anxiety,
}

/// Static per-emotion content shown in the shop modal and used for asset paths.
#[derive(Clone, Copy, Debug)]
pub struct EmotionInfo {
    pub model: &'static str,
    pub image: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    pub accent: u32,
    pub trail: u32,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Tired,
        Emotion::Sad,
        Emotion::Boring,
        Emotion::Upset,
        Emotion::Happy,
        Emotion::Anxiety,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_ordinal(i: usize) -> Emotion {
        Self::ALL[i % Self::COUNT]
    }

    pub fn name(self) -> &'static str {
        match self {
            Emotion::Tired => "TIRED",
            Emotion::Sad => "SAD",
            Emotion::Boring => "BORING",
            Emotion::Upset => "UPSET",
            Emotion::Happy => "HAPPY",
            Emotion::Anxiety => "ANXIETY",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Emotion> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Like [`Emotion::from_name`] but unknown names fall back to `Tired`.
    pub fn from_name_or_default(name: &str) -> Emotion {
        Self::from_name(name).unwrap_or(Emotion::Tired)
    }

    pub fn info(self) -> EmotionInfo {
        match self {
            Emotion::Tired => EmotionInfo {
                model: "assets/models/tired.glb",
                image: "assets/img/tired.png",
                title: "TIRED CANDY",
                description: "精力耗盡、渴望休息、心靈疲乏。",
                link: "html/emotions/tired.html",
                accent: 0x78ffcd,
                trail: 0x78ffd9,
            },
            Emotion::Sad => EmotionInfo {
                model: "assets/models/sad.glb",
                image: "assets/img/sad.png",
                title: "SAD CANDY",
                description: "情緒低落、灰心喪志、沒有希望。",
                link: "html/emotions/sad.html",
                accent: 0x6ec7ff,
                trail: 0x2cc2ff,
            },
            Emotion::Boring => EmotionInfo {
                model: "assets/models/boring.glb",
                image: "assets/img/boring.png",
                title: "BORING CANDY",
                description: "乏味停滯、提不起勁、毫無火花。",
                link: "html/emotions/boring.html",
                accent: 0xff8ee6,
                trail: 0xff4fea,
            },
            Emotion::Upset => EmotionInfo {
                model: "assets/models/upset.glb",
                image: "assets/img/upset.png",
                title: "UPSET CANDY",
                description: "煩躁不順、情緒積壓、容易爆裂。",
                link: "html/emotions/upset.html",
                accent: 0xff7a7a,
                trail: 0xff3b3b,
            },
            Emotion::Happy => EmotionInfo {
                model: "assets/models/happy.glb",
                image: "assets/img/happy.png",
                title: "HAPPY CANDY",
                description: "情緒明亮、心情輕盈、滿滿暖意。",
                link: "html/emotions/happy.html",
                accent: 0xffe066,
                trail: 0xffe700,
            },
            Emotion::Anxiety => EmotionInfo {
                model: "assets/models/anxiety.glb",
                image: "assets/img/anxiety.png",
                title: "ANXIETY CANDY",
                description: "緊張不安、思緒混亂、心跳加速。",
                link: "html/emotions/anxiety.html",
                accent: 0x3ecf55,
                trail: 0x00ff6a,
            },
        }
    }

    /// Ribbon tint as linear-ish RGB in 0..1.
    pub fn trail_rgb(self) -> [f32; 3] {
        hex_to_rgb(self.info().trail)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
