//! One-shot achievement popups
//!
//! Each merge into a new size class produces an independent popup. Nothing is
//! queued or coalesced here; the host's toast surface owns display order.

use crate::color::{Rgb, ball_color_index, text_color_for};
use crate::error::ConfigError;

/// How long the host should keep a popup up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupDuration {
    Short,
    Long,
}

/// Everything the host needs to draw an achievement toast
#[derive(Debug, Clone, PartialEq)]
pub struct PopupDescriptor {
    /// Number printed on the ball (2^size_class)
    pub ball_number: u64,
    pub text: String,
    pub ball_color: Rgb,
    pub text_color: Rgb,
    pub duration: PopupDuration,
}

/// Non-empty ball color palette
#[derive(Debug, Clone, PartialEq)]
pub struct BallPalette(Vec<Rgb>);

impl BallPalette {
    pub fn new(colors: Vec<Rgb>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyBallPalette);
        }
        Ok(Self(colors))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn color_for(&self, size_class: u32) -> Rgb {
        self.0[ball_color_index(size_class, self.0.len())]
    }
}

/// Non-empty achievement text table, indexed by size class
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementTexts(Vec<String>);

impl AchievementTexts {
    pub fn new(texts: Vec<String>) -> Result<Self, ConfigError> {
        if texts.is_empty() {
            return Err(ConfigError::EmptyAchievementTexts);
        }
        Ok(Self(texts))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text for `size_class`; classes past the table read the last entry
    pub fn text_for(&self, size_class: u32) -> &str {
        let i = (size_class as usize).min(self.0.len() - 1);
        &self.0[i]
    }
}

/// Build the popup for reaching `size_class`.
pub fn notify(size_class: u32, palette: &BallPalette, texts: &AchievementTexts) -> PopupDescriptor {
    let ball_color = palette.color_for(size_class);
    let popup = PopupDescriptor {
        ball_number: 1u64.checked_shl(size_class).unwrap_or(u64::MAX),
        text: texts.text_for(size_class).to_string(),
        ball_color,
        text_color: text_color_for(ball_color),
        duration: PopupDuration::Short,
    };
    log::debug!("achievement: size class {} -> {}", size_class, popup.ball_number);
    popup
}
