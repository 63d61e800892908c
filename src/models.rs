//! Data models for Kino Mania

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Character marking a faulty position in a fault code
pub const SENTINEL: char = '2';

/// Character every healthy position holds
pub const BASELINE: char = '1';

/// Length of freshly created fault codes
pub const CODE_LEN: usize = 10;

/// UI Tab selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Shop,
    Library,
    MyVideos,
    Console,
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    /// Console tag used when the notice is mirrored into the log
    pub fn log_tag(&self) -> &'static str {
        match self {
            NoticeKind::Info | NoticeKind::Success => "[INFO]",
            NoticeKind::Warning => "[WARN]",
            NoticeKind::Error => "[ERROR]",
        }
    }
}

/// One of the five scripted glitch channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultChannel {
    GrayFrame,
    HalfGray,
    BlackScreen,
    Interruption,
    PermanentInterruption,
}

impl FaultChannel {
    pub const ALL: [FaultChannel; 5] = [
        FaultChannel::GrayFrame,
        FaultChannel::HalfGray,
        FaultChannel::BlackScreen,
        FaultChannel::Interruption,
        FaultChannel::PermanentInterruption,
    ];

    /// Channels that only raise a warning when active
    pub const PASSIVE: [FaultChannel; 4] = [
        FaultChannel::GrayFrame,
        FaultChannel::HalfGray,
        FaultChannel::BlackScreen,
        FaultChannel::PermanentInterruption,
    ];

    /// Label shown above the channel in the code editor
    pub fn editor_label(&self) -> &'static str {
        match self {
            FaultChannel::GrayFrame => "🖼 Gray frame (3 sec at some moment)",
            FaultChannel::HalfGray => "◧ Half of the screen is gray",
            FaultChannel::BlackScreen => "⬛ Black screen",
            FaultChannel::Interruption => "⚡ Interruption (15 clicks in 5 sec)",
            FaultChannel::PermanentInterruption => "🚫 Permanent interruption",
        }
    }

    /// Title of the warning raised when playback hits this fault
    pub fn warning_title(&self) -> &'static str {
        match self {
            FaultChannel::GrayFrame => "⚠️ Gray frame detected!",
            FaultChannel::HalfGray => "⚠️ Half of the screen is gray!",
            FaultChannel::BlackScreen => "⚠️ Black screen!",
            FaultChannel::Interruption => "⚡ Interruption!",
            FaultChannel::PermanentInterruption => "⚠️ Permanent interruption detected!",
        }
    }
}

/// Per-movie fault codes, one digit string per channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultCodeSet {
    pub gray_frame: String,
    pub half_gray: String,
    pub black_screen: String,
    pub interruption: String,
    pub permanent_interruption: String,
}

impl Default for FaultCodeSet {
    fn default() -> Self {
        Self::baseline()
    }
}

impl FaultCodeSet {
    /// All channels healthy
    pub fn baseline() -> Self {
        let healthy: String = std::iter::repeat(BASELINE).take(CODE_LEN).collect();
        Self {
            gray_frame: healthy.clone(),
            half_gray: healthy.clone(),
            black_screen: healthy.clone(),
            interruption: healthy.clone(),
            permanent_interruption: healthy,
        }
    }

    pub fn get(&self, channel: FaultChannel) -> &str {
        match channel {
            FaultChannel::GrayFrame => &self.gray_frame,
            FaultChannel::HalfGray => &self.half_gray,
            FaultChannel::BlackScreen => &self.black_screen,
            FaultChannel::Interruption => &self.interruption,
            FaultChannel::PermanentInterruption => &self.permanent_interruption,
        }
    }

    pub fn get_mut(&mut self, channel: FaultChannel) -> &mut String {
        match channel {
            FaultChannel::GrayFrame => &mut self.gray_frame,
            FaultChannel::HalfGray => &mut self.half_gray,
            FaultChannel::BlackScreen => &mut self.black_screen,
            FaultChannel::Interruption => &mut self.interruption,
            FaultChannel::PermanentInterruption => &mut self.permanent_interruption,
        }
    }

    /// A channel is faulty iff its code holds the sentinel at least once
    pub fn is_active(&self, channel: FaultChannel) -> bool {
        self.get(channel).contains(SENTINEL)
    }

    /// True when every code is made only of ASCII digits
    pub fn is_digits_only(&self) -> bool {
        FaultChannel::ALL
            .iter()
            .all(|&c| self.get(c).chars().all(|ch| ch.is_ascii_digit()))
    }
}

/// A movie in the shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub avatar: String,
    pub price: u32,
    #[serde(default)]
    pub is_purchased: bool,
    #[serde(default)]
    pub is_user_uploaded: bool,
    /// Local video file, only set for user uploads
    #[serde(default)]
    pub video_path: Option<PathBuf>,
    #[serde(default)]
    pub codes: FaultCodeSet,
}

impl Movie {
    /// Purchased movies and the user's own uploads may be watched
    pub fn is_watchable(&self) -> bool {
        self.is_purchased || self.is_user_uploaded
    }
}
