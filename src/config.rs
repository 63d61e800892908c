//! Configuration management
//!
//! Only settings are stored. Coins, purchases and uploads live for one
//! session.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::challenge::ChallengeRules;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub external_player: String,
    #[serde(default = "default_true")]
    pub single_window_mode: bool,
    // Game tunables
    #[serde(default = "default_starting_coins")]
    pub starting_coins: u32,
    #[serde(default = "default_clicks_per_coin")]
    pub clicks_per_coin: u32,
    #[serde(default = "default_challenge_clicks")]
    pub challenge_clicks: u32,
    #[serde(default = "default_challenge_seconds")]
    pub challenge_seconds: u64,
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: u64,
}

fn default_true() -> bool { true }
fn default_font_size() -> u32 { 14 }
fn default_starting_coins() -> u32 { 10 }
fn default_clicks_per_coin() -> u32 { 50 }
fn default_challenge_clicks() -> u32 { 15 }
fn default_challenge_seconds() -> u64 { 5 }
fn default_toast_seconds() -> u64 { 4 }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_size: 14,
            external_player: String::new(),
            single_window_mode: true,
            starting_coins: 10,
            clicks_per_coin: 50,
            challenge_clicks: 15,
            challenge_seconds: 5,
            toast_seconds: 4,
        }
    }
}

impl AppConfig {
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("kino_mania");
        fs::create_dir_all(&path).ok();
        path.push("config.json");
        path
    }

    pub fn load() -> Self {
        Self::from_json(&fs::read_to_string(Self::config_path()).unwrap_or_default())
    }

    /// Parse settings, falling back to defaults on anything unreadable
    pub fn from_json(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::config_path(), content)
    }

    pub fn challenge_rules(&self) -> ChallengeRules {
        ChallengeRules {
            target_clicks: self.challenge_clicks.max(1),
            window: Duration::from_secs(self.challenge_seconds.max(1)),
        }
    }

    pub fn clicks_per_coin(&self) -> u32 {
        self.clicks_per_coin.max(1)
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_secs(self.toast_seconds.max(1))
    }
}
