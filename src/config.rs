//! Page copy and tunables
//!
//! Everything has a default. The page may embed a JSON document in
//! `<script type="application/json" id="site-config">` to override any
//! subset of fields.

use serde::{Deserialize, Serialize};

use crate::effects::ambient::{AMBIENT_COLORS, DEFAULT_HEART_COUNT};
use crate::effects::burst::HEART_COLORS;
use crate::placement::DEFAULT_MARGIN;

/// Page `<head>` metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub og_title: String,
    pub og_description: String,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: "Have a great day bby💕".into(),
            description: "A fully decentralized, rug-proof protocol for proving love on-chain. \
                          Will you be the Liquidity Provider to my heart?"
                .into(),
            og_title: "Love Protocol v1.4".into(),
            og_description: "Will you be the Liquidity Provider to my heart?".into(),
        }
    }
}

/// Fields printed on the boarding pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardingPass {
    pub airline: String,
    pub from_code: String,
    pub from_city: String,
    pub to_code: String,
    pub to_city: String,
    pub date: String,
    pub gate: String,
    pub seat: String,
    pub flight: String,
    pub class: String,
    pub gas_fee: String,
    pub passenger: String,
    pub status: String,
}

impl Default for BoardingPass {
    fn default() -> Self {
        Self {
            airline: "Love Airlines".into(),
            from_code: "UAE".into(),
            from_city: "Dubai".into(),
            to_code: "BOM".into(),
            to_city: "Mumbai".into(),
            date: "10 MAR 2026".into(),
            gate: "FOREVER".into(),
            seat: "❤️ 1A".into(),
            flight: "LOVE-69".into(),
            class: "FIRST".into(),
            gas_fee: "0 ETH".into(),
            passenger: "My Governance Partner 💕".into(),
            status: "CONFIRMED".into(),
        }
    }
}

/// Full site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub meta: PageMeta,
    /// Marquee items, shown twice back to back
    pub ticker_items: Vec<String>,
    pub network_status: String,
    pub tagline: String,
    /// Who signs the footer
    pub author: String,
    /// Letter: partner title, meeting city, meeting date
    pub partner_title: String,
    pub city: String,
    pub date_label: String,
    pub boarding_pass: BoardingPass,
    /// Background hearts
    pub heart_count: usize,
    pub ambient_colors: Vec<String>,
    pub confetti_colors: Vec<String>,
    /// Minimum gap between the dodging button and the viewport edge (px)
    pub dodge_margin: f32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            meta: PageMeta::default(),
            ticker_items: [
                "BTC Price, Dropping like crazy",
                "My Love for You, Breaking All-Time Highs (ATH)",
                "ETH Gas, FREE when it comes to you",
                "Commitment Level, Mainnet Launch",
                "Trust Score, Proof of Stake",
                "Sentiment, I'm Bullish on Us💕",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            network_status: "Network Online — Validators: 2 Hearts".into(),
            tagline: "A fully decentralized, rug-proof protocol for proving love on-chain.".into(),
            author: "Bhawna".into(),
            partner_title: "Governance Partner".into(),
            city: "Mumbai".into(),
            date_label: "10th March 2026".into(),
            boarding_pass: BoardingPass::default(),
            heart_count: DEFAULT_HEART_COUNT,
            ambient_colors: AMBIENT_COLORS.iter().map(|c| c.to_string()).collect(),
            confetti_colors: HEART_COLORS.iter().map(|c| c.to_string()).collect(),
            dodge_margin: DEFAULT_MARGIN,
        }
    }
}

impl SiteConfig {
    /// Element id of the embedded override document
    pub const ELEMENT_ID: &'static str = "site-config";

    /// Upper bound on background hearts
    pub const MAX_HEARTS: usize = 64;

    /// Parse an override document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Parse, logging and falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded site config");
                config
            }
            Err(e) => {
                log::warn!("Invalid site config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Clamp tunables into usable ranges
    fn sanitized(mut self) -> Self {
        self.heart_count = self.heart_count.min(Self::MAX_HEARTS);
        if !self.dodge_margin.is_finite() || self.dodge_margin < 0.0 {
            self.dodge_margin = DEFAULT_MARGIN;
        }
        self
    }

    /// Load from the embedded config element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => Self::from_json_or_default(&json),
            _ => {
                log::info!("Using default site config");
                Self::default()
            }
        }
    }

    /// Load from the JSON file named by the first command-line argument,
    /// or defaults when there is none
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::args_os().nth(1) {
            Some(path) => Self::load_from_path(std::path::Path::new(&path)),
            None => {
                log::info!("Using default site config");
                Self::default()
            }
        }
    }

    /// Read overrides from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded site config from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
