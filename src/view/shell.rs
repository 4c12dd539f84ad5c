//! Static page chrome: ticker, hero, footer, background layer

use std::fmt::Write;

use super::escape;
use super::heart::pixel_heart;
use crate::config::SiteConfig;
use crate::effects::AmbientField;

/// Marquee strip. Items are emitted twice so the loop has no visible seam.
pub fn ticker(config: &SiteConfig) -> String {
    let mut out = String::from(r#"<div class="ticker"><div class="ticker-track">"#);
    for item in config.ticker_items.iter().chain(config.ticker_items.iter()) {
        let _ = write!(out, r#"<span class="ticker-item">{}</span>"#, escape(item));
    }
    out.push_str("</div></div>");
    out
}

pub fn hero(config: &SiteConfig) -> String {
    format!(
        concat!(
            r#"<section class="hero candlestick-bg">"#,
            r#"<p class="hero-status fade-in">● {status}</p>"#,
            r#"<h1 class="hero-title fade-in-up">Checking Network Status: "#,
            r#"<span class="text-pink">Love Protocol</span> <span class="text-blue">v1.4</span></h1>"#,
            r#"<p class="hero-tagline fade-in-late">{tagline}</p>"#,
            "</section>"
        ),
        status = escape(&config.network_status),
        tagline = escape(&config.tagline),
    )
}

/// Footer. `year` is filled on the client; the pre-render leaves the slot empty.
pub fn footer(config: &SiteConfig, year: Option<i32>) -> String {
    let year = year.map(|y| y.to_string()).unwrap_or_default();
    let author = escape(&config.author);
    format!(
        concat!(
            r#"<footer class="footer">"#,
            r#"<p>Built by<span class="text-pink strong"> Heart Chain of {author}</span> "#,
            "which contains No rug pulls, just hugs 💕</p>",
            r#"<p class="footer-fine">© <span data-slot="year">{year}</span> "#,
            "All rights reserved on-chain by {author}</p>",
            "</footer>"
        ),
        author = author,
        year = year,
    )
}

/// Background hearts layer. A pending field renders as an empty container.
pub fn ambient(field: &AmbientField) -> String {
    let mut out = String::from(r#"<div id="ambient" class="ambient" aria-hidden="true">"#);
    out.push_str(&ambient_sprites(field));
    out.push_str("</div>");
    out
}

/// Inner markup of the background layer
pub fn ambient_sprites(field: &AmbientField) -> String {
    let mut out = String::new();
    for s in field.sprites() {
        let _ = write!(
            out,
            r#"<div class="rise-heart" style="left:{:.1}%;--duration:{:.1}s;--delay:{:.1}s;opacity:{:.2}">{}</div>"#,
            s.left_pct,
            s.duration_s,
            s.delay_s,
            s.opacity,
            pixel_heart(s.size_px, "", Some(&format!("color:{}", escape(&s.color)))),
        );
    }
    out
}
