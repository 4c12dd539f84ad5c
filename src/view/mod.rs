//! HTML markup for the page
//!
//! Plain string rendering so the same code serves the native pre-render and
//! the client. Styling lives in `style.css`.

pub mod card;
pub mod heart;
pub mod shell;

pub use card::{ACTION_ACCEPT, ACTION_OPEN, ACTION_REJECT};

use std::fmt::Write;

use crate::config::SiteConfig;
use crate::effects::AmbientField;
use crate::reveal::ProposalCard;

/// Element ids shared with the browser layer
pub mod ids {
    pub const APP: &str = "app";
    pub const AMBIENT: &str = "ambient";
    pub const CARD: &str = "card";
    pub const REJECT_LAYER: &str = "reject-layer";
    pub const CONFETTI: &str = "confetti";
}

/// Escape text for HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything inside `#app`
pub fn page_body(
    config: &SiteConfig,
    ambient: &AmbientField,
    proposal: &ProposalCard,
    year: Option<i32>,
) -> String {
    let mut out = String::from(r#"<div class="page">"#);
    out.push_str(&shell::ambient(ambient));
    out.push_str(&shell::ticker(config));
    out.push_str(r#"<main class="main">"#);
    out.push_str(&shell::hero(config));
    out.push_str(&card::card(config, proposal.stage(), proposal.reject_control()));
    out.push_str("</main>");
    out.push_str(&shell::footer(config, year));
    let _ = write!(
        out,
        r#"<canvas id="{}" class="confetti" aria-hidden="true"></canvas>"#,
        ids::CONFETTI
    );
    out.push_str("</div>");
    out
}

/// Complete pre-rendered `index.html` for trunk: initial stage, pending
/// background, empty year slot
pub fn document(config: &SiteConfig) -> String {
    let meta = &config.meta;
    let body = page_body(config, &AmbientField::Pending, &ProposalCard::default(), None);
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en" class="dark"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title}</title>",
            r#"<meta name="description" content="{description}">"#,
            r#"<meta property="og:title" content="{og_title}">"#,
            r#"<meta property="og:description" content="{og_description}">"#,
            r#"<link data-trunk rel="css" href="style.css">"#,
            r#"<link data-trunk rel="rust" data-bin="love-protocol">"#,
            r#"<script type="application/json" id="{config_id}">{config_json}</script>"#,
            "</head>\n",
            r#"<body class="antialiased"><div id="{app}">{body}</div></body></html>"#,
            "\n"
        ),
        title = escape(&meta.title),
        description = escape(&meta.description),
        og_title = escape(&meta.og_title),
        og_description = escape(&meta.og_description),
        config_id = SiteConfig::ELEMENT_ID,
        config_json = config_script_json(config),
        app = ids::APP,
        body = body,
    )
}

/// Serialize `config` for an inline `<script>` element.
///
/// `<`, `>` and `&` only occur inside JSON strings, so their `\u` escapes
/// keep the document parser from ever seeing `</script>`.
pub fn config_script_json(config: &SiteConfig) -> String {
    match serde_json::to_string(config) {
        Ok(json) => json
            .replace('<', "\\u003c")
            .replace('>', "\\u003e")
            .replace('&', "\\u0026"),
        Err(e) => {
            log::warn!("Could not serialize site config: {}", e);
            "{}".to_string()
        }
    }
}
