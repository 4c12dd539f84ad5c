//! Proposal card markup, one subtree per stage

use std::fmt::Write;

use glam::Vec2;

use super::escape;
use super::heart::pixel_heart;
use crate::config::{BoardingPass, SiteConfig};
use crate::reveal::{RejectControl, Stage};

/// `data-action` values the browser layer dispatches on
pub const ACTION_ACCEPT: &str = "accept";
pub const ACTION_REJECT: &str = "reject";
pub const ACTION_OPEN: &str = "open-envelope";

const REJECT_LABEL: &str = "No, reject the love transaction (but try clicking it!)";

/// Class list of the card frame for a stage
pub fn card_class(stage: Stage) -> String {
    let width = if stage == Stage::Revealed { "card-wide" } else { "card-narrow" };
    format!("glass-card {width} stage-{}", stage.as_str())
}

/// Whole card section: frame, current stage and the floating layer
pub fn card(config: &SiteConfig, stage: Stage, reject: RejectControl) -> String {
    format!(
        concat!(
            r#"<section id="proposal" class="proposal">"#,
            r#"<div id="card" class="{class}">{body}</div>"#,
            r#"<div id="reject-layer">{floating}</div>"#,
            "</section>"
        ),
        class = card_class(stage),
        body = card_body(config, stage, reject),
        floating = floating_reject(reject).unwrap_or_default(),
    )
}

/// Inner markup of the card for the current stage
pub fn card_body(config: &SiteConfig, stage: Stage, reject: RejectControl) -> String {
    match stage {
        Stage::Unanswered => question(reject),
        Stage::Confirmed => envelope(),
        Stage::Revealed => letter(config),
    }
}

fn question(reject: RejectControl) -> String {
    let mut out = String::from(r#"<div class="stage stage-enter" data-stage="unanswered">"#);
    out.push_str(&pixel_heart(40, "card-heart text-pink", None));
    out.push_str(concat!(
        r#"<h2 class="card-title">Will you be the "#,
        r#"<span class="text-blue">Liquidity Provider</span> to my heart?</h2>"#,
        r#"<p class="card-note">This is a one-way mainnet launch, no testnet &amp; no going back.</p>"#,
        r#"<div class="button-row">"#,
    ));
    let _ = write!(
        out,
        r#"<button type="button" class="btn-yes glow-pink" data-action="{ACTION_ACCEPT}" aria-label="Yes, confirm the love transaction">YES (Confirm Transaction)</button>"#,
    );
    if reject == RejectControl::InFlow {
        out.push_str(&reject_button("btn-no", None));
    }
    out.push_str("</div></div>");
    out
}

fn reject_button(class: &str, style: Option<&str>) -> String {
    let style = style
        .map(|s| format!(r#" style="{s}""#))
        .unwrap_or_default();
    format!(
        r#"<button type="button" class="{class}" data-action="{ACTION_REJECT}"{style} aria-label="{REJECT_LABEL}">NO (Reject)</button>"#,
    )
}

/// CSS placing the floating button at `pos`
pub fn floating_style(pos: Vec2) -> String {
    format!("transform:translate({:.1}px,{:.1}px)", pos.x, pos.y)
}

/// The escaped button, if it should be on screen
pub fn floating_reject(reject: RejectControl) -> Option<String> {
    match reject {
        RejectControl::Floating(pos) => Some(reject_button(
            "btn-no btn-no-floating",
            Some(&floating_style(pos)),
        )),
        RejectControl::InFlow | RejectControl::Hidden => None,
    }
}

fn envelope() -> String {
    let mut out = String::from(r#"<div class="stage stage-pop" data-stage="confirmed">"#);
    out.push_str(&pixel_heart(36, "card-heart text-pink bounce", None));
    out.push_str(concat!(
        r#"<h2 class="card-title text-pink">Transaction Confirmed!</h2>"#,
        r#"<p class="card-note">You have a special letter waiting for you…</p>"#,
    ));
    let _ = write!(
        out,
        r#"<button type="button" class="envelope-wrapper" data-action="{ACTION_OPEN}" aria-label="Open the envelope">"#,
    );
    out.push_str(concat!(
        r#"<div class="envelope">"#,
        r#"<div class="envelope-back"></div>"#,
        r#"<div class="envelope-fold"></div>"#,
        r#"<div class="envelope-flap"><svg viewBox="0 0 288 110" preserveAspectRatio="none" aria-hidden="true">"#,
        r##"<polygon points="0,0 288,0 144,110" fill="#ff6db8"/></svg></div>"##,
        r#"<div class="envelope-seal"><div class="seal-disc">"#,
    ));
    out.push_str(&pixel_heart(28, "seal-heart", None));
    out.push_str(concat!(
        r#"</div><div class="seal-ring envelope-pulse"></div></div>"#,
        "</div>",
        r#"<p class="envelope-label">Tap to open</p>"#,
        "</button></div>",
    ));
    out
}

fn letter(config: &SiteConfig) -> String {
    let mut out = String::from(r#"<div class="stage stage-rise" data-stage="revealed">"#);
    out.push_str(r#"<div class="letter">"#);
    out.push_str(&pixel_heart(40, "card-heart text-pink float-heart", None));
    let _ = write!(
        out,
        concat!(
            r#"<h2 class="card-title text-pink">Transaction Confirmed!</h2>"#,
            r#"<div class="letter-body">"#,
            r#"<p>You are now my <span class="text-pink strong">{partner}</span>. "#,
            r#"We are officially <span class="text-blue strong">merging our chains</span> "#,
            r#"in <span class="text-gold strong">{city}</span> on "#,
            r#"<span class="text-gold strong">{date}</span> 💕</p>"#,
            "<p>Here is your boarding pass for the same🎫</p>",
            "</div></div>"
        ),
        partner = escape(&config.partner_title),
        city = escape(&config.city),
        date = escape(&config.date_label),
    );
    out.push_str(&boarding_pass(&config.boarding_pass));
    out.push_str(concat!(
        r#"<p class="block-height">Block Height: <span class="text-blue strong">Forever</span>"#,
        " • This transaction is irreversible 💕</p>",
        "</div>",
    ));
    out
}

/// The mock boarding pass
pub fn boarding_pass(pass: &BoardingPass) -> String {
    let mut out = String::from(r#"<div class="boarding-pass"><div class="pass-accent"></div>"#);
    let _ = write!(
        out,
        r#"<div class="pass-header"><div class="pass-airline">{}<span>{}</span></div><span class="pass-kind">Boarding Pass</span></div>"#,
        pixel_heart(18, "text-pink", None),
        escape(&pass.airline),
    );
    let _ = write!(
        out,
        concat!(
            r#"<div class="pass-route">"#,
            r#"<div class="pass-city"><p class="pass-code">{from_code}</p><p class="pass-small">{from_city}</p></div>"#,
            r#"<div class="pass-line"><div class="pass-rule"></div>{heart}<div class="pass-rule"></div></div>"#,
            r#"<div class="pass-city"><p class="pass-code">{to_code}</p><p class="pass-small">{to_city}</p></div>"#,
            "</div>"
        ),
        from_code = escape(&pass.from_code),
        from_city = escape(&pass.from_city),
        heart = pixel_heart(16, "text-pink", None),
        to_code = escape(&pass.to_code),
        to_city = escape(&pass.to_city),
    );
    out.push_str(PERFORATION);

    out.push_str(r#"<div class="pass-grid">"#);
    let details = [
        ("Date", &pass.date, "text-white"),
        ("Gate", &pass.gate, "text-blue"),
        ("Seat", &pass.seat, "text-pink"),
        ("Flight", &pass.flight, "text-gold"),
        ("Class", &pass.class, "text-white"),
        ("Gas Fee", &pass.gas_fee, "text-gold"),
    ];
    for (label, value, tone) in details {
        let _ = write!(
            out,
            r#"<div><p class="pass-label">{label}</p><p class="pass-value {tone}">{}</p></div>"#,
            escape(value),
        );
    }
    out.push_str("</div>");
    out.push_str(PERFORATION);

    let _ = write!(
        out,
        concat!(
            r#"<div class="pass-footer">"#,
            r#"<div><p class="pass-label">Passenger</p><p class="pass-value text-white">{passenger}</p></div>"#,
            r#"<div class="pass-status"><p class="pass-label">Status</p>"#,
            r#"<p class="pass-value text-pink"><span class="status-dot"></span>{status}</p></div>"#,
            "</div>"
        ),
        passenger = escape(&pass.passenger),
        status = escape(&pass.status),
    );
    out.push_str(r#"<div class="pass-accent thin"></div></div>"#);
    out
}

const PERFORATION: &str = concat!(
    r#"<div class="pass-perforation" aria-hidden="true">"#,
    r#"<div class="notch left"></div><div class="dashes"></div><div class="notch right"></div>"#,
    "</div>"
);
