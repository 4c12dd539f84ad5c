//! Pixel-art heart glyph
//!
//! Drawn on a 13x12 grid: two bumps on top, a point at the bottom.

use std::fmt::Write;

/// Filled runs as (x, y, width)
pub const HEART_ROWS: [(u8, u8, u8); 13] = [
    (1, 0, 3),
    (9, 0, 3),
    (0, 1, 5),
    (8, 1, 5),
    (0, 2, 13),
    (0, 3, 13),
    (1, 4, 11),
    (1, 5, 11),
    (2, 6, 9),
    (3, 7, 7),
    (4, 8, 5),
    (5, 9, 3),
    (6, 10, 1),
];

/// Inline SVG for the heart. Always hidden from assistive technology.
pub fn pixel_heart(size: u32, class: &str, style: Option<&str>) -> String {
    let mut out = String::with_capacity(640);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 13 12" width="{size}" height="{size}" class="{class}""#,
    );
    if let Some(style) = style {
        let _ = write!(out, r#" style="{style}""#);
    }
    out.push_str(r#" aria-hidden="true" shape-rendering="crispEdges"><g fill="currentColor">"#);
    for (x, y, w) in HEART_ROWS {
        let _ = write!(out, r#"<rect x="{x}" y="{y}" width="{w}" height="1"/>"#);
    }
    out.push_str("</g></svg>");
    out
}
