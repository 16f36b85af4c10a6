//! Locally rendered stand-in illustrations.

use base64::{engine::general_purpose::STANDARD, Engine as _};

pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

const PALETTE: [&str; 8] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#ffeaa7", "#dda0dd", "#98d8c8", "#f7dc6f",
];

/// (cx, cy, r, opacity) of the decorative circles.
const CIRCLES: [(u32, u32, u32, f32); 3] = [
    (200, 150, 30, 0.7),
    (150, 250, 20, 0.5),
    (250, 280, 25, 0.6),
];

/// Render the placeholder for a part as an SVG data URI.
///
/// The color is picked by `index % PALETTE.len()` and the index is printed on
/// the image, so the same index always yields the same bytes.
pub fn placeholder_image(index: usize) -> String {
    let color = PALETTE[index % PALETTE.len()];

    let circles: String = CIRCLES
        .iter()
        .map(|(cx, cy, r, opacity)| {
            format!(
                r##"<circle cx="{cx}" cy="{cy}" r="{r}" fill="#ffffff" opacity="{opacity}"/>"##
            )
        })
        .collect();

    let svg = format!(
        r##"<svg width="400" height="400" xmlns="http://www.w3.org/2000/svg"><defs><linearGradient id="grad{index}" x1="0%" y1="0%" x2="100%" y2="100%"><stop offset="0%" style="stop-color:{color};stop-opacity:0.8"/><stop offset="100%" style="stop-color:#ffffff;stop-opacity:0.6"/></linearGradient></defs><rect width="400" height="400" fill="url(#grad{index})"/>{circles}<text x="200" y="350" font-family="Arial, sans-serif" font-size="18" fill="#333" text-anchor="middle" font-weight="bold">Story Part {index}</text></svg>"##
    );

    format!("{}{}", SVG_DATA_URI_PREFIX, STANDARD.encode(svg))
}
