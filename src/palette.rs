//! Series color palette
//!
//! New series pick their color by position. The first twenty series step
//! through the palette ten entries at a time; after that the index wraps as
//! `((n - 20) * 10 + 1) % PALETTE_SIZE`. The wrap is kept exactly as users
//! have seen it, including the fact that it revisits entries next to ones
//! already handed out.

/// Number of entries in the palette
pub const PALETTE_SIZE: usize = 240;

/// Hue steps per lightness band
const HUES: usize = 24;

/// Palette index for the series that will be added after `existing` others
pub fn palette_index(existing: usize) -> usize {
    if existing < 20 {
        existing * 10
    } else {
        ((existing - 20) * 10 + 1) % PALETTE_SIZE
    }
}

/// Color for the series that will be added after `existing` others
pub fn series_color(existing: usize) -> String {
    palette_color(palette_index(existing))
}

/// Hex color of palette entry `index` (wraps past [`PALETTE_SIZE`])
///
/// Entries walk the hue circle in 15° steps; every 24 entries the lightness
/// moves one band up.
pub fn palette_color(index: usize) -> String {
    let index = index % PALETTE_SIZE;
    let hue = (index % HUES) as f32 * (360.0 / HUES as f32);
    let band = (index / HUES) as f32;
    let lightness = 0.35 + band * 0.04;
    let (r, g, b) = hsl_to_rgb(hue, 0.70, lightness);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}
