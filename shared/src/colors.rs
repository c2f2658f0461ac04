/// Parse `#RRGGBB` (or `RRGGBB`) into its channels.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// CSS `rgba(..)` for a hex color at the given opacity. Unparseable input
/// falls back to neutral grey so a bad key never breaks a style attribute.
pub fn rgba_css(hex: &str, alpha: f64) -> String {
    let (r, g, b) = parse_hex_color(hex).unwrap_or((0x66, 0x66, 0x66));
    let alpha = if alpha.is_finite() {
        alpha.clamp(0.0, 1.0)
    } else {
        1.0
    };
    format!("rgba({r}, {g}, {b}, {alpha:.2})")
}
