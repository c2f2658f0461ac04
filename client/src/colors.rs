use m3tacron_shared::BadgeTone;
use m3tacron_shared::colors::rgba_css;

pub const BG: &str = "#0b0d12";
pub const PANEL: &str = "#12151d";
pub const BORDER: &str = "#262a36";
pub const TEXT_PRIMARY: &str = "#e6e6e6";
pub const TEXT_SECONDARY: &str = "#8a8f9c";
pub const ACCENT: &str = "#4facfe";

pub const MONO: &str = "'JetBrains Mono', monospace";
pub const SANS: &str = "'Inter', system-ui, sans-serif";

/// `(text, border, background)` for a badge tone.
pub fn tone_colors(tone: BadgeTone) -> (&'static str, &'static str, &'static str) {
    match tone {
        BadgeTone::Gray => (TEXT_SECONDARY, BORDER, PANEL),
        BadgeTone::Green => ("#4ade80", "rgba(34,197,94,0.35)", "rgba(34,197,94,0.10)"),
        BadgeTone::Orange => ("#fb923c", "rgba(249,115,22,0.35)", "rgba(249,115,22,0.10)"),
    }
}

/// Translucent faction tint for row hover and borders.
pub fn faction_tint(faction_key: &str, alpha: f64) -> String {
    rgba_css(m3tacron_shared::faction_color(faction_key), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_tone_matches_panel_palette() {
        assert_eq!(tone_colors(BadgeTone::Gray), (TEXT_SECONDARY, BORDER, PANEL));
    }

    #[test]
    fn unknown_faction_tint_is_grey() {
        assert_eq!(faction_tint("nobody", 0.2), "rgba(102, 102, 102, 0.20)");
    }
}
