use ratatui::style::Color;

// Team code to accent color, consumed by the renderer only. Codes outside the
// table fall back to DEFAULT_ACCENT.
const TEAM_ACCENTS: &[(&str, Color)] = &[
    ("RCB", Color::Red),
    ("KKR", Color::Magenta),
    ("KXP", Color::LightRed),
    ("CSK", Color::Yellow),
    ("RR", Color::LightMagenta),
    ("MI", Color::Blue),
    ("SH", Color::LightYellow),
    ("DC", Color::LightBlue),
];

pub const DEFAULT_ACCENT: Color = Color::White;

pub fn team_accent(code: &str) -> Color {
    TEAM_ACCENTS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_ACCENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_accents() {
        assert_eq!(team_accent("CSK"), Color::Yellow);
        assert_eq!(team_accent("MI"), Color::Blue);
    }

    #[test]
    fn unknown_code_falls_back_to_default() {
        assert_eq!(team_accent("XYZ"), DEFAULT_ACCENT);
    }
}
