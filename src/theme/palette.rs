use super::catppuccin::{CATPPUCCIN_LATTE, CATPPUCCIN_MOCHA};
use crate::app::persistence::ThemeMode;
use ratatui::style::Color;

pub struct Palette {
    pub base: Color,
    pub mantle: Color,
    pub crust: Color,
    pub text: Color,
    pub subtext0: Color,
    pub subtext1: Color,
    pub surface0: Color,
    pub surface1: Color,
    pub surface2: Color,
    pub overlay0: Color,
    pub overlay1: Color,
    pub overlay2: Color,
    pub blue: Color,
    pub lavender: Color,
    pub sapphire: Color,
    pub sky: Color,
    pub teal: Color,
    pub green: Color,
    pub yellow: Color,
    pub peach: Color,
    pub maroon: Color,
    pub red: Color,
    pub mauve: Color,
    pub pink: Color,
    pub flamingo: Color,
    pub rosewater: Color,
}

pub fn palette_for(mode: ThemeMode) -> &'static Palette {
    match mode {
        ThemeMode::Dark => &CATPPUCCIN_MOCHA,
        ThemeMode::Light => &CATPPUCCIN_LATTE,
    }
}

/// Blends an `Rgb` color towards `bg` by `factor` (0.0 = `bg`, 1.0 = `c`).
/// Other `Color` variants are returned unchanged.
pub fn tint(c: Color, bg: Color, factor: f32) -> Color {
    match (c, bg) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bgc, bb)) => {
            let mix = |fg: u8, back: u8| {
                (f32::from(back) + (f32::from(fg) - f32::from(back)) * factor) as u8
            };
            Color::Rgb(mix(r, br), mix(g, bgc), mix(b, bb))
        }
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_bounds() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(tint(fg, bg, 1.0), fg);
        assert_eq!(tint(fg, bg, 0.0), bg);
        assert_eq!(tint(fg, bg, 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(tint(Color::Red, bg, 0.5), Color::Red);
    }
}
