//! Theme registry — colour token sets for each selectable document theme.
//!
//! Every theme carries a light and a dark palette. Templates never reference concrete
//! colours for themed surfaces; they emit `Paint::Token` values which are bound to a
//! palette at capture time, so the colour mode active during capture decides the output.
//!
//! Unknown theme ids resolve to `DEFAULT_THEME_ID` rather than failing.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_THEME_ID: &str = "classic-blue";

// ────────────────────────────────────────────────────────────────────────────
// Colour primitives
// ────────────────────────────────────────────────────────────────────────────

/// An opaque sRGB colour. Serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

    /// Parses `#rrggbb` or `rrggbb`. Returns `None` for anything else.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.0, self.1, self.2])
    }

    /// Alpha-composites `self` over `below` with `coverage` in 0.0..=1.0.
    pub fn blend_over(self, below: image::Rgb<u8>, coverage: f32) -> image::Rgb<u8> {
        let a = coverage.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| (top as f32 * a + bottom as f32 * (1.0 - a)).round() as u8;
        image::Rgb([
            mix(self.0, below.0[0]),
            mix(self.1, below.0[1]),
            mix(self.2, below.0[2]),
        ])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::from_hex(&raw).ok_or_else(|| de::Error::custom(format!("invalid colour '{raw}'")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tokens, palettes, modes
// ────────────────────────────────────────────────────────────────────────────

/// Light or dark presentation of the UI. Archival output is always captured in `Light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

/// Symbolic colour slots a template may paint with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeToken {
    /// Accent colour: headings, rules, name banner.
    Primary,
    /// Document surface. Also the page fill used when slicing pages.
    Secondary,
    /// Sidebars and section panels.
    Background,
    /// Body copy.
    Text,
}

/// A paint is either a theme slot or a fixed colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paint {
    Token(ThemeToken),
    Solid(Rgb),
}

impl Paint {
    pub fn resolve(&self, palette: &Palette) -> Rgb {
        match self {
            Paint::Token(token) => palette.get(*token),
            Paint::Solid(rgb) => *rgb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub background: Rgb,
    pub text: Rgb,
}

impl Palette {
    pub fn get(&self, token: ThemeToken) -> Rgb {
        match token {
            ThemeToken::Primary => self.primary,
            ThemeToken::Secondary => self.secondary,
            ThemeToken::Background => self.background,
            ThemeToken::Text => self.text,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub light: Palette,
    pub dark: Palette,
}

impl Theme {
    pub fn palette(&self, mode: ColorMode) -> &Palette {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }

    /// Colour used to pre-fill every output page and the raster background.
    /// Always taken from the light palette: exported documents are archival.
    pub fn page_fill(&self) -> Rgb {
        self.light.secondary
    }
}

const fn palette(primary: Rgb, secondary: Rgb, background: Rgb, text: Rgb) -> Palette {
    Palette {
        primary,
        secondary,
        background,
        text,
    }
}

static THEMES: [Theme; 5] = [
    Theme {
        id: "classic-blue",
        name: "Classic Blue",
        light: palette(Rgb(0x25, 0x63, 0xeb), Rgb(0xff, 0xff, 0xff), Rgb(0xf3, 0xf4, 0xf6), Rgb(0x11, 0x18, 0x27)),
        dark: palette(Rgb(0x60, 0xa5, 0xfa), Rgb(0x1f, 0x29, 0x37), Rgb(0x11, 0x18, 0x27), Rgb(0xf9, 0xfa, 0xfb)),
    },
    Theme {
        id: "emerald",
        name: "Emerald",
        light: palette(Rgb(0x05, 0x96, 0x69), Rgb(0xff, 0xff, 0xff), Rgb(0xec, 0xfd, 0xf5), Rgb(0x06, 0x4e, 0x3b)),
        dark: palette(Rgb(0x34, 0xd3, 0x99), Rgb(0x06, 0x2e, 0x23), Rgb(0x02, 0x2c, 0x22), Rgb(0xec, 0xfd, 0xf5)),
    },
    Theme {
        id: "crimson",
        name: "Crimson",
        light: palette(Rgb(0xb9, 0x1c, 0x1c), Rgb(0xff, 0xff, 0xff), Rgb(0xfe, 0xf2, 0xf2), Rgb(0x1f, 0x29, 0x37)),
        dark: palette(Rgb(0xf8, 0x71, 0x71), Rgb(0x2a, 0x14, 0x14), Rgb(0x1c, 0x0a, 0x0a), Rgb(0xfe, 0xf2, 0xf2)),
    },
    Theme {
        id: "ivory",
        name: "Ivory",
        light: palette(Rgb(0x78, 0x35, 0x0f), Rgb(0xfd, 0xfb, 0xf5), Rgb(0xf5, 0xf0, 0xe1), Rgb(0x29, 0x25, 0x24)),
        dark: palette(Rgb(0xfb, 0xbf, 0x24), Rgb(0x29, 0x25, 0x24), Rgb(0x1c, 0x19, 0x17), Rgb(0xf5, 0xf0, 0xe1)),
    },
    Theme {
        id: "slate",
        name: "Slate",
        light: palette(Rgb(0x33, 0x41, 0x55), Rgb(0xf8, 0xfa, 0xfc), Rgb(0xe2, 0xe8, 0xf0), Rgb(0x0f, 0x17, 0x2a)),
        dark: palette(Rgb(0x94, 0xa3, 0xb8), Rgb(0x0f, 0x17, 0x2a), Rgb(0x02, 0x06, 0x17), Rgb(0xe2, 0xe8, 0xf0)),
    },
];

pub fn all_themes() -> &'static [Theme] {
    &THEMES
}

/// Looks up a theme by id, falling back to the default theme for unknown ids.
pub fn lookup(id: &str) -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.id.eq_ignore_ascii_case(id.trim()))
        .unwrap_or_else(default_theme)
}

pub fn default_theme() -> &'static Theme {
    &THEMES[0]
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_theme() {
        assert_eq!(lookup("ivory").id, "ivory");
        assert_eq!(lookup("  EMERALD ").id, "emerald");
    }

    #[test]
    fn test_lookup_unknown_falls_back_to_default() {
        assert_eq!(lookup("no-such-theme").id, DEFAULT_THEME_ID);
        assert_eq!(lookup("").id, DEFAULT_THEME_ID);
    }

    #[test]
    fn test_theme_ids_are_unique() {
        let mut ids: Vec<&str> = all_themes().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all_themes().len());
    }

    #[test]
    fn test_page_fill_ignores_dark_palette() {
        let theme = lookup("ivory");
        assert_eq!(theme.page_fill(), Rgb(0xfd, 0xfb, 0xf5));
        assert_ne!(theme.page_fill(), theme.dark.secondary);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#2563eb"), Some(Rgb(0x25, 0x63, 0xeb)));
        assert_eq!(Rgb::from_hex("FFFFFF"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb(1, 2, 255).to_hex(), "#0102ff");
    }

    #[test]
    fn test_paint_resolves_against_palette() {
        let theme = default_theme();
        let paint = Paint::Token(ThemeToken::Secondary);
        assert_eq!(paint.resolve(theme.palette(ColorMode::Light)), theme.light.secondary);
        assert_eq!(paint.resolve(theme.palette(ColorMode::Dark)), theme.dark.secondary);
        assert_eq!(Paint::Solid(Rgb::BLACK).resolve(&theme.dark), Rgb::BLACK);
    }

    #[test]
    fn test_blend_over_extremes() {
        let below = image::Rgb([10, 20, 30]);
        assert_eq!(Rgb::WHITE.blend_over(below, 0.0), below);
        assert_eq!(Rgb::WHITE.blend_over(below, 1.0), image::Rgb([255, 255, 255]));
    }
}
