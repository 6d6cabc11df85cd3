//! Static font metrics for the five selectable document font families.
//!
//! Widths are in em units and approximate: one base table keyed by glyph class,
//! scaled per family. That is accurate enough to wrap lines and measure the natural
//! height of a document; the rasterizer draws real glyphs when a font file is
//! configured and uses the same advances otherwise, so layout and paint never disagree.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family / weight
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    /// Humanist sans-serif, the editor default.
    #[default]
    Inter,
    /// Old-style serif.
    EbGaramond,
    /// Geometric humanist sans-serif.
    Lato,
    /// Condensed display sans-serif.
    Oswald,
    /// Traditional TeX face.
    ComputerModern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

// ────────────────────────────────────────────────────────────────────────────
// Metrics
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct FontMetrics {
    pub family: FontFamily,
    /// Multiplier applied to the base width table.
    width_scale: f32,
    /// Additional advance for bold glyphs, as a fraction of the regular advance.
    bold_extra: f32,
    /// Ascent above the baseline, em.
    pub ascent: f32,
    /// Lowercase glyph height, em.
    pub x_height: f32,
    /// Uppercase and digit height, em.
    pub cap_height: f32,
}

impl FontMetrics {
    /// Advance width of `c` in em units.
    pub fn char_width(&self, c: char, weight: FontWeight) -> f32 {
        let regular = base_width(c) * self.width_scale;
        match weight {
            FontWeight::Regular => regular,
            FontWeight::Bold => regular * (1.0 + self.bold_extra),
        }
    }

    /// Rendered width of `s` in pixels at `size_px`.
    pub fn measure_str(&self, s: &str, size_px: f32, weight: FontWeight) -> f32 {
        s.chars().map(|c| self.char_width(c, weight)).sum::<f32>() * size_px
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_px`.
    ///
    /// Explicit newlines always break. A single word wider than the line is kept
    /// whole on its own line rather than split.
    pub fn wrap_lines(
        &self,
        text: &str,
        size_px: f32,
        weight: FontWeight,
        max_width_px: f32,
    ) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let space = self.measure_str(" ", size_px, weight);
        let mut lines = Vec::new();

        // A blank paragraph still takes a line; a trailing newline does not.
        for paragraph in text.trim_end_matches('\n').split('\n') {
            let mut current = String::new();
            let mut current_width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_width = self.measure_str(word, size_px, weight);
                if current.is_empty() {
                    current.push_str(word);
                    current_width = word_width;
                } else if current_width + space + word_width > max_width_px {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_width = word_width;
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space + word_width;
                }
            }

            lines.push(current);
        }

        lines
    }
}

/// Base advance table (em), modelled on a humanist sans-serif.
fn base_width(c: char) -> f32 {
    match c {
        ' ' => 0.25,
        'i' | 'j' | 'l' | '!' | '\'' | '|' | '.' | ',' | ':' | ';' => 0.24,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' | '/' => 0.34,
        's' | 'z' | 'c' => 0.46,
        'm' => 0.83,
        'w' => 0.72,
        'M' | 'W' => 0.86,
        'I' => 0.26,
        'J' => 0.40,
        '@' | '%' => 0.92,
        'A'..='Z' => 0.64,
        '0'..='9' => 0.56,
        'a'..='z' => 0.54,
        c if c.is_ascii() => 0.50,
        _ => 0.56,
    }
}

static INTER: FontMetrics = FontMetrics {
    family: FontFamily::Inter,
    width_scale: 1.0,
    bold_extra: 0.06,
    ascent: 0.80,
    x_height: 0.52,
    cap_height: 0.72,
};

static EB_GARAMOND: FontMetrics = FontMetrics {
    family: FontFamily::EbGaramond,
    width_scale: 0.86,
    bold_extra: 0.05,
    ascent: 0.78,
    x_height: 0.40,
    cap_height: 0.65,
};

static LATO: FontMetrics = FontMetrics {
    family: FontFamily::Lato,
    width_scale: 1.05,
    bold_extra: 0.05,
    ascent: 0.80,
    x_height: 0.51,
    cap_height: 0.72,
};

static OSWALD: FontMetrics = FontMetrics {
    family: FontFamily::Oswald,
    width_scale: 0.68,
    bold_extra: 0.04,
    ascent: 0.85,
    x_height: 0.58,
    cap_height: 0.81,
};

static COMPUTER_MODERN: FontMetrics = FontMetrics {
    family: FontFamily::ComputerModern,
    width_scale: 0.92,
    bold_extra: 0.10,
    ascent: 0.75,
    x_height: 0.43,
    cap_height: 0.68,
};

pub fn get_metrics(family: FontFamily) -> &'static FontMetrics {
    match family {
        FontFamily::Inter => &INTER,
        FontFamily::EbGaramond => &EB_GARAMOND,
        FontFamily::Lato => &LATO,
        FontFamily::Oswald => &OSWALD,
        FontFamily::ComputerModern => &COMPUTER_MODERN,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn inter() -> &'static FontMetrics {
        get_metrics(FontFamily::Inter)
    }

    #[test]
    fn test_measure_empty_is_zero() {
        assert_eq!(inter().measure_str("", 16.0, FontWeight::Regular), 0.0);
    }

    #[test]
    fn test_measure_scales_with_size() {
        let small = inter().measure_str("Rust", 10.0, FontWeight::Regular);
        let large = inter().measure_str("Rust", 20.0, FontWeight::Regular);
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let regular = inter().measure_str("Experience", 12.0, FontWeight::Regular);
        let bold = inter().measure_str("Experience", 12.0, FontWeight::Bold);
        assert!(bold > regular);
    }

    #[test]
    fn test_condensed_font_narrower_than_wide_font() {
        let text = "Distributed systems engineer";
        let oswald = get_metrics(FontFamily::Oswald).measure_str(text, 12.0, FontWeight::Regular);
        let lato = get_metrics(FontFamily::Lato).measure_str(text, 12.0, FontWeight::Regular);
        assert!(oswald < lato);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let lines = inter().wrap_lines("Hello world", 12.0, FontWeight::Regular, 500.0);
        assert_eq!(lines, vec!["Hello world".to_string()]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let max = 120.0;
        let lines = inter().wrap_lines(text, 12.0, FontWeight::Regular, max);
        assert!(lines.len() > 1);
        for line in &lines {
            // Every multi-word line must fit.
            if line.contains(' ') {
                assert!(inter().measure_str(line, 12.0, FontWeight::Regular) <= max);
            }
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_keeps_overlong_word_whole() {
        let lines = inter().wrap_lines("a supercalifragilistic b", 12.0, FontWeight::Regular, 30.0);
        assert!(lines.contains(&"supercalifragilistic".to_string()));
    }

    #[test]
    fn test_wrap_honours_newlines_and_blank_text() {
        let lines = inter().wrap_lines("first\nsecond", 12.0, FontWeight::Regular, 500.0);
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
        assert!(inter().wrap_lines("   ", 12.0, FontWeight::Regular, 500.0).is_empty());
    }

    #[test]
    fn test_wrap_keeps_blank_paragraph_as_empty_line() {
        let lines = inter().wrap_lines("a\n\nb\n", 12.0, FontWeight::Regular, 500.0);
        assert_eq!(lines, vec!["a".to_string(), String::new(), "b".to_string()]);
    }

    #[test]
    fn test_all_families_accessible() {
        for family in [
            FontFamily::Inter,
            FontFamily::EbGaramond,
            FontFamily::Lato,
            FontFamily::Oswald,
            FontFamily::ComputerModern,
        ] {
            assert_eq!(get_metrics(family).family, family);
        }
    }
}
