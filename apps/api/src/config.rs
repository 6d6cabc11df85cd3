use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::pagination::PaginationSettings;
use crate::raster::MIN_CAPTURE_SCALE;

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Logical width the export copy is laid out at, px.
    pub capture_width_px: u32,
    pub capture_scale: f32,
    pub settle_delay_ms: u64,
    pub jpeg_quality: u8,
    /// Fail exports on images that cannot be embedded instead of skipping them.
    pub strict_images: bool,
    /// TrueType font used for glyph outlines. Without one, text renders as blocks.
    pub font_path: Option<PathBuf>,
    pub export_archive_dir: Option<PathBuf>,
    pub ai_api_key: Option<String>,
    pub ai_api_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            capture_width_px: 794,
            capture_scale: MIN_CAPTURE_SCALE,
            settle_delay_ms: 100,
            jpeg_quality: 92,
            strict_images: false,
            font_path: None,
            export_archive_dir: None,
            ai_api_key: None,
            ai_api_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let config = Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            capture_width_px: parse_or(&lookup, "CAPTURE_WIDTH_PX", defaults.capture_width_px)?,
            capture_scale: parse_or(&lookup, "CAPTURE_SCALE", defaults.capture_scale)?,
            settle_delay_ms: parse_or(&lookup, "SETTLE_DELAY_MS", defaults.settle_delay_ms)?,
            jpeg_quality: parse_or(&lookup, "JPEG_QUALITY", defaults.jpeg_quality)?,
            strict_images: parse_or(&lookup, "STRICT_IMAGES", defaults.strict_images)?,
            font_path: optional(&lookup, "FONT_PATH").map(PathBuf::from),
            export_archive_dir: optional(&lookup, "EXPORT_ARCHIVE_DIR").map(PathBuf::from),
            ai_api_key: optional(&lookup, "AI_API_KEY"),
            ai_api_url: optional(&lookup, "AI_API_URL"),
        };

        if !config.capture_scale.is_finite() || config.capture_scale < MIN_CAPTURE_SCALE {
            bail!(
                "CAPTURE_SCALE must be a finite number of at least {MIN_CAPTURE_SCALE}, got {}",
                config.capture_scale
            );
        }
        if config.capture_width_px == 0 {
            bail!("CAPTURE_WIDTH_PX must be positive");
        }
        if !(1..=100).contains(&config.jpeg_quality) {
            bail!("JPEG_QUALITY must be between 1 and 100");
        }
        Ok(config)
    }

    pub fn pagination_settings(&self) -> PaginationSettings {
        PaginationSettings {
            capture_width_px: self.capture_width_px,
            scale: self.capture_scale,
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            jpeg_quality: self.jpeg_quality,
            best_effort_images: !self.strict_images,
            ..PaginationSettings::default()
        }
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(make_lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.capture_width_px, 794);
        assert_eq!(config.capture_scale, 3.0);
        assert_eq!(config.settle_delay_ms, 100);
        assert!(config.ai_api_key.is_none());
        assert!(config.pagination_settings().best_effort_images);
    }

    #[test]
    fn test_overrides_parse() {
        let config = Config::from_lookup(make_lookup(&[
            ("PORT", "9000"),
            ("CAPTURE_SCALE", "4"),
            ("SETTLE_DELAY_MS", "0"),
            ("STRICT_IMAGES", "true"),
            ("EXPORT_ARCHIVE_DIR", "/tmp/exports"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.capture_scale, 4.0);
        let settings = config.pagination_settings();
        assert!(settings.settle_delay.is_zero());
        assert!(!settings.best_effort_images);
        assert_eq!(config.export_archive_dir, Some(PathBuf::from("/tmp/exports")));
    }

    #[test]
    fn test_scale_below_three_rejected() {
        let err = Config::from_lookup(make_lookup(&[("CAPTURE_SCALE", "2")])).unwrap_err();
        assert!(err.to_string().contains("CAPTURE_SCALE"));
    }

    #[test]
    fn test_non_finite_scale_rejected() {
        for raw in ["NaN", "inf", "-inf"] {
            let err = Config::from_lookup(make_lookup(&[("CAPTURE_SCALE", raw)])).unwrap_err();
            assert!(err.to_string().contains("CAPTURE_SCALE"), "{raw}");
        }
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Config::from_lookup(make_lookup(&[("PORT", "eighty")])).is_err());
    }

    #[test]
    fn test_blank_optional_is_none() {
        let config = Config::from_lookup(make_lookup(&[("AI_API_KEY", "  ")])).unwrap();
        assert!(config.ai_api_key.is_none());
    }
}
