//! CPU rasterizer over `image` buffers, with optional TrueType glyphs via `rusttype`.
//!
//! Without a configured font, text is drawn as solid glyph blocks at the metric
//! advances, which keeps page geometry exact and is what tests use.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, DynamicImage, RgbImage};
use rusttype::{point, Font, Scale};
use tracing::{debug, warn};

use crate::layout::{get_metrics, layout, DisplayItem, DisplayList, FontWeight, Rect};
use crate::raster::{canvas_size, CaptureOptions, RasterError, RasterizedSource, Rasterizer};
use crate::render::tree::VisualNode;
use crate::theme::{Palette, Rgb};

#[derive(Clone, Default)]
pub struct SoftwareRasterizer {
    font: Option<Arc<Font<'static>>>,
}

impl SoftwareRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given TrueType/OpenType data for glyph outlines.
    pub fn with_font_data(data: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(data).map(|font| SoftwareRasterizer {
            font: Some(Arc::new(font)),
        })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }
}

#[async_trait]
impl Rasterizer for SoftwareRasterizer {
    async fn rasterize(
        &self,
        node: &VisualNode,
        palette: &Palette,
        options: &CaptureOptions,
    ) -> Result<RasterizedSource, RasterError> {
        // Layout and painting are CPU-bound: run them off the async executor.
        let node = node.clone();
        let palette = *palette;
        let options = options.clone();
        let font = self.font.clone();

        tokio::task::spawn_blocking(move || {
            let list = layout(&node, options.logical_width as f32);
            paint(&list, &palette, &options, font.as_deref())
        })
        .await
        .map_err(|e| RasterError::Worker(e.to_string()))?
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Painting
// ────────────────────────────────────────────────────────────────────────────

/// Pixel-space rectangle, half-open: [x0, x1) × [y0, y1).
#[derive(Debug, Clone, Copy)]
struct PixelRect {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl PixelRect {
    fn from_logical(rect: &Rect, scale: f32) -> Self {
        PixelRect {
            x0: (rect.x * scale).round() as i64,
            y0: (rect.y * scale).round() as i64,
            x1: (rect.right() * scale).round() as i64,
            y1: (rect.bottom() * scale).round() as i64,
        }
    }

    fn canvas(image: &RgbImage) -> Self {
        PixelRect {
            x0: 0,
            y0: 0,
            x1: image.width() as i64,
            y1: image.height() as i64,
        }
    }

    fn intersect(self, other: PixelRect) -> PixelRect {
        PixelRect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

struct Painter<'a> {
    canvas: RgbImage,
    palette: &'a Palette,
    options: &'a CaptureOptions,
    font: Option<&'a Font<'static>>,
}

fn paint(
    list: &DisplayList,
    palette: &Palette,
    options: &CaptureOptions,
    font: Option<&Font<'static>>,
) -> Result<RasterizedSource, RasterError> {
    let (width, height) = canvas_size(list.width, list.height, options.scale)?;
    debug!(
        width,
        height,
        items = list.items.len(),
        scale = options.scale,
        "painting capture canvas"
    );

    let mut painter = Painter {
        canvas: RgbImage::from_pixel(width, height, options.background.to_pixel()),
        palette,
        options,
        font,
    };

    for item in &list.items {
        painter.draw(item)?;
    }

    Ok(RasterizedSource {
        image: painter.canvas,
        scale: options.scale,
    })
}

impl Painter<'_> {
    fn bounds(&self, clip: Option<&Rect>) -> PixelRect {
        let canvas = PixelRect::canvas(&self.canvas);
        match clip {
            Some(c) => canvas.intersect(PixelRect::from_logical(c, self.options.scale)),
            None => canvas,
        }
    }

    fn draw(&mut self, item: &DisplayItem) -> Result<(), RasterError> {
        let bounds = self.bounds(item.clip());
        match item {
            DisplayItem::Fill { rect, paint, .. } => {
                let color = paint.resolve(self.palette);
                let area = PixelRect::from_logical(rect, self.options.scale).intersect(bounds);
                self.fill(area, color, 1.0);
            }
            DisplayItem::Text {
                x,
                baseline,
                text,
                size,
                weight,
                family,
                paint,
                ..
            } => {
                let color = paint.resolve(self.palette);
                let metrics = get_metrics(*family);
                let scale = self.options.scale;
                let mut cursor = *x;
                for c in text.chars() {
                    let advance = metrics.char_width(c, *weight) * size;
                    if !c.is_whitespace() {
                        match self.font {
                            Some(font) => {
                                self.draw_glyph(font, c, cursor, *baseline, *size, *weight, color, bounds)
                            }
                            None => {
                                let glyph_height = if c.is_ascii_lowercase() {
                                    metrics.x_height
                                } else {
                                    metrics.cap_height
                                } * size;
                                let block = Rect::new(
                                    cursor + advance * 0.1,
                                    baseline - glyph_height,
                                    advance * 0.8,
                                    glyph_height,
                                );
                                let area = PixelRect::from_logical(&block, scale).intersect(bounds);
                                self.fill(area, color, 1.0);
                            }
                        }
                    }
                    cursor += advance;
                }
            }
            DisplayItem::Image { rect, source, .. } => match decode_image(&source.src) {
                Ok(decoded) => self.draw_image(&decoded, rect, bounds),
                Err(reason) if self.options.best_effort_images => {
                    warn!(src = %abbreviate(&source.src), %reason, "skipping image in capture");
                }
                Err(reason) => {
                    return Err(RasterError::Image {
                        src: abbreviate(&source.src),
                        reason,
                    })
                }
            },
        }
        Ok(())
    }

    fn fill(&mut self, area: PixelRect, color: Rgb, coverage: f32) {
        if area.x1 <= area.x0 || area.y1 <= area.y0 {
            return;
        }
        for y in area.y0..area.y1 {
            for x in area.x0..area.x1 {
                let pixel = self.canvas.get_pixel_mut(x as u32, y as u32);
                *pixel = if coverage >= 1.0 {
                    color.to_pixel()
                } else {
                    color.blend_over(*pixel, coverage)
                };
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_glyph(
        &mut self,
        font: &Font<'static>,
        c: char,
        x: f32,
        baseline: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        bounds: PixelRect,
    ) {
        let scale = self.options.scale;
        let glyph_scale = Scale::uniform(size * scale);
        let origin = point(x * scale, baseline * scale);
        // Synthetic bold: a second pass nudged right by a fraction of the em.
        let passes: &[f32] = match weight {
            FontWeight::Regular => &[0.0],
            FontWeight::Bold => &[0.0, size * scale * 0.04],
        };

        for dx in passes {
            let glyph = font
                .glyph(c)
                .scaled(glyph_scale)
                .positioned(point(origin.x + dx, origin.y));
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x as i64 + gx as i64;
                let py = bb.min.y as i64 + gy as i64;
                if coverage > 0.0 && bounds.contains(px, py) {
                    let pixel = self.canvas.get_pixel_mut(px as u32, py as u32);
                    *pixel = color.blend_over(*pixel, coverage);
                }
            });
        }
    }

    fn draw_image(&mut self, image: &DynamicImage, rect: &Rect, bounds: PixelRect) {
        let target = PixelRect::from_logical(rect, self.options.scale);
        let width = (target.x1 - target.x0).max(0) as u32;
        let height = (target.y1 - target.y0).max(0) as u32;
        if width == 0 || height == 0 {
            return;
        }
        let resized = image::imageops::resize(&image.to_rgba8(), width, height, FilterType::Triangle);
        for (ix, iy, src) in resized.enumerate_pixels() {
            let px = target.x0 + ix as i64;
            let py = target.y0 + iy as i64;
            if !bounds.contains(px, py) {
                continue;
            }
            let [r, g, b, a] = src.0;
            let pixel = self.canvas.get_pixel_mut(px as u32, py as u32);
            *pixel = Rgb(r, g, b).blend_over(*pixel, a as f32 / 255.0);
        }
    }
}

/// Decodes a base64 `data:` URL. Remote URLs are rejected: capture never fetches.
fn decode_image(src: &str) -> Result<DynamicImage, String> {
    let Some(rest) = src.strip_prefix("data:") else {
        return Err("remote images are not fetched during capture".to_string());
    };
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| "malformed data URL".to_string())?;
    if !meta.ends_with(";base64") {
        return Err("only base64 data URLs are supported".to_string());
    }
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("invalid base64 payload: {e}"))?;
    image::load_from_memory(&bytes).map_err(|e| format!("undecodable image: {e}"))
}

fn abbreviate(src: &str) -> String {
    const MAX: usize = 48;
    if src.chars().count() <= MAX {
        src.to_string()
    } else {
        let head: String = src.chars().take(MAX).collect();
        format!("{head}…")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
