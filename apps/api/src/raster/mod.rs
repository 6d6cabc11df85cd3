//! Rasterization — turns a visual subtree into one large bitmap.
//!
//! The `Rasterizer` trait is the seam between the pagination engine and the pixel
//! backend. The engine only relies on the returned bitmap having the requested
//! width, an opaque background, and the requested scale.

pub mod software;

use async_trait::async_trait;
use image::RgbImage;
use thiserror::Error;

use crate::render::tree::VisualNode;
use crate::theme::{Palette, Rgb};

pub use software::SoftwareRasterizer;

/// Largest canvas edge accepted, px. Matches the limit common browser canvases enforce.
pub const MAX_CANVAS_DIMENSION: u32 = 32_767;
/// Largest canvas area accepted, px².
pub const MAX_CANVAS_AREA: u64 = 268_435_456;
/// Minimum supersampling factor for print-sharp text.
pub const MIN_CAPTURE_SCALE: f32 = 3.0;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("canvas of {width}x{height}px exceeds the rasterizer limits")]
    CanvasTooLarge { width: u64, height: u64 },

    #[error("capture width must be positive")]
    EmptyViewport,

    #[error("image '{src}' could not be included: {reason}")]
    Image { src: String, reason: String },

    #[error("rasterization worker failed: {0}")]
    Worker(String),
}

/// Parameters of one capture.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Logical viewport width the subtree is laid out at, independent of any device.
    pub logical_width: u32,
    /// Supersampling factor applied to the logical size.
    pub scale: f32,
    /// Opaque fill painted before any content.
    pub background: Rgb,
    /// When `true`, images that cannot be decoded or are remote are skipped with a
    /// warning instead of failing the capture.
    pub best_effort_images: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        CaptureOptions {
            logical_width: 794,
            scale: MIN_CAPTURE_SCALE,
            background: Rgb::WHITE,
            best_effort_images: true,
        }
    }
}

/// Full-height pixel image of the captured subtree. Lives for one export only.
#[derive(Debug, Clone)]
pub struct RasterizedSource {
    pub image: RgbImage,
    pub scale: f32,
}

impl RasterizedSource {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Renders `node` with theme tokens bound to `palette`.
    async fn rasterize(
        &self,
        node: &VisualNode,
        palette: &Palette,
        options: &CaptureOptions,
    ) -> Result<RasterizedSource, RasterError>;
}

/// Pixel dimensions for a logical size at `scale`, validated against the canvas limits.
pub fn canvas_size(
    logical_width: f32,
    logical_height: f32,
    scale: f32,
) -> Result<(u32, u32), RasterError> {
    if logical_width <= 0.0 {
        return Err(RasterError::EmptyViewport);
    }
    let width = (logical_width * scale).ceil() as u64;
    let height = (logical_height.max(0.0) * scale).ceil() as u64;
    if width > MAX_CANVAS_DIMENSION as u64
        || height > MAX_CANVAS_DIMENSION as u64
        || width * height > MAX_CANVAS_AREA
    {
        return Err(RasterError::CanvasTooLarge { width, height });
    }
    Ok((width as u32, height as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_scales_and_rounds_up() {
        assert_eq!(canvas_size(794.0, 100.2, 3.0).unwrap(), (2382, 301));
        assert_eq!(canvas_size(10.0, 0.0, 3.0).unwrap(), (30, 0));
    }

    #[test]
    fn test_canvas_size_rejects_oversized() {
        assert!(matches!(
            canvas_size(794.0, 20_000.0, 3.0),
            Err(RasterError::CanvasTooLarge { .. })
        ));
        assert!(matches!(canvas_size(0.0, 10.0, 3.0), Err(RasterError::EmptyViewport)));
    }
}
