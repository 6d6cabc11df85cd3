//! Paginated PDF export engine.
//!
//! One export runs these steps in order:
//!   1. resolve the target element (fail before touching anything if missing)
//!   2. isolate an unconstrained off-screen copy of it
//!   3. force light colour mode, wait for the settle delay
//!   4. rasterize the copy at the capture scale
//!   5. restore colour mode and detach the copy (guards, on every exit path)
//!   6. slice the bitmap into page bands and assemble the PDF
//!   7. hand the file to the download sink

pub mod color_mode;
pub mod isolation;
pub mod pdf;
pub mod slicer;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::export::sink::{DownloadSink, SavedFile};
use crate::host::HostDocument;
use crate::raster::{CaptureOptions, RasterError, RasterizedSource, Rasterizer, MIN_CAPTURE_SCALE};
use crate::theme::{ColorMode, Rgb, Theme};

use color_mode::ColorModeGuard;
use isolation::IsolationGuard;
use pdf::PdfAssembler;
use slicer::{compose_page, plan_slices, PageSlice, PageUnit, A4};

#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("element '{0}' not found in document")]
    TargetNotFound(String),

    #[error("capture failed: {0}")]
    Raster(#[from] RasterError),

    #[error("page encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    #[error("could not save '{filename}': {source}")]
    Save {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("pagination worker failed: {0}")]
    Worker(String),
}

#[derive(Debug, Clone)]
pub struct PaginationSettings {
    /// Logical width the isolated copy is laid out at, px.
    pub capture_width_px: u32,
    /// Supersampling factor. Values under `MIN_CAPTURE_SCALE` are raised to it.
    pub scale: f32,
    /// Pause between forcing light mode and capturing.
    pub settle_delay: Duration,
    pub jpeg_quality: u8,
    pub best_effort_images: bool,
    pub page: PageUnit,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        PaginationSettings {
            capture_width_px: 794,
            scale: MIN_CAPTURE_SCALE,
            settle_delay: Duration::from_millis(100),
            jpeg_quality: 92,
            best_effort_images: true,
            page: A4,
        }
    }
}

/// A finished document, not yet saved anywhere.
#[derive(Debug, Clone)]
pub struct PaginatedPdf {
    pub bytes: Vec<u8>,
    pub slices: Vec<PageSlice>,
    pub source_width_px: u32,
    pub source_height_px: u32,
}

impl PaginatedPdf {
    pub fn page_count(&self) -> usize {
        self.slices.len()
    }
}

#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub saved: SavedFile,
    pub page_count: usize,
}

pub struct PaginationEngine {
    rasterizer: Arc<dyn Rasterizer>,
    settings: PaginationSettings,
}

impl PaginationEngine {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, settings: PaginationSettings) -> Self {
        PaginationEngine {
            rasterizer,
            settings,
        }
    }

    /// Captures `element_id` and paginates it into a PDF titled `title`.
    ///
    /// The host's colour mode and off-screen layer are back to their prior state when
    /// this returns, whether it succeeds or not.
    pub async fn render(
        &self,
        host: &HostDocument,
        element_id: &str,
        theme: &Theme,
        title: &str,
    ) -> Result<PaginatedPdf, PaginationError> {
        if host.find(element_id).is_none() {
            return Err(PaginationError::TargetNotFound(element_id.to_string()));
        }

        let stale = host.purge_offscreen();
        if stale > 0 {
            warn!(stale, "removed off-screen copies left behind by an earlier export");
        }

        let fill = theme.page_fill();
        let options = CaptureOptions {
            logical_width: self.settings.capture_width_px,
            scale: self.settings.scale.max(MIN_CAPTURE_SCALE),
            background: fill,
            best_effort_images: self.settings.best_effort_images,
        };

        let source = {
            let isolated = IsolationGuard::isolate(host, element_id)?;
            let _light = ColorModeGuard::force(host.color_mode_flag(), ColorMode::Light);
            if !self.settings.settle_delay.is_zero() {
                tokio::time::sleep(self.settings.settle_delay).await;
            }
            let palette = theme.palette(host.color_mode());
            self.rasterizer
                .rasterize(isolated.node(), palette, &options)
                .await?
        };

        info!(
            element_id,
            width = source.width(),
            height = source.height(),
            scale = source.scale,
            "captured element"
        );

        let source_width_px = source.width();
        let source_height_px = source.height();
        let unit = self.settings.page;
        let quality = self.settings.jpeg_quality;
        let title = title.to_string();

        // Slicing and JPEG encoding are CPU-bound.
        let (bytes, slices) =
            tokio::task::spawn_blocking(move || assemble(&source, unit, fill, quality, &title))
                .await
                .map_err(|e| PaginationError::Worker(e.to_string()))??;

        Ok(PaginatedPdf {
            bytes,
            slices,
            source_width_px,
            source_height_px,
        })
    }

    /// Renders and saves under `filename`. Nothing reaches the sink when any earlier
    /// step fails.
    pub async fn export(
        &self,
        host: &HostDocument,
        element_id: &str,
        theme: &Theme,
        filename: &str,
        sink: &dyn DownloadSink,
    ) -> Result<ExportedPdf, PaginationError> {
        let title = filename.trim_end_matches(".pdf");
        let pdf = self.render(host, element_id, theme, title).await?;
        let saved = sink
            .save(filename, &pdf.bytes)
            .await
            .map_err(|source| PaginationError::Save {
                filename: filename.to_string(),
                source,
            })?;

        info!(
            filename,
            pages = pdf.page_count(),
            size = saved.size_bytes,
            "export saved"
        );
        Ok(ExportedPdf {
            saved,
            page_count: pdf.page_count(),
        })
    }
}

fn assemble(
    source: &RasterizedSource,
    unit: PageUnit,
    fill: Rgb,
    jpeg_quality: u8,
    title: &str,
) -> Result<(Vec<u8>, Vec<PageSlice>), PaginationError> {
    let page_height = unit.page_height_px(source.width());
    let slices = plan_slices(source.height(), page_height);
    debug!(
        source_height = source.height(),
        page_height,
        pages = slices.len(),
        "planned page slices"
    );

    let mut pdf = PdfAssembler::new(unit, jpeg_quality);
    for slice in &slices {
        let page = compose_page(&source.image, slice, page_height, fill);
        pdf.add_page(&page)?;
    }
    Ok((pdf.finish(title)?, slices))
}
