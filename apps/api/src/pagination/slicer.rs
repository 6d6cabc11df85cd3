//! Page geometry and slicing arithmetic.
//!
//! The rasterized source is cut into page-height bands from top to bottom. Bands are
//! contiguous, never overlap, and cover the source exactly; only the last band may be
//! shorter than a page. Each band is copied onto a page-sized canvas pre-filled with
//! the theme page fill, so a short last page shows fill, not a seam.

use image::RgbImage;
use serde::Serialize;

use crate::theme::Rgb;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageUnit {
    pub width_mm: f32,
    pub height_mm: f32,
}

pub const A4: PageUnit = PageUnit {
    width_mm: 210.0,
    height_mm: 297.0,
};

impl PageUnit {
    /// Pixel height of one page for a source `source_width_px` wide, keeping the
    /// page aspect ratio. Never less than 1.
    pub fn page_height_px(&self, source_width_px: u32) -> u32 {
        let height = source_width_px as f64 * self.height_mm as f64 / self.width_mm as f64;
        (height.round() as u32).max(1)
    }

    pub fn width_pt(&self) -> f32 {
        self.width_mm * POINTS_PER_MM
    }

    pub fn height_pt(&self) -> f32 {
        self.height_mm * POINTS_PER_MM
    }
}

/// One page's band of the source: rows `[offset_px, offset_px + height_px)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSlice {
    pub index: usize,
    pub offset_px: u32,
    pub height_px: u32,
}

/// Plans the page bands for a source `source_height_px` tall.
///
/// Yields `ceil(H / P)` slices, and exactly one when `H <= P`. A zero-height source
/// still yields one (empty) slice so the output always has a page.
pub fn plan_slices(source_height_px: u32, page_height_px: u32) -> Vec<PageSlice> {
    let page_height_px = page_height_px.max(1);
    if source_height_px == 0 {
        return vec![PageSlice {
            index: 0,
            offset_px: 0,
            height_px: 0,
        }];
    }

    let mut slices = Vec::with_capacity(source_height_px.div_ceil(page_height_px) as usize);
    let mut offset = 0u32;
    while offset < source_height_px {
        let remaining = source_height_px - offset;
        slices.push(PageSlice {
            index: slices.len(),
            offset_px: offset,
            height_px: page_height_px.min(remaining),
        });
        offset += page_height_px;
    }
    slices
}

/// Builds one output page: a `page_height_px`-tall canvas the width of the source,
/// filled with `fill`, with the slice's band drawn at the origin.
pub fn compose_page(source: &RgbImage, slice: &PageSlice, page_height_px: u32, fill: Rgb) -> RgbImage {
    let width = source.width();
    let mut page = RgbImage::from_pixel(width, page_height_px, fill.to_pixel());

    // Clamp to what the source actually holds below the offset.
    let available = source.height().saturating_sub(slice.offset_px);
    let rows = slice.height_px.min(available).min(page_height_px);
    if rows == 0 || width == 0 {
        return page;
    }

    let band = image::imageops::crop_imm(source, 0, slice.offset_px, width, rows).to_image();
    image::imageops::replace(&mut page, &band, 0, 0);
    page
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts the slices tile [0, h) exactly.
    fn assert_tiles(slices: &[PageSlice], h: u32, p: u32) {
        let mut expected_offset = 0;
        for (i, slice) in slices.iter().enumerate() {
            assert_eq!(slice.index, i);
            assert_eq!(slice.offset_px, expected_offset, "gap or overlap at slice {i}");
            if i + 1 < slices.len() {
                assert_eq!(slice.height_px, p, "non-last slice must be a full page");
            }
            expected_offset += slice.height_px;
        }
        assert_eq!(expected_offset, h);
    }

    #[test]
    fn test_a4_page_height_from_width() {
        assert_eq!(A4.page_height_px(210), 297);
        assert_eq!(A4.page_height_px(2382), 3369);
        assert_eq!(A4.page_height_px(0), 1);
    }

    #[test]
    fn test_a4_points() {
        assert!((A4.width_pt() - 595.28).abs() < 0.01);
        assert!((A4.height_pt() - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_slice_count_is_ceil_and_tiles_source() {
        let p = 297;
        for h in [1, 100, 296, 297, 298, 415, 594, 595, 1000, 2970, 2971, 10_000] {
            let slices = plan_slices(h, p);
            assert_eq!(slices.len() as u32, h.div_ceil(p), "h = {h}");
            assert_tiles(&slices, h, p);
            let last = slices.last().unwrap();
            assert_eq!(last.height_px, h - p * (slices.len() as u32 - 1));
            assert!(last.height_px > 0);
        }
    }

    #[test]
    fn test_short_and_empty_sources_yield_one_page() {
        assert_eq!(plan_slices(10, 297).len(), 1);
        assert_eq!(plan_slices(297, 297).len(), 1);
        let empty = plan_slices(0, 297);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].height_px, 0);
    }

    #[test]
    fn test_compose_partial_last_page_fills_remainder() {
        let content = Rgb(10, 20, 30);
        let fill = Rgb(250, 240, 230);
        // 1.4 pages of content.
        let source = RgbImage::from_pixel(210, 416, content.to_pixel());
        let slices = plan_slices(source.height(), 297);
        assert_eq!(slices.len(), 2);

        let page = compose_page(&source, &slices[1], 297, fill);
        assert_eq!(page.dimensions(), (210, 297));
        assert_eq!(slices[1].height_px, 119);
        assert_eq!(*page.get_pixel(5, 0), content.to_pixel());
        assert_eq!(*page.get_pixel(5, 118), content.to_pixel());
        assert_eq!(*page.get_pixel(5, 119), fill.to_pixel());
        assert_eq!(*page.get_pixel(209, 296), fill.to_pixel());
    }

    #[test]
    fn test_compose_copies_band_at_offset() {
        let mut source = RgbImage::from_pixel(4, 20, image::Rgb([0, 0, 0]));
        source.put_pixel(0, 10, image::Rgb([255, 0, 0]));
        let slice = PageSlice {
            index: 1,
            offset_px: 10,
            height_px: 10,
        };
        let page = compose_page(&source, &slice, 10, Rgb::WHITE);
        assert_eq!(page.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_compose_never_reads_past_source() {
        let source = RgbImage::from_pixel(4, 5, image::Rgb([0, 0, 0]));
        let bogus = PageSlice {
            index: 0,
            offset_px: 3,
            height_px: 10,
        };
        let page = compose_page(&source, &bogus, 10, Rgb::WHITE);
        assert_eq!(page.get_pixel(0, 1).0, [0, 0, 0]);
        assert_eq!(page.get_pixel(0, 2).0, [255, 255, 255]);
    }

    #[test]
    fn test_compose_empty_slice_is_blank_page() {
        let source = RgbImage::new(8, 0);
        let page = compose_page(&source, &plan_slices(0, 11)[0], 11, Rgb(1, 1, 1));
        assert!(page.pixels().all(|p| p.0 == [1, 1, 1]));
    }
}
