//! Multi-page PDF assembly with `lopdf`. Each page is one full-bleed JPEG image
//! XObject scaled to the page MediaBox.

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::pagination::slicer::PageUnit;
use crate::pagination::PaginationError;

pub struct PdfAssembler {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    unit: PageUnit,
    jpeg_quality: u8,
}

impl PdfAssembler {
    pub fn new(unit: PageUnit, jpeg_quality: u8) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        PdfAssembler {
            doc,
            pages_id,
            page_ids: Vec::new(),
            unit,
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Appends `page` as a new page covering the full page area.
    pub fn add_page(&mut self, page: &RgbImage) -> Result<(), PaginationError> {
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.jpeg_quality).encode_image(page)?;

        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => page.width() as i64,
                "Height" => page.height() as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        let width_pt = self.unit.width_pt();
        let height_pt = self.unit.height_pt();
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        width_pt.into(),
                        0.into(),
                        0.into(),
                        height_pt.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| PaginationError::Pdf(format!("failed to encode page content: {e}")))?;
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width_pt.into(), height_pt.into()],
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
            "Contents" => content_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Writes the page tree, catalog and info dictionary and serializes the file.
    pub fn finish(mut self, title: &str) -> Result<Vec<u8>, PaginationError> {
        if self.page_ids.is_empty() {
            return Err(PaginationError::Pdf("document has no pages".to_string()));
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "Producer" => Object::string_literal(concat!("vitae ", env!("CARGO_PKG_VERSION"))),
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| PaginationError::Pdf(format!("failed to serialize PDF: {e}")))?;
        Ok(bytes)
    }
}
