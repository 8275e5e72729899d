//! Report assembly
//!
//! Captures surfaces in order and places each page image on its own PDF
//! page. An image is scaled to the page width and top-aligned; anything
//! below the page bottom is clipped by the media box.

use crate::capture::{CapturedPage, RasterCapturer, SurfaceCapturer};
use crate::options::ReportOptions;
use crate::render::Surface;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;

/// A finished PDF document
#[derive(Debug, Clone)]
pub struct AssembledReport {
    pub bytes: Vec<u8>,
    /// Planned page numbers that made it into the document, in order
    pub page_numbers: Vec<usize>,
    /// Pages that were skipped
    pub skipped: Vec<CaptureError>,
}

impl AssembledReport {
    /// Whether some planned pages are missing from the document
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.page_numbers.len()
    }
}

/// Capture and assemble surfaces on a blocking thread.
pub async fn assemble(surfaces: Vec<Surface>, options: &ReportOptions) -> Result<AssembledReport> {
    let options = options.clone();
    tokio::task::spawn_blocking(move || assemble_sync(&surfaces, &options)).await?
}

/// Capture and assemble with a [`RasterCapturer`] built from `options`.
pub fn assemble_sync(surfaces: &[Surface], options: &ReportOptions) -> Result<AssembledReport> {
    let mut capturer = RasterCapturer::from_options(options)?;
    assemble_with(surfaces, options, &mut capturer)
}

/// Capture and assemble with a caller-supplied capturer.
///
/// Pages that fail to capture are skipped. Fails only when nothing could
/// be captured at all.
pub fn assemble_with<C: SurfaceCapturer>(
    surfaces: &[Surface],
    options: &ReportOptions,
    capturer: &mut C,
) -> Result<AssembledReport> {
    let (page_width, page_height) = options.page_size_pt();
    let mut builder = DocumentBuilder::new(&options.title);
    let mut page_numbers = Vec::with_capacity(surfaces.len());
    let mut skipped = Vec::new();

    for surface in surfaces {
        match capturer.capture(surface) {
            Ok(page) => {
                if !page.empty_slots.is_empty() {
                    log::warn!(
                        "Page {} kept with empty slot(s): {}",
                        page.page_number,
                        page.empty_slots.join(", ")
                    );
                }
                page_numbers.push(page.page_number);
                builder.add_page(page, page_width, page_height);
            }
            Err(err) => {
                log::warn!("Skipping page {}: {}", err.page_number, err);
                skipped.push(err);
            }
        }
    }

    if page_numbers.is_empty() {
        return Err(ReportError::NoPagesCaptured { failures: skipped });
    }

    let bytes = builder.finish()?;
    log::info!(
        "Assembled report: {} of {} page(s), {} bytes",
        page_numbers.len(),
        surfaces.len(),
        bytes.len()
    );

    Ok(AssembledReport {
        bytes,
        page_numbers,
        skipped,
    })
}

/// Write a finished report to disk
pub async fn save_report(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

// =============================================================================
// Document Building
// =============================================================================

struct DocumentBuilder {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    title: String,
}

impl DocumentBuilder {
    fn new(title: &str) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            title: title.to_string(),
        }
    }

    /// Append one captured page
    fn add_page(&mut self, page: CapturedPage, page_width: f32, page_height: f32) {
        let height = page.height_pt * page_width / page.width_pt;
        let image_id = self.add_image(page);
        let ty = page_height - height;
        let content = format!("q {} 0 0 {} 0 {} cm /Pg Do Q\n", page_width, height, ty);
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut xobjects = Dictionary::new();
        xobjects.set("Pg", Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let page_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(self.pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(page_width),
                    Object::Real(page_height),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]));
        self.kids.push(Object::Reference(page_id));
    }

    /// Store a page image as a DCT-encoded image XObject
    fn add_image(&mut self, page: CapturedPage) -> ObjectId {
        let dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Image".to_vec())),
            ("Width", Object::Integer(page.width_px as i64)),
            ("Height", Object::Integer(page.height_px as i64)),
            ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
            ("BitsPerComponent", Object::Integer(8)),
            ("Filter", Object::Name(b"DCTDecode".to_vec())),
        ]);
        let mut stream = Stream::new(dict, page.jpeg);
        // Already JPEG encoded
        stream.allows_compression = false;
        self.doc.add_object(stream)
    }

    /// Close the page tree and serialize
    fn finish(mut self) -> Result<Vec<u8>> {
        let count = self.kids.len() as i64;
        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.kids)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        let info_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Title", Object::string_literal(self.title.as_str())),
            ("Producer", Object::string_literal("workorder-report")),
        ]));
        self.doc.trailer.set("Info", info_id);

        self.doc.compress();
        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}
