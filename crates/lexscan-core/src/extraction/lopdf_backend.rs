use crate::error::ExtractionError;
use crate::extraction::{PageContent, PdfExtractor};
use lopdf::Document;

/// Pure-Rust extraction backend built on `lopdf`.
///
/// Needs no external binaries. Text comes from the `Tj`/`TJ` operators of
/// each page's content stream, so scanned pages without a text layer come
/// back empty.
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        LopdfExtractor
    }
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
        let doc = Document::load_mem(pdf_bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(ExtractionError::Encrypted);
        }

        let pages = doc.get_pages();
        let mut out = Vec::with_capacity(pages.len());

        for (&page_number, _) in pages.iter() {
            let text = match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    // Unsupported font encodings and the like: the page counts as textless.
                    tracing::warn!(page = page_number, error = %e, "could not extract page text");
                    String::new()
                }
            };
            out.push(PageContent {
                page_number: page_number as usize,
                text,
            });
        }

        Ok(out)
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }
}

#[cfg(test)]
pub(crate) mod test_pdf {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream, StringFormat};

    /// Build an in-memory PDF with one text line per entry of `pages`.
    /// An empty entry produces a page with no text operators.
    pub fn build(pages: &[&str]) -> Vec<u8> {
        save(document(pages))
    }

    /// Like [`build`], with a standard security handler entry in the trailer.
    pub fn build_encrypted(pages: &[&str]) -> Vec<u8> {
        let mut doc = document(pages);
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
            "O" => Object::String(vec![0u8; 32], StringFormat::Hexadecimal),
            "U" => Object::String(vec![0u8; 32], StringFormat::Hexadecimal),
            "P" => -44,
        });
        doc.trailer.set("Encrypt", encrypt_id);
        save(doc)
    }

    fn save(mut doc: Document) -> Vec<u8> {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("save pdf");
        bytes
    }

    fn document(pages: &[&str]) -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let operations = if text.is_empty() {
                vec![]
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(text.as_bytes().to_vec(), StringFormat::Literal)],
                    ),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages.len() as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::extraction::extract_text;
    use proptest::prelude::*;

    proptest! {
        /// Property: bytes without a PDF header are an error, never partial text
        #[test]
        fn non_pdf_bytes_rejected(
            bytes in prop::collection::vec(any::<u8>(), 0..512)
                .prop_filter("PDF header", |b| !b.starts_with(b"%PDF"))
        ) {
            let result = extract_text(&bytes, &LopdfExtractor::new());
            prop_assert!(matches!(result, Err(ExtractionError::Pdf(_))));
        }
    }
}
