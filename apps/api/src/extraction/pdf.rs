//! PDF text extraction.
//!
//! Primary path walks the page tree with `lopdf` so page order is explicit and
//! every page is separated by a blank line. `pdf-extract` is kept as a
//! whole-document fallback for files `lopdf` cannot load or finds no text in.
//! Encrypted files are opened with the empty user password, which covers
//! documents that only carry an owner password.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, warn};

use super::{ExtractError, ExtractedText, FileKind};

pub const PAGE_SEPARATOR: &str = "\n\n";

pub fn extract_pdf(bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    let (failure, page_count) = match extract_pages(bytes) {
        Ok(pages) if pages.iter().any(|p| !p.is_empty()) => {
            debug!(pages = pages.len(), "PDF pages extracted");
            return Ok(ExtractedText {
                page_count: Some(pages.len()),
                text: join_pages(&pages),
                file_kind: FileKind::Pdf,
            });
        }
        Ok(pages) => (None, Some(pages.len())),
        Err(e) => (Some(e), None),
    };

    match &failure {
        Some(e) => warn!("Page-level PDF extraction failed ({e}), trying whole-document fallback"),
        None => warn!("No text on any PDF page, trying whole-document fallback"),
    }

    let text = match extract_whole_document(bytes) {
        Ok(text) => text,
        Err(e) => {
            return Err(match failure {
                // a user password neither extractor can open
                Some(ExtractError::EncryptedPdf) => ExtractError::EncryptedPdf,
                _ => e,
            })
        }
    };

    Ok(ExtractedText {
        text: if text.trim().is_empty() {
            String::new()
        } else {
            join_pages(&[normalize_runs(&text)])
        },
        file_kind: FileKind::Pdf,
        page_count,
    })
}

/// Text of every page, in page-number order.
fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let mut doc = Document::load_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    if doc.is_encrypted() {
        doc.decrypt("").map_err(|e| {
            debug!("Empty user password rejected: {e}");
            ExtractError::EncryptedPdf
        })?;
    }

    // BTreeMap keyed by 1-based page number
    doc.get_pages()
        .into_keys()
        .map(|page_number| {
            doc.extract_text(&[page_number])
                .map(|raw| normalize_runs(&raw))
                .map_err(|e| ExtractError::Pdf(format!("page {page_number}: {e}")))
        })
        .collect()
}

fn extract_whole_document(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs
    panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
        .map_err(|_| ExtractError::Pdf("document structure could not be parsed".to_string()))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Joins a page's text runs with single spaces.
fn normalize_runs(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Each page followed by a blank line, preserving order.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut full_text = String::new();
    for page in pages {
        full_text.push_str(page.as_ref());
        full_text.push_str(PAGE_SEPARATOR);
    }
    full_text
}

#[cfg(test)]
pub(crate) mod testing {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, encryption, Document, Object, ObjectId, Stream, StringFormat};

    /// Standard security handler password padding.
    const PASSWORD_PADDING: [u8; 32] = [
        0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01,
        0x08, 0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53,
        0x69, 0x7A,
    ];

    fn text_operations(text: &str) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]
    }

    fn content_stream(operations: Vec<Operation>) -> Stream {
        Stream::new(dictionary! {}, Content { operations }.encode().unwrap())
    }

    /// Page tree under construction; `font_resources` maps `F1` to Helvetica.
    pub struct PdfBuilder {
        doc: Document,
        pages_id: ObjectId,
        font_resources: ObjectId,
        kids: Vec<Object>,
    }

    impl PdfBuilder {
        pub fn new() -> Self {
            let mut doc = Document::with_version("1.5");
            let pages_id = doc.new_object_id();
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
                "Encoding" => "WinAnsiEncoding",
            });
            let font_resources = doc.add_object(dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            });
            Self { doc, pages_id, font_resources, kids: Vec::new() }
        }

        fn page(mut self, resources: ObjectId, operations: Vec<Operation>) -> Self {
            let content_id = self.doc.add_object(content_stream(operations));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "Contents" => content_id,
                "Resources" => resources,
            });
            self.kids.push(page_id.into());
            self
        }

        pub fn blank_page(self) -> Self {
            let resources = self.font_resources;
            self.page(resources, Vec::new())
        }

        pub fn text_page(self, text: &str) -> Self {
            let resources = self.font_resources;
            self.page(resources, text_operations(text))
        }

        /// A page whose only content is a form XObject drawing `text`.
        pub fn form_page(mut self, text: &str) -> Self {
            let mut form = content_stream(text_operations(text));
            form.dict.set("Type", "XObject");
            form.dict.set("Subtype", "Form");
            form.dict.set("BBox", vec![0.into(), 0.into(), 595.into(), 842.into()]);
            form.dict.set("Resources", self.font_resources);
            let form_id = self.doc.add_object(form);
            let resources = self.doc.add_object(dictionary! {
                "XObject" => dictionary! { "X1" => form_id },
            });
            self.page(resources, vec![Operation::new("Do", vec!["X1".into()])])
        }

        pub fn build(mut self) -> Document {
            let count = self.kids.len() as i64;
            self.doc.objects.insert(
                self.pages_id,
                Object::Dictionary(dictionary! {
                    "Type" => "Pages",
                    "Kids" => self.kids,
                    "Count" => count,
                    "Resources" => self.font_resources,
                    "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                }),
            );
            let catalog_id = self.doc.add_object(dictionary! {
                "Type" => "Catalog",
                "Pages" => self.pages_id,
            });
            self.doc.trailer.set("Root", catalog_id);
            self.doc
        }
    }

    pub fn save(mut doc: Document) -> Vec<u8> {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    /// Builds an in-memory PDF with one Helvetica text line per page.
    pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let builder = pages.iter().fold(PdfBuilder::new(), |b, text| b.text_page(text));
        save(builder.build())
    }

    fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
        let mut s: Vec<u8> = (0..=255).collect();
        let mut j = 0u8;
        for i in 0..256 {
            j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }
        let (mut i, mut j) = (0u8, 0u8);
        data.iter()
            .map(|byte| {
                i = i.wrapping_add(1);
                j = j.wrapping_add(s[i as usize]);
                s.swap(i as usize, j as usize);
                byte ^ s[s[i as usize].wrapping_add(s[j as usize]) as usize]
            })
            .collect()
    }

    /// Encrypts every string and stream with the standard security handler
    /// (40-bit RC4, revision 2) under `user_password`.
    pub fn encrypt(doc: &mut Document, user_password: &str) {
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
            "Length" => 40,
            "P" => -44,
            "O" => Object::String(vec![0x5A; 32], StringFormat::Hexadecimal),
        });
        let file_id = Object::String(b"cvaro-fixture-id".to_vec(), StringFormat::Hexadecimal);
        doc.trailer.set("ID", vec![file_id.clone(), file_id]);
        doc.trailer.set("Encrypt", encrypt_id);

        let key = encryption::get_encryption_key(&*doc, user_password, false).unwrap();
        let check = rc4(&key, &PASSWORD_PADDING);
        doc.get_object_mut(encrypt_id)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .set("U", Object::String(check, StringFormat::Hexadecimal));

        for (&id, object) in doc.objects.iter_mut() {
            if id == encrypt_id {
                continue;
            }
            // RC4 is symmetric
            let Ok(sealed) = encryption::decrypt_object(&key, id, &*object) else {
                continue;
            };
            match object {
                Object::Stream(stream) => stream.set_content(sealed),
                Object::String(content, _) => *content = sealed,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{build_pdf, encrypt, save, PdfBuilder};
    use super::*;

    #[test]
    fn test_join_pages_separates_with_blank_line() {
        assert_eq!(join_pages(&["one", "two"]), "one\n\ntwo\n\n");
    }

    #[test]
    fn test_join_pages_empty_document() {
        assert_eq!(join_pages::<&str>(&[]), "");
    }

    #[test]
    fn test_normalize_runs_collapses_whitespace() {
        assert_eq!(normalize_runs("Jane\n  Doe\tEngineer \n"), "Jane Doe Engineer");
    }

    #[test]
    fn test_multi_page_pdf_preserves_page_order() {
        let bytes = build_pdf(&["Experience Alpha", "Education Bravo", "Projects Charlie"]);
        let extracted = extract_pdf(&bytes).unwrap();

        assert_eq!(extracted.file_kind, FileKind::Pdf);
        assert_eq!(extracted.page_count, Some(3));

        let text = &extracted.text;
        let alpha = text.find("Alpha").expect("page 1 text");
        let bravo = text.find("Bravo").expect("page 2 text");
        let charlie = text.find("Charlie").expect("page 3 text");
        assert!(alpha < bravo && bravo < charlie);
        assert!(text[alpha..bravo].contains(PAGE_SEPARATOR));
        assert!(text[bravo..charlie].contains(PAGE_SEPARATOR));
    }

    #[test]
    fn test_garbage_bytes_fail_as_pdf_error() {
        let err = extract_pdf(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[test]
    fn test_owner_password_only_pdf_is_decrypted() {
        let mut doc = PdfBuilder::new()
            .text_page("Confidential Resume")
            .text_page("Kubernetes Operator")
            .build();
        encrypt(&mut doc, "");
        let bytes = save(doc);
        assert!(Document::load_mem(&bytes).unwrap().is_encrypted());

        let extracted = extract_pdf(&bytes).unwrap();
        assert_eq!(extracted.page_count, Some(2));
        assert_eq!(extracted.text, "Confidential Resume\n\nKubernetes Operator\n\n");
    }

    #[test]
    fn test_user_password_pdf_is_encrypted_error() {
        let mut doc = PdfBuilder::new().text_page("Locked Away").build();
        encrypt(&mut doc, "hunter2");

        let err = extract_pdf(&save(doc)).unwrap_err();
        assert!(matches!(err, ExtractError::EncryptedPdf));
    }

    #[test]
    fn test_form_xobject_text_recovered_by_fallback() {
        // page-level extraction does not follow `Do`, the fallback does
        let bytes = save(PdfBuilder::new().form_page("Portfolio Kubernetes").build());

        let extracted = extract_pdf(&bytes).unwrap();
        assert_eq!(extracted.file_kind, FileKind::Pdf);
        assert_eq!(extracted.page_count, Some(1));
        assert!(extracted.text.contains("Portfolio"));
        assert!(extracted.text.contains("Kubernetes"));
        assert!(extracted.text.ends_with(PAGE_SEPARATOR));
    }

    #[test]
    fn test_textless_pdf_yields_empty_text() {
        let bytes = save(PdfBuilder::new().blank_page().build());

        let extracted = extract_pdf(&bytes).unwrap();
        assert_eq!(extracted.text, "");
        assert_eq!(extracted.page_count, Some(1));
    }
}
