//! OCR using Google Document AI.

use google_cloud_documentai_v1 as documentai;

use documentai::{
    client::DocumentProcessorService,
    model::{RawDocument, document::Page},
};
use google_cloud_gax::error::rpc::Code;

use crate::{config::Config, prelude::*};

use super::{OcrDocument, OcrEngine, OcrError, PDF_MIME_TYPE};

/// OCR engine wrapping the Google Document AI API.
pub struct DocumentAiEngine {
    /// The Document AI client.
    client: DocumentProcessorService,

    /// Full processor resource name, built from the configured project,
    /// location and processor IDs.
    processor_name: String,
}

impl DocumentAiEngine {
    /// Create a new Document AI engine. Credentials come from Application
    /// Default Credentials; the endpoint is location-specific.
    pub async fn new(config: &Config) -> Result<Self> {
        let endpoint =
            format!("https://{}-documentai.googleapis.com", config.location_id);
        let client = DocumentProcessorService::builder()
            .with_endpoint(endpoint)
            .build()
            .await
            .context("Failed to create Document AI client")?;
        let processor_name = format!(
            "projects/{}/locations/{}/processors/{}",
            config.project_id, config.location_id, config.processor_id
        );
        Ok(Self {
            client,
            processor_name,
        })
    }
}

#[async_trait]
impl OcrEngine for DocumentAiEngine {
    #[instrument(level = "debug", skip_all, fields(processor = %self.processor_name))]
    async fn process(&self, content: Vec<u8>) -> Result<OcrDocument> {
        let raw_document = RawDocument::new()
            .set_content(content)
            .set_mime_type(PDF_MIME_TYPE);

        // One synchronous call per document, no retry. A failure here takes
        // down the whole batch.
        let response = self
            .client
            .process_document()
            .set_name(&self.processor_name)
            .set_raw_document(raw_document)
            .send()
            .await
            .map_err(|err| OcrError {
                message: describe_error(&err),
            })?;
        trace!(?response, "Document AI response");

        let document = response.document.ok_or_else(|| OcrError {
            message: "Document AI response did not contain a document".to_owned(),
        })?;
        debug!(
            text_len = document.text.len(),
            page_count = document.pages.len(),
            "Extracted text"
        );

        let pages = document
            .pages
            .into_iter()
            .map(page_info_line)
            .collect::<Result<Vec<_>>>()?;
        Ok(OcrDocument {
            text: document.text,
            pages,
        })
    }
}

/// Render one page's metadata as a single JSON line, with the embedded page
/// image stripped to keep the info file small and text-only.
fn page_info_line(mut page: Page) -> Result<String> {
    page.image = None;
    serde_json::to_string(&page).context("Failed to serialize page metadata")
}

/// Describe a Document AI error, naming the service status code when we have
/// one so that auth and quota failures are recognizable at a glance.
fn describe_error(err: &documentai::Error) -> String {
    if let Some(status) = err.status() {
        format!(
            "Document AI error ({}): {}",
            describe_code(&status.code),
            status.message
        )
    } else {
        format!("Document AI error: {err}")
    }
}

/// Short human-readable label for an rpc status code.
fn describe_code(code: &Code) -> &'static str {
    match code {
        Code::Unauthenticated | Code::PermissionDenied => "authentication failed",
        Code::ResourceExhausted => "quota exceeded",
        Code::InvalidArgument => "invalid document",
        Code::DeadlineExceeded | Code::Unavailable => "service unavailable",
        _ => "request failed",
    }
}

#[cfg(test)]
mod tests {
    use google_cloud_documentai_v1::model::document::page::Image;

    use super::*;

    #[test]
    fn page_info_line_strips_image_data() {
        let page = Page::new().set_page_number(1).set_image(
            Image::new()
                .set_content(vec![0xFFu8; 64])
                .set_mime_type("image/png"),
        );
        let line = page_info_line(page).unwrap();
        assert!(!line.contains("image"), "image data leaked into: {line}");
        assert!(!line.contains('\n'));
        assert!(line.contains("\"pageNumber\""));
    }

    #[test]
    fn page_info_line_is_one_line_per_page() {
        let pages = vec![
            Page::new().set_page_number(1),
            Page::new().set_page_number(2),
        ];
        let lines = pages
            .into_iter()
            .map(page_info_line)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| !line.contains('\n')));
    }
}
