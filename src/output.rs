//! Output artifact writing.
//!
//! Each processed input produces exactly two sibling files in the output
//! directory: the extracted text and a per-page metadata file.

use crate::{ocr::OcrDocument, prelude::*};

/// Suffix of the primary text document. Its presence is also the marker that
/// an input has already been processed.
pub static OCR_SUFFIX: &str = ".ocr.txt";

/// Suffix of the per-page info file.
pub static INFO_SUFFIX: &str = ".info.txt";

/// Path of the primary output document for an input file name.
pub fn ocr_output_path(output_directory: &Path, file_name: &str) -> PathBuf {
    output_directory.join(format!("{file_name}{OCR_SUFFIX}"))
}

/// Path of the info file for an input file name.
pub fn info_output_path(output_directory: &Path, file_name: &str) -> PathBuf {
    output_directory.join(format!("{file_name}{INFO_SUFFIX}"))
}

/// Write both output artifacts for one processed document. `file_name` is
/// the input's full file name, including its `.pdf` extension.
#[instrument(level = "debug", skip_all, fields(file_name = %file_name))]
pub async fn write_outputs(
    output_directory: &Path,
    file_name: &str,
    document: &OcrDocument,
) -> Result<()> {
    let ocr_path = ocr_output_path(output_directory, file_name);
    let mut text = document.text.clone();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    tokio::fs::write(&ocr_path, text)
        .await
        .with_context(|| format!("Failed to write {:?}", ocr_path))?;

    let info_path = info_output_path(output_directory, file_name);
    let mut info = document.pages.join("\n");
    if !info.is_empty() {
        info.push('\n');
    }
    tokio::fs::write(&info_path, info)
        .await
        .with_context(|| format!("Failed to write {:?}", info_path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_text_and_info_files() {
        let dir = tempfile::tempdir().unwrap();
        let document = OcrDocument {
            text: "Texto extraído do documento.".to_owned(),
            pages: vec![
                r#"{"pageNumber":1}"#.to_owned(),
                r#"{"pageNumber":2}"#.to_owned(),
            ],
        };
        write_outputs(dir.path(), "laudo.pdf", &document)
            .await
            .unwrap();

        let text =
            std::fs::read_to_string(dir.path().join("laudo.pdf.ocr.txt")).unwrap();
        assert_eq!(text, "Texto extraído do documento.\n");

        let info =
            std::fs::read_to_string(dir.path().join("laudo.pdf.info.txt")).unwrap();
        assert_eq!(info.lines().count(), 2);
        assert_eq!(info.lines().next(), Some(r#"{"pageNumber":1}"#));
    }

    #[tokio::test]
    async fn empty_page_list_writes_empty_info_file() {
        let dir = tempfile::tempdir().unwrap();
        let document = OcrDocument {
            text: "só texto".to_owned(),
            pages: vec![],
        };
        write_outputs(dir.path(), "vazio.pdf", &document)
            .await
            .unwrap();
        let info =
            std::fs::read_to_string(dir.path().join("vazio.pdf.info.txt")).unwrap();
        assert!(info.is_empty());
    }
}
