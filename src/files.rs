//! Input enumeration and batch planning.

use std::env;

use crate::{config::Config, prelude::*};

/// A planned batch: the PDF files to process and the directory that will
/// receive their outputs. The output directory is guaranteed to exist.
#[derive(Debug)]
pub struct Batch {
    /// Input PDF paths, in whatever order the filesystem returned them.
    pub input_files: Vec<PathBuf>,

    /// Where the `.ocr.txt` and `.info.txt` files go.
    pub output_directory: PathBuf,
}

/// Plan a batch from the configured directories.
///
/// Returns `Ok(None)` for the two "nothing to do" cases (input directory
/// missing, no PDFs present), after printing the corresponding console
/// message. These are normal exits, not errors.
#[instrument(level = "debug", skip_all)]
pub async fn plan_batch(config: &Config) -> Result<Option<Batch>> {
    let input_directory = resolve(&config.input_directory_name)?;
    let output_directory = resolve(&config.output_directory_name)?;

    if !input_directory.is_dir() {
        println!(
            "Diretório de entrada não encontrado ({}).",
            input_directory.display()
        );
        return Ok(None);
    }

    // Non-recursive scan for `*.pdf`, in directory order. We deliberately do
    // not sort, matching the original batch behavior.
    let mut input_files = Vec::new();
    let mut entries = tokio::fs::read_dir(&input_directory)
        .await
        .with_context(|| {
            format!("Failed to read input directory {:?}", input_directory)
        })?;
    while let Some(entry) = entries.next_entry().await.with_context(|| {
        format!("Failed to read input directory {:?}", input_directory)
    })? {
        let path = entry.path();
        if path.is_file() && path.extension() == Some("pdf".as_ref()) {
            input_files.push(path);
        }
    }

    if input_files.is_empty() {
        println!("Nenhum PDF encontrado.");
        return Ok(None);
    }
    debug!(count = input_files.len(), "Found PDF files");

    tokio::fs::create_dir_all(&output_directory)
        .await
        .with_context(|| {
            format!("Failed to create output directory {:?}", output_directory)
        })?;

    Ok(Some(Batch {
        input_files,
        output_directory,
    }))
}

/// Resolve a configured directory name. Relative paths are resolved against
/// the current directory, absolute paths are used as-is.
fn resolve(dir_name: &str) -> Result<PathBuf> {
    let path = Path::new(dir_name);
    if path.is_absolute() {
        Ok(path.to_owned())
    } else {
        let cwd = env::current_dir().context("Failed to get current directory")?;
        Ok(cwd.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(input: &Path, output: &Path) -> Config {
        Config {
            input_directory_name: input.to_string_lossy().into_owned(),
            output_directory_name: output.to_string_lossy().into_owned(),
            project_id: "my-project".to_owned(),
            location_id: "us".to_owned(),
            processor_id: "abc123".to_owned(),
        }
    }

    #[tokio::test]
    async fn missing_input_directory_is_a_clean_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            test_config(&dir.path().join("does-not-exist"), &dir.path().join("out"));
        let batch = plan_batch(&config).await.unwrap();
        assert!(batch.is_none());
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn empty_input_directory_is_a_clean_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("notes.txt"), "not a pdf").unwrap();
        let config = test_config(&input, &dir.path().join("out"));
        let batch = plan_batch(&config).await.unwrap();
        assert!(batch.is_none());
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn lists_only_top_level_pdfs_and_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("a.pdf"), b"%PDF-1.4").unwrap();
        std::fs::write(input.join("b.pdf"), b"%PDF-1.4").unwrap();
        std::fs::write(input.join("notes.txt"), "not a pdf").unwrap();
        std::fs::create_dir(input.join("nested")).unwrap();
        std::fs::write(input.join("nested").join("c.pdf"), b"%PDF-1.4").unwrap();

        let output = dir.path().join("out").join("deep");
        let config = test_config(&input, &output);
        let batch = plan_batch(&config).await.unwrap().unwrap();

        let mut names = batch
            .input_files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        assert_eq!(names, ["a.pdf", "b.pdf"]);
        assert_eq!(batch.output_directory, output);
        assert!(output.is_dir());
    }

    #[tokio::test]
    async fn directory_named_like_a_pdf_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir(&input).unwrap();
        std::fs::create_dir(input.join("fake.pdf")).unwrap();
        std::fs::write(input.join("real.pdf"), b"%PDF-1.4").unwrap();

        let config = test_config(&input, &dir.path().join("out"));
        let batch = plan_batch(&config).await.unwrap().unwrap();
        assert_eq!(batch.input_files.len(), 1);
        assert!(batch.input_files[0].ends_with("real.pdf"));
    }
}
