//! The sequential batch pipeline.

use crate::{files::Batch, ocr::OcrEngine, output, prelude::*};

/// Process every file in the batch, one at a time, in enumeration order.
///
/// Files whose primary output already exists are skipped without an OCR
/// call; that file's presence is the sole resume mechanism. The first error
/// aborts the run, leaving earlier outputs on disk.
#[instrument(level = "debug", skip_all)]
pub async fn process_batch(batch: &Batch, engine: &dyn OcrEngine) -> Result<()> {
    for input_file in &batch.input_files {
        let file_name = input_file
            .file_name()
            .ok_or_else(|| anyhow!("Input path has no file name: {:?}", input_file))?
            .to_string_lossy()
            .into_owned();

        let output_file =
            output::ocr_output_path(&batch.output_directory, &file_name);
        if output_file.exists() {
            println!("{file_name} já foi processado anteriormente.");
            continue;
        }

        println!("Processando {file_name}.");

        let content = tokio::fs::read(input_file)
            .await
            .with_context(|| format!("Failed to read {:?}", input_file))?;
        let document = engine.process(content).await?;
        output::write_outputs(&batch.output_directory, &file_name, &document)
            .await?;

        println!("{file_name} foi processado.");
    }
    Ok(())
}
