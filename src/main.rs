use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use tracing_subscriber::{
    EnvFilter, Layer as _, filter::Directive, fmt::format::FmtSpan, layer::SubscriberExt,
    util::SubscriberInitExt as _,
};

use self::{
    config::{Config, DEFAULT_CONFIG_PATH, MissingKeyError},
    ocr::{OcrError, documentai::DocumentAiEngine},
    prelude::*,
};

mod config;
mod files;
mod ocr;
mod output;
mod pipeline;
mod prelude;
mod quotes;

/// Batch-OCR the PDF files in a directory with Google Document AI.
///
/// All batch parameters come from the configuration file; running with no
/// arguments processes whatever the configured input directory contains.
#[derive(Debug, Parser)]
#[clap(
    version,
    after_help = r#"
Environment Variables:
  Google Application Default Credentials are used to authenticate against
  Document AI. Run `gcloud auth application-default login`, or point
  GOOGLE_APPLICATION_CREDENTIALS at a service account key.

  These variables may be set in a standard `.env` file.
"#
)]
struct Opts {
    /// Path to the configuration file (JSON or TOML).
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

/// Our entry point. Failures are mapped to distinct exit statuses: 2 for a
/// configuration error, 3 for a failed OCR call, 1 for anything else. The
/// two "nothing to do" cases exit 0.
#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing.
    let directive =
        Directive::from_str("info").expect("built-in directive should be valid");
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    // We can stack multiple layers here if we need to.
    tracing_subscriber::registry().with(subscriber).init();

    // Call our real `main` function now that logging is set up.
    match real_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            exit_code_for(&err)
        }
    }
}

/// Map a top-level error to a process exit status.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if err.is::<MissingKeyError>() {
        ExitCode::from(2)
    } else if err.is::<OcrError>() {
        ExitCode::from(3)
    } else {
        ExitCode::FAILURE
    }
}

/// Our real entry point.
#[instrument(level = "debug", name = "main", skip_all)]
async fn real_main() -> Result<()> {
    // Load environment variables from a `.env` file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let opts = Opts::parse();
    debug!("Parsed options: {:?}", opts);

    // Configuration must be complete before we touch any directory or the
    // network.
    let config = Config::load(&opts.config).await?;

    quotes::print_random_quote().await;

    let Some(batch) = files::plan_batch(&config).await? else {
        return Ok(());
    };

    let engine = DocumentAiEngine::new(&config).await?;
    pipeline::process_batch(&batch, &engine).await
}
