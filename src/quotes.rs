//! Best-effort greeting quote.
//!
//! Before a batch starts we fetch a random Getúlio Vargas quote from the
//! public Pensador API and print it. This is purely cosmetic: any failure is
//! logged at debug level and never affects the run.

use std::time::Duration;

use rand::Rng as _;
use serde::Deserialize;

use crate::prelude::*;

/// The Pensador API endpoint we query.
static QUOTES_URL: &str = "https://pensador-api.vercel.app/?term=Getulio+Vargas&max=50";

/// Give up on the quote fetch after this long.
const QUOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pensador API response payload.
#[derive(Debug, Deserialize)]
struct PensadorResponse {
    frases: Vec<Frase>,
}

/// A single quote.
#[derive(Debug, Deserialize)]
struct Frase {
    texto: String,
}

/// Print a random quote, if we can get one. Infallible by design.
#[instrument(level = "debug", skip_all)]
pub async fn print_random_quote() {
    match fetch_quotes().await {
        Ok(frases) if !frases.is_empty() => {
            println!("Getúlio, és tu?");
            let chosen = rand::rng().random_range(0..frases.len());
            println!("{}", frases[chosen].texto);
        }
        Ok(_) => debug!("Quote API returned no phrases"),
        Err(err) => debug!("Quote fetch failed: {err:#}"),
    }
    println!();
    println!();
}

/// Fetch the quote list from the Pensador API.
async fn fetch_quotes() -> Result<Vec<Frase>> {
    let client = reqwest::Client::builder()
        .timeout(QUOTE_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;
    let response = client
        .get(QUOTES_URL)
        .send()
        .await
        .context("Failed to fetch quotes")?;
    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("Quote API returned status {}", status));
    }
    let response = response
        .json::<PensadorResponse>()
        .await
        .context("Failed to parse quote response")?;
    Ok(response.frases)
}
