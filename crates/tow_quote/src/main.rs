// Rust guideline compliant 2026-08-05

//! Tow-quote entry point -- in-memory demo.
//!
//! Wires the quoter to the demo adapters (synthetic routing, identity
//! shortener, log clipboard, in-memory snapshot store) and runs one full
//! calculation-and-share pass: form -> routed quote -> client message ->
//! driver message -> form snapshot.
//!
//! # Usage
//!
//! ```text
//! RUST_LOG=info cargo run --bin tow_quote
//!
//! # Also show per-leg routing and fare debug output
//! RUST_LOG=debug cargo run --bin tow_quote
//! ```

mod adapters;

// Load the in-memory snapshot adapter directly so it only enters this
// binary's module tree; the sqlite binary uses SqliteSnapshot instead.
#[path = "adapters/in_memory_snapshot.rs"]
mod in_memory_snapshot;

use adapters::demo_routing::DemoRouting;
use adapters::identity_shortener::IdentityShortener;
use adapters::log_clipboard::LogClipboard;
use anyhow::Context as _;
use domain::{AdjustmentKind, LegAdjustment, Quote, QuoteForm, SnapshotStore as _};
use in_memory_snapshot::InMemorySnapshot;
use messages::{Audience, Sharer};
use quoter::{QuoteError, Quoter, QuoterConfig};

/// Sample dispatch-scenario form, standing in for the UI collaborator.
fn sample_form() -> QuoteForm {
    QuoteForm {
        origin: "Base do Guincho, Av. Central 1200, Centro".to_owned(),
        destination: "Rod. Anchieta km 14, pista sul".to_owned(),
        waypoint: "Oficina São Jorge, Rua das Palmeiras 88".to_owned(),
        trip_kind: "dispatch".to_owned(),
        base_fee: "150".to_owned(),
        per_km_rate: "4.50".to_owned(),
        outbound_km: "18".to_owned(),
        return_km: "18".to_owned(),
        free_km: "10".to_owned(),
        surcharge_mode: "percent".to_owned(),
        surcharge_value: "20".to_owned(),
        invoice_enabled: "yes".to_owned(),
        invoice_percent: "6".to_owned(),
        card_fee_percent: "4.98".to_owned(),
        pix_discount_percent: "2".to_owned(),
        cash_discount_percent: "5".to_owned(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize the tracing subscriber before any async work.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // -- Business rules: +900 s dispatch delay on the first leg, x1.3 --
    // -- traffic factor on the client leg, 900 s load/unload buffer.  --
    let quoter_config = QuoterConfig::builder()
        .rule(LegAdjustment { leg_index: 0, kind: AdjustmentKind::AddSeconds(900.0) })
        .rule(LegAdjustment { leg_index: 1, kind: AdjustmentKind::Multiply(1.3) })
        .fixed_buffer_seconds(900.0)
        .build()
        .context("failed to build quoter config")?;
    let quoter = Quoter::new(quoter_config);

    let routing = DemoRouting::new(None);
    let shortener = IdentityShortener::new();
    let clipboard = LogClipboard::new();
    let snapshots = InMemorySnapshot::new();
    let sharer = Sharer::new();

    // Last-quote slot: replaced only after a calculation fully succeeds, so
    // share actions never observe a half-assembled quote.
    let mut last_quote: Option<Quote> = None;

    // Sharing before calculating is a user error surfaced as a notice.
    if let Err(e) = sharer
        .share(last_quote.as_ref(), Audience::Client, &shortener, &clipboard)
        .await
    {
        tracing::warn!("main.share.rejected: {e}");
    }

    let form = sample_form();
    let quote = match quoter.quote_routed(&form, &routing).await {
        Ok(quote) => quote,
        Err(e @ (QuoteError::MissingLocations | QuoteError::Routing(_))) => {
            // Routing problems surface to the user, but the calculation can
            // still proceed from the manually entered distances.
            tracing::warn!("main.routed_quote.failed: {e}, using manual distances");
            quoter.quote_manual(&form)
        }
        Err(e) => return Err(e).context("quote failed"),
    };
    snapshots
        .save(&form.snapshot())
        .await
        .context("failed to save form snapshot")?;
    last_quote = Some(quote);

    let client = sharer
        .share(last_quote.as_ref(), Audience::Client, &shortener, &clipboard)
        .await
        .context("client share failed")?;
    if let Some(e) = &client.clipboard_error {
        tracing::warn!("main.clipboard.notice: {e}, message still printed below");
    }
    println!("--- Mensagem para o cliente ---\n{}", client.message);

    let driver = sharer
        .share(last_quote.as_ref(), Audience::Driver, &shortener, &clipboard)
        .await
        .context("driver share failed")?;
    println!("--- Mensagem para o motorista ---\n{}", driver.message);

    Ok(())
}
