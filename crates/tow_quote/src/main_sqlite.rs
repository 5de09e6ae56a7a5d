// Rust guideline compliant 2026-08-05

//! Tow-quote entry point -- `SQLite` snapshot demo.
//!
//! Identical to the main `tow_quote` binary except that the form snapshot is
//! persisted to a `SQLite` file (`tow_quote.db` in the current working
//! directory) instead of memory: the calculator reopens with the inputs it
//! was last used with. This demonstrates that the hexagonal `SnapshotStore`
//! port is truly swappable; only this entry point and the adapter change.
//!
//! # Usage
//!
//! ```text
//! RUST_LOG=info cargo run --bin tow_quote_sqlite
//! ```
//!
//! The file `tow_quote.db` is created on first run; run twice to see the
//! restored form in action.

mod adapters;

// Load sqlite_snapshot directly so it only enters this binary's module tree,
// avoiding dead_code warnings in the `tow_quote` binary (which uses
// InMemorySnapshot instead).
#[path = "adapters/sqlite_snapshot.rs"]
mod sqlite_snapshot;

use adapters::demo_routing::DemoRouting;
use adapters::identity_shortener::IdentityShortener;
use adapters::log_clipboard::LogClipboard;
use anyhow::Context as _;
use domain::{AdjustmentKind, LegAdjustment, QuoteForm, SnapshotStore as _};
use messages::{Audience, Sharer};
use quoter::{QuoteError, Quoter, QuoterConfig};
use sqlite_snapshot::SqliteSnapshot;

/// Database file created in the current working directory on first run.
///
/// Using the current working directory is acceptable for a demo adapter.
/// A production adapter would read this from configuration or environment.
const DB_URL: &str = "sqlite:tow_quote.db";

/// Sample dispatch-scenario form, used when no snapshot was saved yet.
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
    let sharer = Sharer::new();

    // SqliteSnapshot: opens or creates tow_quote.db in the working directory.
    let snapshots = SqliteSnapshot::new(DB_URL)
        .await
        .context("failed to open SQLite snapshot store")?;

    // Repopulate the form from the previous run when a snapshot exists; a
    // load failure starts clean instead of aborting.
    let form = match snapshots.load().await {
        Ok(Some(snapshot)) => {
            tracing::info!("main.snapshot.restored: keys={}", snapshot.len());
            QuoteForm::from_snapshot(&snapshot)
        }
        Ok(None) => sample_form(),
        Err(e) => {
            tracing::warn!("main.snapshot.load_failed: {e}, starting clean");
            sample_form()
        }
    };

    let quote = match quoter.quote_routed(&form, &routing).await {
        Ok(quote) => quote,
        Err(e @ (QuoteError::MissingLocations | QuoteError::Routing(_))) => {
            tracing::warn!("main.routed_quote.failed: {e}, using manual distances");
            quoter.quote_manual(&form)
        }
        Err(e) => return Err(e).context("quote failed"),
    };
    snapshots
        .save(&form.snapshot())
        .await
        .context("failed to save form snapshot")?;
    let last_quote = Some(quote);

    let client = sharer
        .share(last_quote.as_ref(), Audience::Client, &shortener, &clipboard)
        .await
        .context("client share failed")?;
    println!("--- Mensagem para o cliente ---\n{}", client.message);

    let driver = sharer
        .share(last_quote.as_ref(), Audience::Driver, &shortener, &clipboard)
        .await
        .context("driver share failed")?;
    println!("--- Mensagem para o motorista ---\n{}", driver.message);

    Ok(())
}
