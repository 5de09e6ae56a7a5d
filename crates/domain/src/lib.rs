// Rust guideline compliant 2026-07-28

//! Shared domain types for the tow-service quoting pipeline.
//!
//! Defines the route and fare value types (`Route`, `AdjustedRoute`,
//! `FareInputs`, `FareBreakdown`, `Quote`), the boundary form type
//! (`QuoteForm`) with its flat snapshot mapping, and the hexagonal port
//! traits: `Routing`, `LinkShortener`, `Clipboard`, and `SnapshotStore`.
//! All pipeline components depend on this crate; no other crate is imported here.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Numeric boundary policy
// ---------------------------------------------------------------------------

/// Parse a raw form field as `f64`, defaulting to `0.0`.
///
/// Fail-soft by contract: whitespace is trimmed, and anything unparseable or
/// non-finite (`NaN`, `inf`) becomes `0.0`. Malformed numeric input is never
/// surfaced to the user.
#[must_use]
pub fn parse_or_zero(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Route types
// ---------------------------------------------------------------------------

/// One point-to-point segment of a multi-stop route, as returned by the
/// routing collaborator. Immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    /// Leg distance in meters.
    pub distance_meters: f64,
    /// Raw driving duration in seconds, before any adjustment.
    pub duration_seconds: f64,
}

/// An ordered sequence of legs covering one trip scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Legs in travel order. May be shorter than the scenario expects when
    /// the routing collaborator could not resolve every segment.
    pub legs: Vec<RouteLeg>,
}

/// Trip scenario. Fixes the number of legs the routing collaborator is
/// expected to return and the ordered location list sent to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripKind {
    /// Origin to destination only (2 locations, 1 leg).
    OneWay,
    /// Origin to destination and back (3 locations, 2 legs).
    RoundTrip,
    /// Dispatch from base to the client, delivery stop, return to base
    /// (4 locations, 3 legs).
    Dispatch,
}

impl TripKind {
    /// Number of legs the scenario expects from the routing collaborator.
    #[must_use]
    pub fn expected_legs(self) -> usize {
        match self {
            Self::OneWay => 1,
            Self::RoundTrip => 2,
            Self::Dispatch => 3,
        }
    }

    /// Parse a form value. Unknown values fall back to `OneWay`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "round_trip" => Self::RoundTrip,
            "dispatch" => Self::Dispatch,
            _ => Self::OneWay,
        }
    }

    /// Stable form/snapshot value.
    #[must_use]
    pub fn as_form_value(self) -> &'static str {
        match self {
            Self::OneWay => "one_way",
            Self::RoundTrip => "round_trip",
            Self::Dispatch => "dispatch",
        }
    }
}

// ---------------------------------------------------------------------------
// Leg adjustment rules
// ---------------------------------------------------------------------------

/// Time adjustment applied to a single leg.
///
/// Fixed addition and multiplication are mutually exclusive per leg; the enum
/// makes the invalid combination unrepresentable. Distance is never adjusted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdjustmentKind {
    /// Add a fixed number of seconds (e.g. dispatch delay).
    AddSeconds(f64),
    /// Multiply the duration (e.g. traffic inflation factor).
    Multiply(f64),
}

/// Per-leg-position adjustment rule. At most one rule per leg; legs with no
/// rule pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegAdjustment {
    /// Zero-based position of the leg this rule applies to.
    pub leg_index: usize,
    /// The adjustment to apply.
    pub kind: AdjustmentKind,
}

/// One leg after adjustment, carrying both the original and adjusted
/// durations for itemized sharing messages.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedLeg {
    /// Leg distance in meters, unadjusted.
    pub distance_meters: f64,
    /// Duration as reported by the routing collaborator.
    pub original_seconds: f64,
    /// Duration after the leg's rule (if any) was applied.
    pub adjusted_seconds: f64,
    /// `false` when the routing collaborator returned fewer legs than the
    /// scenario expects; such legs carry zeros instead of failing the quote.
    pub available: bool,
}

/// A route after time adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedRoute {
    /// Per-leg adjusted/original values, one entry per expected leg.
    pub legs: Vec<AdjustedLeg>,
    /// Sum of all leg distances, unadjusted.
    pub total_distance_meters: f64,
    /// Sum of adjusted leg durations plus the route-level fixed buffer.
    pub total_duration_seconds: f64,
}

impl AdjustedRoute {
    /// Total distance in kilometers, for fare computation.
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_meters / 1000.0
    }
}

// ---------------------------------------------------------------------------
// Fare types
// ---------------------------------------------------------------------------

/// How the night surcharge is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurchargeMode {
    /// Percentage of the pre-surcharge subtotal.
    Percent,
    /// Fixed amount added to the subtotal.
    Fixed,
}

/// Night surcharge: a fixed amount or a percentage of the subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surcharge {
    pub mode: SurchargeMode,
    pub value: f64,
}

/// Optional percentage markup applied after the surcharge, modeling
/// formal-receipt fees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTax {
    pub enabled: bool,
    pub percent: f64,
}

/// Per-payment-method adjustment applied to the post-tax total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentAdjustment {
    /// Final amount is `total * (1 + value/100)`.
    SurchargePercent(f64),
    /// Final amount is `total * (1 - value/100)`.
    DiscountPercent(f64),
}

/// A payment method offered for this quote. `adjustment = None` passes the
/// total through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethod {
    /// Display name (e.g. "PIX").
    pub name: String,
    pub adjustment: Option<PaymentAdjustment>,
}

/// Billing inputs for one fare computation. All numeric fields default to
/// zero at the parsing boundary; constructing this type never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct FareInputs {
    pub base_fee: f64,
    pub per_km_rate: f64,
    pub total_distance_km: f64,
    /// Free-distance allowance subtracted before billing, floored at zero.
    pub free_distance_km: f64,
    pub night_surcharge: Surcharge,
    pub invoice_tax: InvoiceTax,
    /// Methods in display order; the breakdown preserves this order.
    pub payment_methods: Vec<PaymentMethod>,
}

/// Final price for one payment method.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPrice {
    pub method: String,
    pub amount: f64,
}

/// Itemized result of one fare computation. Immutable value; no monetary
/// field is rounded -- rounding happens only at presentation time.
#[derive(Debug, Clone, PartialEq)]
pub struct FareBreakdown {
    /// `max(0, total_distance_km - free_distance_km)`.
    pub billable_km: f64,
    /// `billable_km * per_km_rate`.
    pub distance_cost: f64,
    /// Night surcharge amount actually charged.
    pub surcharge_amount: f64,
    /// Base fee + distance cost + surcharge.
    pub subtotal: f64,
    /// Subtotal after the invoice tax (equal to subtotal when disabled).
    pub total: f64,
    /// One entry per configured payment method, input order preserved.
    pub payment_prices: Vec<PaymentPrice>,
}

// ---------------------------------------------------------------------------
// QuoteForm + snapshot mapping
// ---------------------------------------------------------------------------

/// Raw form fields as collected by the UI collaborator, all strings.
///
/// This is the parse-at-the-boundary type: accessors apply the fail-soft
/// numeric policy, and the whole set round-trips to a flat key/value
/// snapshot for the persistence collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteForm {
    pub origin: String,
    pub destination: String,
    /// Delivery stop, used by the `Dispatch` scenario only.
    pub waypoint: String,
    pub trip_kind: String,
    pub base_fee: String,
    pub per_km_rate: String,
    pub outbound_km: String,
    pub return_km: String,
    pub free_km: String,
    /// `"percent"` or `"fixed"`.
    pub surcharge_mode: String,
    pub surcharge_value: String,
    /// `"yes"` enables the invoice tax; anything else disables it.
    pub invoice_enabled: String,
    pub invoice_percent: String,
    pub card_fee_percent: String,
    pub pix_discount_percent: String,
    pub cash_discount_percent: String,
}

impl Default for QuoteForm {
    /// Cleared-form state: empty fields with the invoice dropdown back at
    /// "yes" and a one-way trip, matching the reset behavior of the service.
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            waypoint: String::new(),
            trip_kind: "one_way".to_owned(),
            base_fee: String::new(),
            per_km_rate: String::new(),
            outbound_km: String::new(),
            return_km: String::new(),
            free_km: String::new(),
            surcharge_mode: "percent".to_owned(),
            surcharge_value: String::new(),
            invoice_enabled: "yes".to_owned(),
            invoice_percent: String::new(),
            card_fee_percent: String::new(),
            pix_discount_percent: String::new(),
            cash_discount_percent: String::new(),
        }
    }
}

impl QuoteForm {
    /// Trip scenario selected on the form.
    #[must_use]
    pub fn kind(&self) -> TripKind {
        TripKind::parse(&self.trip_kind)
    }

    /// Night surcharge from the form fields. `"percent"` selects the
    /// percentage mode; any other value (including blank) selects the fixed
    /// mode.
    #[must_use]
    pub fn surcharge(&self) -> Surcharge {
        let mode = if self.surcharge_mode.trim() == "percent" {
            SurchargeMode::Percent
        } else {
            SurchargeMode::Fixed
        };
        Surcharge { mode, value: parse_or_zero(&self.surcharge_value) }
    }

    /// Invoice tax from the form fields. Enabled only by the literal `"yes"`.
    #[must_use]
    pub fn invoice_tax(&self) -> InvoiceTax {
        InvoiceTax {
            enabled: self.invoice_enabled.trim() == "yes",
            percent: parse_or_zero(&self.invoice_percent),
        }
    }

    /// Manually entered total distance: outbound + return kilometers.
    #[must_use]
    pub fn manual_distance_km(&self) -> f64 {
        parse_or_zero(&self.outbound_km) + parse_or_zero(&self.return_km)
    }

    /// Export every field as a flat key -> string mapping for the
    /// persistence collaborator.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        let mut put = |key: &str, value: &str| {
            map.insert(key.to_owned(), value.to_owned());
        };
        put("origin", &self.origin);
        put("destination", &self.destination);
        put("waypoint", &self.waypoint);
        put("trip_kind", &self.trip_kind);
        put("base_fee", &self.base_fee);
        put("per_km_rate", &self.per_km_rate);
        put("outbound_km", &self.outbound_km);
        put("return_km", &self.return_km);
        put("free_km", &self.free_km);
        put("surcharge_mode", &self.surcharge_mode);
        put("surcharge_value", &self.surcharge_value);
        put("invoice_enabled", &self.invoice_enabled);
        put("invoice_percent", &self.invoice_percent);
        put("card_fee_percent", &self.card_fee_percent);
        put("pix_discount_percent", &self.pix_discount_percent);
        put("cash_discount_percent", &self.cash_discount_percent);
        map
    }

    /// Rebuild a form from a snapshot. Keys absent from the mapping keep
    /// their cleared-form defaults; unknown keys are ignored.
    #[must_use]
    pub fn from_snapshot(snapshot: &BTreeMap<String, String>) -> Self {
        let mut form = Self::default();
        let mut take = |key: &str, field: &mut String| {
            if let Some(value) = snapshot.get(key) {
                field.clone_from(value);
            }
        };
        take("origin", &mut form.origin);
        take("destination", &mut form.destination);
        take("waypoint", &mut form.waypoint);
        take("trip_kind", &mut form.trip_kind);
        take("base_fee", &mut form.base_fee);
        take("per_km_rate", &mut form.per_km_rate);
        take("outbound_km", &mut form.outbound_km);
        take("return_km", &mut form.return_km);
        take("free_km", &mut form.free_km);
        take("surcharge_mode", &mut form.surcharge_mode);
        take("surcharge_value", &mut form.surcharge_value);
        take("invoice_enabled", &mut form.invoice_enabled);
        take("invoice_percent", &mut form.invoice_percent);
        take("card_fee_percent", &mut form.card_fee_percent);
        take("pix_discount_percent", &mut form.pix_discount_percent);
        take("cash_discount_percent", &mut form.cash_discount_percent);
        form
    }
}

// ---------------------------------------------------------------------------
// Quote (last-result handle)
// ---------------------------------------------------------------------------

/// One computed quote: the caller-owned handle passed explicitly into share
/// operations.
///
/// Created fresh per calculation and never mutated. A caller keeping a
/// "last quote" slot replaces the whole value only after the computation
/// succeeded, so the previous quote stays valid until then.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub id: uuid::Uuid,
    /// The inputs this quote was computed from.
    pub form: QuoteForm,
    pub fare: FareBreakdown,
    /// Present only when distances came from the routing collaborator.
    pub route: Option<AdjustedRoute>,
}

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Errors from the Routing hexagonal port.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    /// The routing collaborator returned an error status (or timed out).
    #[error("routing failed: {status}")]
    Failed {
        /// Collaborator status string (e.g. `"ZERO_RESULTS"`, `"timeout"`).
        status: String,
    },
}

/// Errors from the LinkShortener hexagonal port.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShortenError {
    /// Shortening failed; callers fall back to the original URL.
    #[error("link shortening failed: {reason}")]
    Failed {
        /// Human-readable description.
        reason: String,
    },
}

/// Errors from the Clipboard hexagonal port.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClipboardError {
    /// The text could not be placed on the clipboard.
    #[error("clipboard write failed: {reason}")]
    WriteFailed {
        /// Human-readable description.
        reason: String,
    },
}

/// Errors from the SnapshotStore hexagonal port.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    /// The store could not be reached or the stored data is unusable.
    #[error("snapshot store unavailable")]
    Unavailable,
}

// ---------------------------------------------------------------------------
// Hexagonal ports
// ---------------------------------------------------------------------------

/// Hexagonal port: route retrieval for an ordered list of locations.
///
/// Single-shot request/response; implementations must resolve (success or
/// failure) without blocking the calculation indefinitely. The quoter
/// depends exclusively on this trait -- never on a concrete adapter.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait Routing {
    /// Resolve driving legs between consecutive locations.
    ///
    /// `locations` has 2 to 4 entries; a successful result carries one leg
    /// per consecutive pair (fewer when a segment could not be resolved).
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Failed`] with the collaborator's status when
    /// no route could be computed.
    async fn route(&self, locations: &[String]) -> Result<Route, RoutingError>;
}

/// Hexagonal port: URL shortening for share messages.
///
/// Failure is always recoverable -- callers substitute the original URL.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait LinkShortener {
    /// Return a shortened equivalent of `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::Failed`] when the collaborator errors or
    /// times out.
    async fn shorten(&self, url: &str) -> Result<String, ShortenError>;
}

/// Hexagonal port: clipboard delivery of a formatted message.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait Clipboard {
    /// Place `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::WriteFailed`] when the write is rejected;
    /// callers treat this as a non-fatal notice.
    async fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Hexagonal port: persistence of the current form snapshot.
///
/// The core holds no persistence logic; it only exposes and re-accepts the
/// flat mapping produced by [`QuoteForm::snapshot`].
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait SnapshotStore {
    /// Replace the stored snapshot with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Unavailable`] when the store cannot be written.
    async fn save(&self, snapshot: &BTreeMap<String, String>) -> Result<(), SnapshotError>;

    /// Load the stored snapshot, or `None` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Unavailable`] when the store cannot be read.
    async fn load(&self) -> Result<Option<BTreeMap<String, String>>, SnapshotError>;

    /// Remove any stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Unavailable`] when the store cannot be written.
    async fn clear(&self) -> Result<(), SnapshotError>;
}
