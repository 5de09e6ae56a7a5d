// Rust guideline compliant 2026-08-02

//! Quoter component -- runs one calculation: form fields in, [`Quote`] out.
//!
//! Distances come either from the manually entered fields
//! ([`Quoter::quote_manual`]) or from the `Routing` port followed by the
//! route adjuster ([`Quoter::quote_routed`]). Either way the fare itself is
//! computed by the pure `fare` crate.
//!
//! Configuration via [`QuoterConfig::builder`].

use adjuster::{AdjusterConfig, AdjusterError, RouteAdjuster};
use domain::{LegAdjustment, Quote, QuoteForm, Routing, RoutingError, TripKind};
use fare::{compute_fare, inputs_from_form};

// ---------------------------------------------------------------------------
// QuoteError
// ---------------------------------------------------------------------------

/// Errors that can occur while producing a routed quote.
///
/// Manual quotes never fail: every numeric field falls back to zero.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    /// One or more locations required by the trip scenario are blank.
    /// Surfaced to the user as "fill in all route fields".
    #[error("fill in all route fields")]
    MissingLocations,
    /// The routing collaborator could not compute a route. No fare is
    /// derived from a failed routing response.
    #[error("routing error: {0}")]
    Routing(RoutingError),
    /// The configured rule table is invalid for the requested scenario.
    #[error("adjustment rules rejected: {0}")]
    Rules(AdjusterError),
}

// ---------------------------------------------------------------------------
// QuoterConfig + builder
// ---------------------------------------------------------------------------

/// Caller-supplied business rules for one [`Quoter`].
///
/// Construct via [`QuoterConfig::builder`]. Which legs carry a dispatch
/// delay or traffic factor varies between deployments of the service, so
/// the rule table is configuration rather than code.
#[derive(Debug)]
pub struct QuoterConfig {
    /// Per-leg time rules, validated against the largest scenario.
    pub rules: Vec<LegAdjustment>,
    /// Load/unload buffer added once per routed quote.
    pub fixed_buffer_seconds: f64,
}

/// Builder for [`QuoterConfig`].
///
/// Obtain via [`QuoterConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct QuoterConfigBuilder {
    rules: Vec<LegAdjustment>,
    fixed_buffer_seconds: f64,
}

impl QuoterConfig {
    /// Create a builder. Defaults: no rules, no buffer.
    #[must_use]
    pub fn builder() -> QuoterConfigBuilder {
        QuoterConfigBuilder { rules: vec![], fixed_buffer_seconds: 0.0 }
    }
}

impl QuoterConfigBuilder {
    /// Append one per-leg rule.
    #[must_use]
    pub fn rule(mut self, rule: LegAdjustment) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the load/unload buffer.
    #[must_use]
    pub fn fixed_buffer_seconds(mut self, seconds: f64) -> Self {
        self.fixed_buffer_seconds = seconds;
        self
    }

    /// Validate and build the configuration.
    ///
    /// Validation delegates to the adjuster against the largest scenario
    /// (`Dispatch`, 3 legs), so every rule that could ever apply is checked
    /// up front.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Rules`] for duplicate, out-of-range, or
    /// value-invalid rules and for a negative or non-finite buffer.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<QuoterConfig, QuoteError> {
        let mut probe = AdjusterConfig::builder(TripKind::Dispatch.expected_legs())
            .fixed_buffer_seconds(self.fixed_buffer_seconds);
        for rule in &self.rules {
            probe = probe.rule(*rule);
        }
        probe.build().map_err(QuoteError::Rules)?;
        Ok(QuoterConfig {
            rules: self.rules,
            fixed_buffer_seconds: self.fixed_buffer_seconds,
        })
    }
}

// ---------------------------------------------------------------------------
// Quoter
// ---------------------------------------------------------------------------

/// Produces one fresh [`Quote`] per call.
///
/// Generic over the `Routing` port for zero-cost static dispatch; the
/// dependency is injected per call and no concrete adapter is referenced.
/// The returned quote is the caller-owned handle for share operations --
/// a caller holding a "last quote" slot overwrites it only with a fully
/// assembled replacement.
#[derive(Debug)]
pub struct Quoter {
    config: QuoterConfig,
}

impl Quoter {
    /// Create a new quoter from `config`.
    #[must_use]
    pub fn new(config: QuoterConfig) -> Self {
        Self { config }
    }

    /// Quote from manually entered distances. Never fails; malformed
    /// numeric fields fall back to zero and no route is attached.
    #[must_use]
    pub fn quote_manual(&self, form: &QuoteForm) -> Quote {
        let inputs = inputs_from_form(form, form.manual_distance_km());
        let fare = compute_fare(&inputs);
        let quote = Quote { id: uuid::Uuid::new_v4(), form: form.clone(), fare, route: None };
        tracing::info!(
            "quoter.manual: id={} distance_km={} total={}",
            quote.id,
            inputs.total_distance_km,
            quote.fare.total
        );
        quote
    }

    /// Quote from a routing query: resolve legs for the scenario's location
    /// list, adjust durations, then compute the fare from the routed
    /// distance.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::MissingLocations`] when a required location is
    /// blank (the query is not sent), [`QuoteError::Routing`] when the
    /// collaborator reports a failure (no fare is computed), or
    /// [`QuoteError::Rules`] when the rule table cannot be applied.
    pub async fn quote_routed<R: Routing>(
        &self,
        form: &QuoteForm,
        routing: &R,
    ) -> Result<Quote, QuoteError> {
        let kind = form.kind();
        let locations = scenario_locations(form, kind)?;
        let route = routing.route(&locations).await.map_err(QuoteError::Routing)?;

        let adjusted = self.adjuster_for(kind)?.adjust(&route);
        let inputs = inputs_from_form(form, adjusted.total_distance_km());
        let fare = compute_fare(&inputs);
        let quote = Quote {
            id: uuid::Uuid::new_v4(),
            form: form.clone(),
            fare,
            route: Some(adjusted),
        };
        tracing::info!(
            "quoter.routed: id={} kind={kind:?} distance_km={} total={}",
            quote.id,
            inputs.total_distance_km,
            quote.fare.total
        );
        Ok(quote)
    }

    /// Build the adjuster for `kind`. Rules keyed to legs the scenario does
    /// not have are skipped -- they simply have no position to act on.
    fn adjuster_for(&self, kind: TripKind) -> Result<RouteAdjuster, QuoteError> {
        let expected = kind.expected_legs();
        let mut builder = AdjusterConfig::builder(expected)
            .fixed_buffer_seconds(self.config.fixed_buffer_seconds);
        for rule in self.config.rules.iter().filter(|r| r.leg_index < expected) {
            builder = builder.rule(*rule);
        }
        Ok(RouteAdjuster::new(builder.build().map_err(QuoteError::Rules)?))
    }
}

/// Ordered location list for the routing collaborator, by scenario.
///
/// # Errors
///
/// Returns [`QuoteError::MissingLocations`] when any required field is blank.
fn scenario_locations(form: &QuoteForm, kind: TripKind) -> Result<Vec<String>, QuoteError> {
    let origin = form.origin.trim();
    let destination = form.destination.trim();
    if origin.is_empty() || destination.is_empty() {
        return Err(QuoteError::MissingLocations);
    }
    Ok(match kind {
        TripKind::OneWay => vec![origin.to_owned(), destination.to_owned()],
        TripKind::RoundTrip => {
            vec![origin.to_owned(), destination.to_owned(), origin.to_owned()]
        }
        TripKind::Dispatch => {
            let waypoint = form.waypoint.trim();
            if waypoint.is_empty() {
                return Err(QuoteError::MissingLocations);
            }
            vec![
                origin.to_owned(),
                destination.to_owned(),
                waypoint.to_owned(),
                origin.to_owned(),
            ]
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
