// Rust guideline compliant 2026-07-28

//! RouteAdjuster component -- applies per-leg time adjustments and the
//! route-level load/unload buffer to raw routing legs.
//!
//! Entry point: [`RouteAdjuster::adjust`]. Configuration via
//! [`AdjusterConfig::builder`].

use domain::{AdjustedLeg, AdjustedRoute, AdjustmentKind, LegAdjustment, Route};

// ---------------------------------------------------------------------------
// AdjusterError
// ---------------------------------------------------------------------------

/// Errors that can occur while configuring a [`RouteAdjuster`].
#[derive(Debug, thiserror::Error)]
pub enum AdjusterError {
    /// The supplied configuration is invalid.
    #[error("invalid adjuster configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// AdjusterConfig + builder
// ---------------------------------------------------------------------------

/// Configuration for a [`RouteAdjuster`].
///
/// Construct via [`AdjusterConfig::builder`]. The rule table is
/// caller-supplied: which legs get a dispatch delay or a traffic factor is a
/// business decision, not something this component guesses.
#[derive(Debug)]
pub struct AdjusterConfig {
    /// Number of legs the trip scenario expects (range: `[1, ..]`).
    pub expected_legs: usize,
    /// At most one rule per leg position; unruled legs pass through.
    pub rules: Vec<LegAdjustment>,
    /// Load/unload time added once to the route total, never per leg.
    pub fixed_buffer_seconds: f64,
}

/// Builder for [`AdjusterConfig`].
///
/// Obtain via [`AdjusterConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct AdjusterConfigBuilder {
    expected_legs: usize,
    rules: Vec<LegAdjustment>,
    fixed_buffer_seconds: f64,
}

impl AdjusterConfig {
    /// Create a builder. `expected_legs` is the only required parameter.
    ///
    /// Default values: no rules, `fixed_buffer_seconds = 0`.
    #[must_use]
    pub fn builder(expected_legs: usize) -> AdjusterConfigBuilder {
        AdjusterConfigBuilder {
            expected_legs,
            rules: vec![],
            fixed_buffer_seconds: 0.0,
        }
    }
}

impl AdjusterConfigBuilder {
    /// Append one per-leg rule.
    #[must_use]
    pub fn rule(mut self, rule: LegAdjustment) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the route-level load/unload buffer.
    #[must_use]
    pub fn fixed_buffer_seconds(mut self, seconds: f64) -> Self {
        self.fixed_buffer_seconds = seconds;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AdjusterError::InvalidConfig`] when `expected_legs` is zero,
    /// a leg has more than one rule, a rule targets a leg outside
    /// `[0, expected_legs)`, an additive rule is negative, a multiplier is
    /// not positive, the buffer is negative, or any value is non-finite.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<AdjusterConfig, AdjusterError> {
        if self.expected_legs == 0 {
            return Err(AdjusterError::InvalidConfig {
                reason: "expected_legs must be >= 1".to_owned(),
            });
        }
        let mut ruled = vec![false; self.expected_legs];
        for rule in &self.rules {
            if rule.leg_index >= self.expected_legs {
                return Err(AdjusterError::InvalidConfig {
                    reason: format!(
                        "rule targets leg {} but only {} leg(s) are expected",
                        rule.leg_index, self.expected_legs
                    ),
                });
            }
            if ruled[rule.leg_index] {
                return Err(AdjusterError::InvalidConfig {
                    reason: format!("leg {} has more than one rule", rule.leg_index),
                });
            }
            ruled[rule.leg_index] = true;
            match rule.kind {
                AdjustmentKind::AddSeconds(s) if !s.is_finite() || s < 0.0 => {
                    return Err(AdjusterError::InvalidConfig {
                        reason: format!("additive seconds must be finite and >= 0, got {s}"),
                    });
                }
                AdjustmentKind::Multiply(m) if !m.is_finite() || m <= 0.0 => {
                    return Err(AdjusterError::InvalidConfig {
                        reason: format!("multiplier must be finite and > 0, got {m}"),
                    });
                }
                AdjustmentKind::AddSeconds(_) | AdjustmentKind::Multiply(_) => {}
            }
        }
        if !self.fixed_buffer_seconds.is_finite() || self.fixed_buffer_seconds < 0.0 {
            return Err(AdjusterError::InvalidConfig {
                reason: format!(
                    "fixed buffer must be finite and >= 0, got {}",
                    self.fixed_buffer_seconds
                ),
            });
        }
        Ok(AdjusterConfig {
            expected_legs: self.expected_legs,
            rules: self.rules,
            fixed_buffer_seconds: self.fixed_buffer_seconds,
        })
    }
}

// ---------------------------------------------------------------------------
// RouteAdjuster
// ---------------------------------------------------------------------------

/// Applies the configured rule table to a raw [`Route`].
///
/// Pure computation: no ports, no retries. When the routing collaborator
/// fails upstream, this component is simply not invoked.
#[derive(Debug)]
pub struct RouteAdjuster {
    config: AdjusterConfig,
}

impl RouteAdjuster {
    /// Create a new adjuster from `config`.
    #[must_use]
    pub fn new(config: AdjusterConfig) -> Self {
        Self { config }
    }

    /// Adjust `route` according to the configured rule table.
    ///
    /// Each expected leg gets at most one adjustment (fixed addition or
    /// multiplication, as configured); legs with no rule pass through.
    /// A leg the collaborator did not return becomes a zero-valued entry
    /// marked `available = false` rather than failing the quote. Legs beyond
    /// the expected count are ignored -- the scenario fixes N.
    ///
    /// Distance is never inflated: the total distance is the plain sum of
    /// the returned leg distances. The fixed buffer is added once to the
    /// route total.
    #[must_use]
    pub fn adjust(&self, route: &Route) -> AdjustedRoute {
        let mut legs = Vec::with_capacity(self.config.expected_legs);
        let mut total_distance = 0.0;
        let mut total_duration = 0.0;

        for index in 0..self.config.expected_legs {
            let adjusted = match route.legs.get(index) {
                Some(leg) => {
                    let adjusted_seconds = match self.rule_for(index) {
                        Some(AdjustmentKind::AddSeconds(s)) => leg.duration_seconds + s,
                        Some(AdjustmentKind::Multiply(m)) => leg.duration_seconds * m,
                        None => leg.duration_seconds,
                    };
                    AdjustedLeg {
                        distance_meters: leg.distance_meters,
                        original_seconds: leg.duration_seconds,
                        adjusted_seconds,
                        available: true,
                    }
                }
                None => AdjustedLeg {
                    distance_meters: 0.0,
                    original_seconds: 0.0,
                    adjusted_seconds: 0.0,
                    available: false,
                },
            };
            total_distance += adjusted.distance_meters;
            total_duration += adjusted.adjusted_seconds;
            legs.push(adjusted);
        }

        total_duration += self.config.fixed_buffer_seconds;
        tracing::debug!(
            "adjuster.adjust: legs={} distance_m={total_distance} duration_s={total_duration}",
            legs.len()
        );
        AdjustedRoute {
            legs,
            total_distance_meters: total_distance,
            total_duration_seconds: total_duration,
        }
    }

    fn rule_for(&self, leg_index: usize) -> Option<AdjustmentKind> {
        self.config
            .rules
            .iter()
            .find(|r| r.leg_index == leg_index)
            .map(|r| r.kind)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{AdjusterConfig, AdjusterError, RouteAdjuster};
    use domain::{AdjustmentKind, LegAdjustment, Route, RouteLeg};

    fn make_route(durations: &[f64]) -> Route {
        Route {
            legs: durations
                .iter()
                .map(|&duration_seconds| RouteLeg { distance_meters: 10_000.0, duration_seconds })
                .collect(),
        }
    }

    fn add(leg_index: usize, seconds: f64) -> LegAdjustment {
        LegAdjustment { leg_index, kind: AdjustmentKind::AddSeconds(seconds) }
    }

    fn mul(leg_index: usize, factor: f64) -> LegAdjustment {
        LegAdjustment { leg_index, kind: AdjustmentKind::Multiply(factor) }
    }

    // ------------------------------------------------------------------
    // Config validation
    // ------------------------------------------------------------------

    #[test]
    fn config_rejects_zero_expected_legs() {
        let result = AdjusterConfig::builder(0).build();
        assert!(matches!(result, Err(AdjusterError::InvalidConfig { .. })));
    }

    #[test]
    fn config_rejects_duplicate_rule_for_one_leg() {
        let result = AdjusterConfig::builder(2)
            .rule(add(0, 60.0))
            .rule(mul(0, 1.2))
            .build();
        assert!(
            matches!(result, Err(AdjusterError::InvalidConfig { .. })),
            "two rules on leg 0 must be rejected: {result:?}"
        );
    }

    #[test]
    fn config_rejects_out_of_range_rule() {
        let result = AdjusterConfig::builder(1).rule(add(1, 60.0)).build();
        assert!(matches!(result, Err(AdjusterError::InvalidConfig { .. })));
    }

    #[test]
    fn config_rejects_invalid_values() {
        for builder in [
            AdjusterConfig::builder(1).rule(add(0, -1.0)),
            AdjusterConfig::builder(1).rule(add(0, f64::NAN)),
            AdjusterConfig::builder(1).rule(mul(0, 0.0)),
            AdjusterConfig::builder(1).rule(mul(0, f64::INFINITY)),
            AdjusterConfig::builder(1).fixed_buffer_seconds(-5.0),
        ] {
            let result = builder.build();
            assert!(matches!(result, Err(AdjusterError::InvalidConfig { .. })));
        }
    }

    #[test]
    fn config_defaults_are_empty() {
        let config = AdjusterConfig::builder(3).build().unwrap();
        assert!(config.rules.is_empty());
        assert!(config.fixed_buffer_seconds.abs() < f64::EPSILON);
    }

    // ------------------------------------------------------------------
    // Adjustment semantics
    // ------------------------------------------------------------------

    #[test]
    #[expect(clippy::float_cmp, reason = "exact arithmetic on integer-valued inputs")]
    fn dispatch_scenario_totals() {
        // 3 legs [1000, 2000, 3000] s, +900 s on leg 0, x1.3 on leg 1,
        // 900 s buffer: (1000+900) + (2000*1.3) + 3000 + 900 = 8400.
        let adjuster = RouteAdjuster::new(
            AdjusterConfig::builder(3)
                .rule(add(0, 900.0))
                .rule(mul(1, 1.3))
                .fixed_buffer_seconds(900.0)
                .build()
                .unwrap(),
        );
        let adjusted = adjuster.adjust(&make_route(&[1000.0, 2000.0, 3000.0]));
        assert_eq!(adjusted.total_duration_seconds, 8400.0);
        assert_eq!(adjusted.legs[0].adjusted_seconds, 1900.0);
        assert_eq!(adjusted.legs[1].adjusted_seconds, 2600.0);
        assert_eq!(adjusted.legs[2].adjusted_seconds, 3000.0);
        // Originals preserved for itemized messages.
        assert_eq!(adjusted.legs[1].original_seconds, 2000.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact arithmetic on integer-valued inputs")]
    fn distance_is_never_inflated() {
        let adjuster = RouteAdjuster::new(
            AdjusterConfig::builder(2)
                .rule(mul(0, 2.0))
                .rule(mul(1, 2.0))
                .build()
                .unwrap(),
        );
        let adjusted = adjuster.adjust(&make_route(&[600.0, 600.0]));
        assert_eq!(adjusted.total_distance_meters, 20_000.0);
        assert_eq!(adjusted.total_distance_km(), 20.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact arithmetic on integer-valued inputs")]
    fn unruled_legs_pass_through() {
        let adjuster =
            RouteAdjuster::new(AdjusterConfig::builder(2).build().unwrap());
        let adjusted = adjuster.adjust(&make_route(&[700.0, 800.0]));
        assert_eq!(adjusted.total_duration_seconds, 1500.0);
        for leg in &adjusted.legs {
            assert_eq!(leg.original_seconds, leg.adjusted_seconds);
            assert!(leg.available);
        }
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact arithmetic on integer-valued inputs")]
    fn buffer_is_added_once_not_per_leg() {
        let adjuster = RouteAdjuster::new(
            AdjusterConfig::builder(3).fixed_buffer_seconds(900.0).build().unwrap(),
        );
        let adjusted = adjuster.adjust(&make_route(&[100.0, 100.0, 100.0]));
        assert_eq!(adjusted.total_duration_seconds, 1200.0);
    }

    // ------------------------------------------------------------------
    // Missing-leg robustness
    // ------------------------------------------------------------------

    #[test]
    #[expect(clippy::float_cmp, reason = "exact arithmetic on integer-valued inputs")]
    fn missing_legs_become_unavailable_zeros() {
        // 1 leg returned where 3 were expected: legs 1 and 2 report zero
        // distance/duration and are marked unavailable; no panic.
        let adjuster = RouteAdjuster::new(
            AdjusterConfig::builder(3)
                .rule(mul(1, 1.3))
                .fixed_buffer_seconds(900.0)
                .build()
                .unwrap(),
        );
        let adjusted = adjuster.adjust(&make_route(&[1000.0]));
        assert_eq!(adjusted.legs.len(), 3);
        assert!(adjusted.legs[0].available);
        for leg in &adjusted.legs[1..] {
            assert!(!leg.available);
            assert_eq!(leg.distance_meters, 0.0);
            assert_eq!(leg.adjusted_seconds, 0.0);
        }
        assert_eq!(adjusted.total_distance_meters, 10_000.0);
        assert_eq!(adjusted.total_duration_seconds, 1900.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact arithmetic on integer-valued inputs")]
    fn extra_legs_are_ignored() {
        let adjuster =
            RouteAdjuster::new(AdjusterConfig::builder(1).build().unwrap());
        let adjusted = adjuster.adjust(&make_route(&[500.0, 9_999.0]));
        assert_eq!(adjusted.legs.len(), 1);
        assert_eq!(adjusted.total_duration_seconds, 500.0);
        assert_eq!(adjusted.total_distance_meters, 10_000.0);
    }
}
