// Rust guideline compliant 2026-08-02

//! Demo adapter for the `Routing` port.
//!
//! Synthesizes plausible driving legs between consecutive locations instead
//! of querying a real mapping service: distances in `[3, 45]` km at average
//! speeds in `[30, 60]` km/h. Supports seeded randomness for reproducible
//! tests.

use std::cell::RefCell;

use domain::{Route, RouteLeg, Routing, RoutingError};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// `Routing` adapter that fabricates one leg per consecutive location pair.
#[derive(Debug)]
pub struct DemoRouting {
    /// RNG for leg synthesis; interior mutability required (trait takes `&self`).
    rng: RefCell<StdRng>,
}

impl DemoRouting {
    /// Create a new demo routing adapter.
    ///
    /// `seed = Some(s)` produces deterministic routes; `None` seeds from the OS.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self { rng: RefCell::new(rng) }
    }
}

impl Routing for DemoRouting {
    /// Fabricate one leg per consecutive pair in `locations`.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::Failed` with status `"INVALID_REQUEST"` when
    /// fewer than two locations are supplied.
    async fn route(&self, locations: &[String]) -> Result<Route, RoutingError> {
        if locations.len() < 2 {
            return Err(RoutingError::Failed { status: "INVALID_REQUEST".to_owned() });
        }
        let mut rng = self.rng.borrow_mut();
        let legs = locations
            .windows(2)
            .map(|pair| {
                let distance_km: f64 = rng.random_range(3.0..=45.0);
                let speed_kmh: f64 = rng.random_range(30.0..=60.0);
                let duration_seconds = distance_km / speed_kmh * 3600.0;
                tracing::debug!(
                    "demo_routing.leg: from={} to={} distance_km={distance_km:.1}",
                    pair[0],
                    pair[1]
                );
                RouteLeg { distance_meters: distance_km * 1000.0, duration_seconds }
            })
            .collect();
        Ok(Route { legs })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
