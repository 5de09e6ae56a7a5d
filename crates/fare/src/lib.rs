// Rust guideline compliant 2026-07-28

//! FareCalculator component -- turns billing inputs into an itemized
//! breakdown and a per-payment-method price table.
//!
//! Entry points: [`compute_fare`] (pure) and [`inputs_from_form`] (the
//! fail-soft parsing boundary between raw form fields and typed inputs).

use domain::{
    FareBreakdown, FareInputs, PaymentAdjustment, PaymentMethod, PaymentPrice, QuoteForm,
    SurchargeMode, parse_or_zero,
};

// ---------------------------------------------------------------------------
// Boundary parsing
// ---------------------------------------------------------------------------

/// Assemble typed [`FareInputs`] from raw form fields and a total distance.
///
/// `total_distance_km` is supplied by the caller because it may come from
/// either the adjusted route or the manually entered distance fields.
///
/// Numeric fields apply the fail-soft policy (unparseable becomes zero).
/// A payment-method percent field left blank means "no configured
/// adjustment" for that method -- the post-tax total passes through
/// unchanged -- while an explicit `"0"` configures a zero-percent
/// adjustment with the same final price.
#[must_use]
pub fn inputs_from_form(form: &QuoteForm, total_distance_km: f64) -> FareInputs {
    FareInputs {
        base_fee: parse_or_zero(&form.base_fee),
        per_km_rate: parse_or_zero(&form.per_km_rate),
        total_distance_km,
        free_distance_km: parse_or_zero(&form.free_km),
        night_surcharge: form.surcharge(),
        invoice_tax: form.invoice_tax(),
        payment_methods: vec![
            payment_method("Cartão", &form.card_fee_percent, PaymentAdjustment::SurchargePercent),
            payment_method("PIX", &form.pix_discount_percent, PaymentAdjustment::DiscountPercent),
            payment_method(
                "Dinheiro",
                &form.cash_discount_percent,
                PaymentAdjustment::DiscountPercent,
            ),
        ],
    }
}

fn payment_method(
    name: &str,
    raw_percent: &str,
    make: fn(f64) -> PaymentAdjustment,
) -> PaymentMethod {
    let adjustment =
        (!raw_percent.trim().is_empty()).then(|| make(parse_or_zero(raw_percent)));
    PaymentMethod { name: name.to_owned(), adjustment }
}

// ---------------------------------------------------------------------------
// Fare computation
// ---------------------------------------------------------------------------

/// Compute the itemized fare for `inputs`.
///
/// Pure and idempotent: the same inputs always yield the same breakdown,
/// and the call has no side effects. No intermediate value is rounded;
/// rounding is the formatting layer's job so errors never compound across
/// steps.
#[must_use]
pub fn compute_fare(inputs: &FareInputs) -> FareBreakdown {
    let billable_km = (inputs.total_distance_km - inputs.free_distance_km).max(0.0);
    let distance_cost = billable_km * inputs.per_km_rate;
    let before_surcharge = inputs.base_fee + distance_cost;

    let surcharge_amount = match inputs.night_surcharge.mode {
        SurchargeMode::Percent => before_surcharge * inputs.night_surcharge.value / 100.0,
        SurchargeMode::Fixed => inputs.night_surcharge.value,
    };
    let subtotal = before_surcharge + surcharge_amount;

    let total = if inputs.invoice_tax.enabled {
        subtotal * (1.0 + inputs.invoice_tax.percent / 100.0)
    } else {
        subtotal
    };

    let payment_prices = inputs
        .payment_methods
        .iter()
        .map(|method| {
            let amount = match method.adjustment {
                Some(PaymentAdjustment::SurchargePercent(v)) => total * (1.0 + v / 100.0),
                Some(PaymentAdjustment::DiscountPercent(v)) => total * (1.0 - v / 100.0),
                None => total,
            };
            PaymentPrice { method: method.name.clone(), amount }
        })
        .collect();

    tracing::debug!(
        "fare.compute: billable_km={billable_km} subtotal={subtotal} total={total}"
    );
    FareBreakdown {
        billable_km,
        distance_cost,
        surcharge_amount,
        subtotal,
        total,
        payment_prices,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{compute_fare, inputs_from_form};
    use domain::{
        FareInputs, InvoiceTax, PaymentAdjustment, PaymentMethod, QuoteForm, Surcharge,
        SurchargeMode,
    };

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    /// Base fee 100, rate 2, 10 km, no allowance -- the worked reference case.
    fn reference_inputs(surcharge: Surcharge, invoice_tax: InvoiceTax) -> FareInputs {
        FareInputs {
            base_fee: 100.0,
            per_km_rate: 2.0,
            total_distance_km: 10.0,
            free_distance_km: 0.0,
            night_surcharge: surcharge,
            invoice_tax,
            payment_methods: vec![],
        }
    }

    fn no_tax() -> InvoiceTax {
        InvoiceTax { enabled: false, percent: 0.0 }
    }

    // ------------------------------------------------------------------
    // Surcharge modes
    // ------------------------------------------------------------------

    #[test]
    fn percent_surcharge_scales_the_subtotal() {
        let inputs = reference_inputs(
            Surcharge { mode: SurchargeMode::Percent, value: 10.0 },
            no_tax(),
        );
        let fare = compute_fare(&inputs);
        assert_close(fare.distance_cost, 20.0);
        assert_close(fare.surcharge_amount, 12.0);
        assert_close(fare.subtotal, 132.0);
        assert_close(fare.total, 132.0);
    }

    #[test]
    fn fixed_surcharge_is_added_verbatim() {
        let inputs = reference_inputs(
            Surcharge { mode: SurchargeMode::Fixed, value: 15.0 },
            no_tax(),
        );
        let fare = compute_fare(&inputs);
        assert_close(fare.surcharge_amount, 15.0);
        assert_close(fare.subtotal, 135.0);
    }

    // ------------------------------------------------------------------
    // Invoice tax
    // ------------------------------------------------------------------

    #[test]
    fn invoice_tax_applies_after_surcharge() {
        let inputs = reference_inputs(
            Surcharge { mode: SurchargeMode::Percent, value: 10.0 },
            InvoiceTax { enabled: true, percent: 5.0 },
        );
        let fare = compute_fare(&inputs);
        assert_close(fare.subtotal, 132.0);
        assert_close(fare.total, 138.6);
    }

    #[test]
    fn disabled_invoice_tax_leaves_total_at_subtotal() {
        let inputs = reference_inputs(
            Surcharge { mode: SurchargeMode::Percent, value: 10.0 },
            InvoiceTax { enabled: false, percent: 5.0 },
        );
        let fare = compute_fare(&inputs);
        assert_close(fare.total, 132.0);
    }

    // ------------------------------------------------------------------
    // Payment-method prices
    // ------------------------------------------------------------------

    #[test]
    fn payment_adjustments_apply_to_post_tax_total() {
        let mut inputs = reference_inputs(
            Surcharge { mode: SurchargeMode::Percent, value: 10.0 },
            InvoiceTax { enabled: true, percent: 5.0 },
        );
        inputs.payment_methods = vec![
            PaymentMethod {
                name: "Cartão".to_owned(),
                adjustment: Some(PaymentAdjustment::SurchargePercent(5.0)),
            },
            PaymentMethod {
                name: "PIX".to_owned(),
                adjustment: Some(PaymentAdjustment::DiscountPercent(3.0)),
            },
            PaymentMethod { name: "Dinheiro".to_owned(), adjustment: None },
        ];
        let fare = compute_fare(&inputs);
        assert_close(fare.total, 138.6);
        assert_close(fare.payment_prices[0].amount, 145.53);
        assert_close(fare.payment_prices[1].amount, 134.442);
        // Unconfigured method passes the total through bit-identically.
        assert_eq!(fare.payment_prices[2].amount.to_bits(), fare.total.to_bits());
        assert_eq!(fare.payment_prices[2].method, "Dinheiro");
    }

    // ------------------------------------------------------------------
    // Free-distance allowance
    // ------------------------------------------------------------------

    #[test]
    fn billable_distance_is_floored_at_zero() {
        let mut inputs = reference_inputs(
            Surcharge { mode: SurchargeMode::Percent, value: 0.0 },
            no_tax(),
        );
        inputs.free_distance_km = 25.0; // larger than the 10 km driven
        let fare = compute_fare(&inputs);
        assert_close(fare.billable_km, 0.0);
        assert_close(fare.distance_cost, 0.0);
        assert_close(fare.total, 100.0); // base fee only
    }

    #[test]
    fn allowance_reduces_billable_distance() {
        let mut inputs = reference_inputs(
            Surcharge { mode: SurchargeMode::Percent, value: 0.0 },
            no_tax(),
        );
        inputs.free_distance_km = 4.0;
        let fare = compute_fare(&inputs);
        assert_close(fare.billable_km, 6.0);
        assert_close(fare.distance_cost, 12.0);
    }

    // ------------------------------------------------------------------
    // Invariants
    // ------------------------------------------------------------------

    #[test]
    fn total_is_monotone_in_distance() {
        let mut previous = f64::MIN;
        for km in [0.0, 1.0, 5.0, 10.0, 50.0, 250.0] {
            let mut inputs = reference_inputs(
                Surcharge { mode: SurchargeMode::Percent, value: 10.0 },
                InvoiceTax { enabled: true, percent: 5.0 },
            );
            inputs.total_distance_km = km;
            let fare = compute_fare(&inputs);
            assert!(
                fare.total >= previous,
                "total decreased at {km} km: {} < {previous}",
                fare.total
            );
            previous = fare.total;
        }
    }

    #[test]
    fn compute_fare_is_idempotent() {
        let inputs = {
            let mut i = reference_inputs(
                Surcharge { mode: SurchargeMode::Percent, value: 7.5 },
                InvoiceTax { enabled: true, percent: 6.0 },
            );
            i.payment_methods = vec![PaymentMethod {
                name: "PIX".to_owned(),
                adjustment: Some(PaymentAdjustment::DiscountPercent(3.0)),
            }];
            i
        };
        // Bit-identical breakdowns, including every derived float.
        assert_eq!(compute_fare(&inputs), compute_fare(&inputs));
    }

    // ------------------------------------------------------------------
    // Boundary parsing
    // ------------------------------------------------------------------

    #[test]
    fn malformed_form_fields_default_to_zero() {
        let form = QuoteForm {
            base_fee: "abc".to_owned(),
            per_km_rate: String::new(),
            free_km: "1,5".to_owned(), // comma decimals do not parse
            surcharge_value: "oops".to_owned(),
            ..QuoteForm::default()
        };
        let inputs = inputs_from_form(&form, 12.0);
        assert_close(inputs.base_fee, 0.0);
        assert_close(inputs.per_km_rate, 0.0);
        assert_close(inputs.free_distance_km, 0.0);
        assert_close(inputs.night_surcharge.value, 0.0);
        assert_close(inputs.total_distance_km, 12.0);
    }

    #[test]
    fn blank_percent_leaves_method_unconfigured() {
        let form = QuoteForm {
            card_fee_percent: "5".to_owned(),
            pix_discount_percent: String::new(),
            cash_discount_percent: "0".to_owned(),
            ..QuoteForm::default()
        };
        let inputs = inputs_from_form(&form, 0.0);
        assert_eq!(
            inputs.payment_methods[0].adjustment,
            Some(PaymentAdjustment::SurchargePercent(5.0))
        );
        assert_eq!(inputs.payment_methods[1].adjustment, None);
        // Explicit "0" is a configured zero-percent discount, not absence.
        assert_eq!(
            inputs.payment_methods[2].adjustment,
            Some(PaymentAdjustment::DiscountPercent(0.0))
        );
    }

    #[test]
    fn method_order_is_card_pix_cash() {
        let inputs = inputs_from_form(&QuoteForm::default(), 0.0);
        let names: Vec<&str> =
            inputs.payment_methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Cartão", "PIX", "Dinheiro"]);
    }
}
