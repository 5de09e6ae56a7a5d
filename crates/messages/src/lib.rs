// Rust guideline compliant 2026-08-02

//! Message assembly and the share workflow.
//!
//! Pure templating over a computed [`Quote`]: pt-BR currency/distance/time
//! formatting, the maps link for the selected trip, and the two audience
//! messages (client with all monetary values, driver with values redacted).
//! [`Sharer::share`] runs the share workflow over the `LinkShortener` and
//! `Clipboard` ports.
//!
//! All rounding in the whole pipeline happens here, at presentation time.

use domain::{Clipboard, ClipboardError, LinkShortener, Quote, QuoteForm, SurchargeMode, TripKind};

// ---------------------------------------------------------------------------
// pt-BR formatting
// ---------------------------------------------------------------------------

/// Format a monetary value as BRL: `R$ 1.234,56`.
///
/// Rounds half away from zero at two decimals -- the only place monetary
/// rounding happens.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "abs() guarantees a non-negative value and quote magnitudes fit u64 centavos"
)]
#[must_use]
pub fn format_brl(value: f64) -> String {
    let centavos = (value.abs() * 100.0).round() as u64;
    let reais = (centavos / 100).to_string();
    let cents = centavos % 100;
    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, digit) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && centavos > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{cents:02}")
}

/// Render with a decimal comma, trimming trailing zeros.
fn decimal_comma(value: f64, max_places: usize) -> String {
    let mut text = format!("{value:.max_places$}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text.replace('.', ",")
}

/// Format a distance in kilometers: `12,5 km`.
#[must_use]
pub fn format_km(km: f64) -> String {
    format!("{} km", decimal_comma(km, 1))
}

/// Format a percentage value: `7,5%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{}%", decimal_comma(value, 2))
}

/// Format a duration: `1h 24min` above one hour, `38 min` below.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "durations are non-negative and far below i64::MAX minutes"
)]
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let total_minutes = (seconds.max(0.0) / 60.0).round() as u64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours}h {minutes:02}min")
    } else {
        format!("{minutes} min")
    }
}

// ---------------------------------------------------------------------------
// Maps link
// ---------------------------------------------------------------------------

/// Percent-encode one URL query component (RFC 3986 unreserved set).
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.trim().bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(char::from(byte));
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Directions URL for the trip described by `form`, or `None` when the
/// locations the scenario needs are blank.
///
/// Round trips route back to the origin with the destination as a waypoint;
/// dispatch trips add the delivery stop as a second waypoint.
#[must_use]
pub fn route_link(form: &QuoteForm) -> Option<String> {
    let origin = form.origin.trim();
    let destination = form.destination.trim();
    if origin.is_empty() || destination.is_empty() {
        return None;
    }
    let o = encode_component(origin);
    let d = encode_component(destination);
    let base = "https://www.google.com/maps/dir/?api=1";
    match form.kind() {
        TripKind::OneWay => {
            Some(format!("{base}&origin={o}&destination={d}&travelmode=driving"))
        }
        TripKind::RoundTrip => Some(format!(
            "{base}&origin={o}&destination={o}&waypoints={d}&travelmode=driving"
        )),
        TripKind::Dispatch => {
            let waypoint = form.waypoint.trim();
            if waypoint.is_empty() {
                return None;
            }
            let w = encode_component(waypoint);
            Some(format!(
                "{base}&origin={o}&destination={o}&waypoints={d}%7C{w}&travelmode=driving"
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Audience templates
// ---------------------------------------------------------------------------

/// Who a share message is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Full itemized quote, all monetary values included.
    Client,
    /// Route and time details only, values redacted.
    Driver,
}

/// pt-BR label for the trip scenario.
#[must_use]
pub fn trip_label(kind: TripKind) -> &'static str {
    match kind {
        TripKind::OneWay => "Somente Ida",
        TripKind::RoundTrip => "Ida e Volta",
        TripKind::Dispatch => "Acionamento com Entrega",
    }
}

/// Per-leg distance lines, shared by both audiences.
///
/// Routed quotes itemize the legs the scenario defines; legs the routing
/// collaborator did not return render as unavailable instead of a number.
/// Manual quotes show the two entered directions.
fn distance_lines(quote: &Quote) -> Vec<(&'static str, String)> {
    match &quote.route {
        Some(route) => {
            let labels: &[&'static str] = match quote.form.kind() {
                TripKind::OneWay => &["KM de Ida"],
                TripKind::RoundTrip => &["KM de Ida", "KM de Retorno"],
                TripKind::Dispatch => &["KM de Acionamento", "KM de Ida", "KM de Retorno"],
            };
            labels
                .iter()
                .zip(&route.legs)
                .map(|(&label, leg)| {
                    let value = if leg.available {
                        format_km(leg.distance_meters / 1000.0)
                    } else {
                        "indisponível".to_owned()
                    };
                    (label, value)
                })
                .collect()
        }
        None => vec![
            ("KM de Ida", format_km(domain::parse_or_zero(&quote.form.outbound_km))),
            ("KM de Retorno", format_km(domain::parse_or_zero(&quote.form.return_km))),
        ],
    }
}

/// Route section shared by both messages (origin, destination, optional
/// dispatch stop, optional link).
fn push_route_section(out: &mut String, form: &QuoteForm, link: Option<&str>) {
    out.push_str(&format!("Origem: {}\n", form.origin.trim()));
    out.push_str(&format!("Destino: {}\n", form.destination.trim()));
    if form.kind() == TripKind::Dispatch && !form.waypoint.trim().is_empty() {
        out.push_str(&format!("Parada: {}\n", form.waypoint.trim()));
    }
    if let Some(link) = link {
        out.push_str(&format!("Link: {link}\n"));
    }
}

/// Client-facing message: every monetary value, itemized, with the payment
/// simulation table. Uses WhatsApp bold markers.
#[must_use]
pub fn client_message(quote: &Quote, link: Option<&str>) -> String {
    let form = &quote.form;
    let fare = &quote.fare;
    let surcharge = form.surcharge();
    let invoice = form.invoice_tax();
    let free_km = domain::parse_or_zero(&form.free_km);

    let mut out = String::new();
    out.push_str("*Detalhes do Serviço de Guincho*\n\n");
    out.push_str(&format!(
        "*Taxa de Saída:* {}\n",
        format_brl(domain::parse_or_zero(&form.base_fee))
    ));
    for (label, value) in distance_lines(quote) {
        out.push_str(&format!("*{label}:* {value}\n"));
    }
    out.push_str(&format!(
        "*Valor por KM:* {}\n",
        format_brl(domain::parse_or_zero(&form.per_km_rate))
    ));
    if free_km > 0.0 {
        out.push_str(&format!("*Franquia de KM:* {}\n", format_km(free_km)));
        out.push_str(&format!("*KM Cobrado:* {}\n", format_km(fare.billable_km)));
    }
    out.push_str(&format!("*Custo Total por KM:* {}\n", format_brl(fare.distance_cost)));
    let surcharge_display = match surcharge.mode {
        SurchargeMode::Percent => format_percent(surcharge.value),
        SurchargeMode::Fixed => format_brl(surcharge.value),
    };
    out.push_str(&format!("*Adicional Noturno:* {surcharge_display}\n"));
    out.push_str(&format!("*Valor do Adicional:* {}\n", format_brl(fare.surcharge_amount)));
    out.push_str(&format!("*Subtotal:* {}\n", format_brl(fare.subtotal)));
    if invoice.enabled {
        out.push_str(&format!(
            "*Nota Fiscal:* Sim (Taxa: {})\n",
            format_percent(invoice.percent)
        ));
    } else {
        out.push_str("*Nota Fiscal:* Não\n");
    }
    out.push_str(&format!("*Total:* {}\n\n", format_brl(fare.total)));

    out.push_str("*Simulação de Pagamento:*\n");
    for price in &fare.payment_prices {
        out.push_str(&format!("- {}: {}\n", price.method, format_brl(price.amount)));
    }

    out.push_str("\n*Rota:*\n");
    push_route_section(&mut out, form, link);
    out
}

/// Driver-facing message: route and time details only, monetary values
/// redacted.
#[must_use]
pub fn driver_message(quote: &Quote, link: Option<&str>) -> String {
    let form = &quote.form;
    let mut out = String::new();
    out.push_str("*Detalhes da Rota para Guincho*\n\n");
    out.push_str(&format!("*Tipo de Rota:* {}\n", trip_label(form.kind())));
    for (label, value) in distance_lines(quote) {
        out.push_str(&format!("*{label}:* {value}\n"));
    }
    if let Some(route) = &quote.route {
        out.push_str(&format!(
            "*Tempo Estimado:* {}\n",
            format_duration(route.total_duration_seconds)
        ));
    }
    out.push('\n');
    push_route_section(&mut out, form, link);
    out
}

// ---------------------------------------------------------------------------
// ShareError + Sharer
// ---------------------------------------------------------------------------

/// Errors that can abort a share operation.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    /// Share requested before any calculation was performed.
    #[error("perform a calculation before sharing")]
    NoQuote,
}

/// Result of a share operation.
///
/// The formatted message is always present so the caller can offer a manual
/// copy/retry; a clipboard failure is carried alongside it as a non-fatal
/// notice rather than an error.
#[derive(Debug)]
pub struct ShareOutcome {
    /// The message that was (or should have been) copied.
    pub message: String,
    /// `Some` when the clipboard collaborator rejected the write.
    pub clipboard_error: Option<ClipboardError>,
}

/// Runs the share workflow: assemble the audience message, shorten the
/// route link (best effort), and hand the text to the clipboard.
///
/// Generic over both ports for zero-cost static dispatch; dependencies are
/// injected per call.
#[derive(Debug, Default)]
pub struct Sharer;

impl Sharer {
    /// Create a new sharer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Share `quote` with `audience`.
    ///
    /// The link shortener is best effort: on failure the original URL is
    /// used and message generation proceeds. A clipboard failure does not
    /// fail the operation either -- it is returned inside the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::NoQuote`] when `quote` is `None` (nothing has
    /// been calculated yet).
    pub async fn share<S: LinkShortener, C: Clipboard>(
        &self,
        quote: Option<&Quote>,
        audience: Audience,
        shortener: &S,
        clipboard: &C,
    ) -> Result<ShareOutcome, ShareError> {
        let quote = quote.ok_or(ShareError::NoQuote)?;

        let link = match route_link(&quote.form) {
            None => None,
            Some(url) => match shortener.shorten(&url).await {
                Ok(short) => Some(short),
                Err(e) => {
                    tracing::debug!("sharer.shorten.failed: error={e}, using original link");
                    Some(url)
                }
            },
        };

        let message = match audience {
            Audience::Client => client_message(quote, link.as_deref()),
            Audience::Driver => driver_message(quote, link.as_deref()),
        };

        let clipboard_error = clipboard.write(&message).await.err();
        match &clipboard_error {
            None => tracing::info!("sharer.copied: audience={audience:?} quote={}", quote.id),
            Some(e) => tracing::warn!("sharer.clipboard.failed: error={e}"),
        }
        Ok(ShareOutcome { message, clipboard_error })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
