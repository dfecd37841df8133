use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: booking requests by outcome. Labels: outcome.
pub const BOOKINGS_TOTAL: &str = "docket_bookings_total";

/// Counter: bookings committed with the conflict check bypassed.
pub const CONFLICT_OVERRIDES_TOTAL: &str = "docket_conflict_overrides_total";

/// Counter: status transitions applied. Labels: to.
pub const TRANSITIONS_TOTAL: &str = "docket_transitions_total";

/// Counter: appointments removed by owner cascades.
pub const CASCADE_REMOVALS_TOTAL: &str = "docket_cascade_removals_total";

/// Histogram: read-side query latency in seconds. Labels: op.
pub const QUERY_DURATION_SECONDS: &str = "docket_query_duration_seconds";

/// Install the Prometheus metrics exporter on the given port. No-op if port
/// is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Install the default fmt tracing subscriber. Embedders with their own
/// subscriber skip this.
pub fn init_tracing() {
    tracing_subscriber::fmt::init();
}
