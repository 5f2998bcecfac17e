use pinflow_core::models::BatchReport;

/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// One-line human summary of a batch run.
pub fn summarize_report(report: &BatchReport) -> String {
    format!(
        "{} succeeded, {} failed, {} total",
        report.successful, report.failed, report.total
    )
}
