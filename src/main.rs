use anyhow::Context;
use launchgate::{
    core::environment::{BuildReleaseInfo, EnvVersionSource},
    CompatGate, GateConfig, LogSink,
};
use tracing::{error, info};

/// Preflight check: run the compatibility gate once against the environment
/// described by LAUNCHGATE_* variables and exit 0 (proceed) or 1 (abort).
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .init();

    info!("Starting launchgate preflight v{}", env!("CARGO_PKG_VERSION"));

    let config = GateConfig::new()
        .context("Failed to load configuration")
        .map_err(|e| {
            error!("{:#}", e);
            e
        })?;

    let source = EnvVersionSource;
    let release = BuildReleaseInfo {
        community_edition: std::env::var("LAUNCHGATE_EDITION")
            .map(|e| e == "community")
            .unwrap_or(true),
        branch: std::env::var("LAUNCHGATE_BRANCH").ok(),
    };

    let gate = CompatGate::new(&config, &source, &release);
    let mut sink = LogSink;
    let outcome = gate.run(&mut sink);

    if !outcome.passed {
        error!("Compatibility checks failed; startup must abort");
        std::process::exit(1);
    }

    info!(
        server_minor = config.server_minor(),
        "Compatibility checks passed"
    );
    Ok(())
}
