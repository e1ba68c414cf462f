use std::sync::Arc;

use macrostate::analytics::{
    DEFAULT_BLOCKS, FX_VOL_PAIRS, fx_volatility, system_health, volatility_block,
    volatility_regime,
};
use macrostate::{Macrostate, SeriesKind, SeriesProvider, SeriesSpec, to_json_pretty};
use macrostate_fred::FredConnector;
use macrostate_mock::MockProvider;
use tracing_subscriber::fmt::format::FmtSpan;

fn specs(primary: &'static str, backup: &'static str) -> Vec<SeriesSpec> {
    use SeriesKind::{Fx, Rate, VolatilityIndex};
    vec![
        SeriesSpec::new("duration", "us_10y", "DGS10", primary)
            .kind(Rate)
            .secondary(backup),
        SeriesSpec::new("duration", "us_2y", "DGS2", primary)
            .kind(Rate)
            .secondary(backup),
        SeriesSpec::new("labor_market", "unemployment", "UNRATE", primary).secondary(backup),
        SeriesSpec::new("volatility", "vix", "VIXCLS", primary)
            .kind(VolatilityIndex)
            .secondary_as(backup, "^VIX"),
        SeriesSpec::new("volatility", "move", "^MOVE", backup).kind(VolatilityIndex),
        SeriesSpec::new("fx", "dxy", "DTWEXBGS", primary)
            .kind(Fx)
            .secondary_as(backup, "DX-Y.NYB"),
        SeriesSpec::new("fx", "eurusd", "EURUSD=X", backup).kind(Fx),
        SeriesSpec::new("fx", "usdjpy", "JPY=X", backup).kind(Fx),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,macrostate=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    // FRED first with the mock as backup; CI sets MACROSTATE_EXAMPLES_USE_MOCK to stay offline.
    let mock: Arc<dyn SeriesProvider> = Arc::new(MockProvider::new());
    let mut builder = Macrostate::builder().with_provider(Arc::clone(&mock));
    let primary = if std::env::var_os("MACROSTATE_EXAMPLES_USE_MOCK").is_some() {
        mock.name()
    } else {
        let fred = Arc::new(FredConnector::from_env()?);
        let name = fred.name();
        builder = builder.with_provider(fred);
        name
    };
    let ms = builder.build()?;
    let specs = specs(primary, mock.name());

    let raw = ms.ingest_all(&specs).await;
    println!("{}", to_json_pretty(&raw)?);
    println!("{}", to_json_pretty(&volatility_block(&raw))?);
    println!(
        "{}",
        to_json_pretty(&system_health(&raw, DEFAULT_BLOCKS, chrono::Utc::now()))?
    );

    let history = ms.build_history_state(&specs, Some(("vix", "move"))).await;
    let regime = volatility_regime(&history, &ms.config().regime)?;
    println!("{}", to_json_pretty(&regime)?);
    let fx = fx_volatility(&history, FX_VOL_PAIRS, &ms.config().regime)?;
    println!("{}", to_json_pretty(&fx)?);

    Ok(())
}
