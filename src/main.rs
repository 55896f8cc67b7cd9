use adcopy::config::Config;
use adcopy::error::Error;
use tracing::error;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<(), Error> {
    // load .env first so RUST_LOG from it applies to the subscriber
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    let config = Config::from_env().map_err(|err| {
        error!("invalid configuration: {}", err);
        err
    })?;

    adcopy::run(config).await
}
