use ipl_win_predictor::config::ServerConfig;
use ipl_win_predictor::server::{router, AppState};
use ipl_win_predictor::service::WinPredictorService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "ipl_win_predictor=info".into()),
        )
        .init();

    let cfg = ServerConfig::from_env()?;
    tracing::info!("loading {:?} model from {}", cfg.backend, cfg.model_path);

    let service = WinPredictorService::new(cfg.load_predictor()?);

    // Warmup so a malformed artifact fails here rather than on the first request
    let probe = service.warmup()?;
    tracing::info!(
        "warmup ok: {} {}% / {} {}%",
        probe.batting_team,
        probe.batting_win_pct,
        probe.bowling_team,
        probe.bowling_win_pct
    );

    let app = router(AppState {
        service,
        log_features: cfg.log_features,
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
