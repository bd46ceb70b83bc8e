use std::sync::Arc;
use std::time::Duration;

use omni_coach::adapters::ai::{OpenAIConfig, OpenAIProvider};
use omni_coach::adapters::auth::{JwtConfig, JwtSessionValidator};
use omni_coach::adapters::crypto::ChaChaSecretCipher;
use omni_coach::adapters::google::{GoogleCalendarProvider, GoogleConfig};
use omni_coach::adapters::http::{api_router, AuthState};
use omni_coach::adapters::postgres::{
    PostgresConnectionRepository, PostgresPlanRepository, PostgresProfileRepository,
    PostgresRewardRepository, PostgresSignalRepository,
};
use omni_coach::app::{build_handlers, Repositories, Services};
use omni_coach::config::{AppConfig, LogFormat};
use omni_coach::ports::AIProvider;
use secrecy::{ExposeSecret, Secret};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("migrations applied");
    }

    let repos = Repositories {
        profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
        plans: Arc::new(PostgresPlanRepository::new(pool.clone())),
        signals: Arc::new(PostgresSignalRepository::new(pool.clone())),
        rewards: Arc::new(PostgresRewardRepository::new(pool.clone())),
        connections: Arc::new(PostgresConnectionRepository::new(pool)),
    };

    let google = &config.google;
    let calendar = GoogleCalendarProvider::new(
        GoogleConfig::new(
            google.client_id.clone(),
            Secret::new(google.client_secret.expose_secret().clone()),
            google.redirect_uri.clone(),
        )
        .with_base_urls(
            google.oauth_base_url.clone(),
            google.calendar_base_url.clone(),
            google.tasks_base_url.clone(),
        )
        .with_timeout(Duration::from_secs(google.timeout_secs)),
    )?;

    let ai: Option<Arc<dyn AIProvider>> = match config.ai.api_key() {
        Some(key) => {
            let provider = OpenAIProvider::new(
                OpenAIConfig::new(key.expose_secret().clone())
                    .with_model(config.ai.model.clone())
                    .with_base_url(config.ai.base_url.clone())
                    .with_timeout(config.ai.timeout())
                    .with_max_retries(config.ai.max_retries),
            )?;
            tracing::info!(model = %config.ai.model, "AI generation enabled");
            Some(Arc::new(provider))
        }
        None => {
            tracing::warn!("no AI key configured, using deterministic plans and nudges");
            None
        }
    };

    let services = Services {
        calendar: Arc::new(calendar),
        cipher: Arc::new(ChaChaSecretCipher::from_base64_key(
            &config.security.token_encryption_key,
        )?),
        ai,
        ai_temperature: config.ai.temperature,
    };

    let validator: AuthState = Arc::new(JwtSessionValidator::new(JwtConfig::new(
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        Secret::new(config.auth.jwt_secret.expose_secret().clone()),
    )));

    let handlers = build_handlers(repos, services, config.coaching);
    let app = api_router(handlers, validator, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = %config.server.environment, "omni-coach listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.server.log_format() {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
