use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use config::{Config, Environment as EnvironmentSource, File};
use tokio::net::TcpListener;

use medrelay::application::services::{ConversationService, IngestionService, SummaryService};
use medrelay::infrastructure::observability::{TracingConfig, init_tracing};
use medrelay::infrastructure::persistence::RepositoryFactory;
use medrelay::infrastructure::providers::AiProviderFactory;
use medrelay::infrastructure::storage::{HttpAudioFetcher, S3AudioStorage};
use medrelay::presentation::config::{Environment, Settings};
use medrelay::presentation::state::AppState;
use medrelay::presentation::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let configuration = Config::builder()
        .add_source(
            File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
        )
        .add_source(
            EnvironmentSource::with_prefix("APP")
                .separator("_")
                .list_separator(" "),
        )
        .build()?;

    let settings: Settings = configuration.try_deserialize()?;

    init_tracing(TracingConfig::default(), settings.server.port);
    tracing::info!(environment = %environment, "Starting in {} mode", environment);

    let repository = RepositoryFactory::create(&settings.database)
        .await
        .map_err(|e| anyhow::anyhow!("repository initialization failed: {}", e))?;

    // Provider construction is eager so a bad provider name or missing key
    // stops the process here instead of failing the first request.
    let provider = AiProviderFactory::create(&settings.ai)
        .map_err(|e| anyhow::anyhow!("AI provider initialization failed: {}", e))?;

    let audio_fetcher = Arc::new(
        HttpAudioFetcher::new(settings.ai.timeout())
            .map_err(|e| anyhow::anyhow!("audio fetcher initialization failed: {}", e))?,
    );

    let audio_storage = if settings.storage.is_configured() {
        let storage = S3AudioStorage::new(settings.storage.clone())
            .map_err(|e| anyhow::anyhow!("storage initialization failed: {}", e))?;
        Some(Arc::new(storage) as Arc<dyn medrelay::application::ports::AudioStorage>)
    } else {
        tracing::warn!("Object storage not configured, audio presign disabled");
        None
    };

    let conversation_service = Arc::new(ConversationService::new(Arc::clone(&repository)));
    let ingestion_service = Arc::new(IngestionService::new(
        Arc::clone(&repository),
        Arc::clone(&provider),
        audio_fetcher,
        settings.audio.max_bytes(),
    ));
    let summary_service = Arc::new(SummaryService::new(
        Arc::clone(&repository),
        Arc::clone(&provider),
    ));

    let state = AppState {
        conversation_service,
        ingestion_service,
        summary_service,
        audio_storage,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
