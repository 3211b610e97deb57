use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use radio_server::config::ServerConfig;
use radio_server::directory::DirectoryClient;
use radio_server::geo::GeoClient;
use radio_server::pipeline::Resolver;
use radio_server::policy::{ContentPolicy, GoogleTranslator, ProfanityLexicon};
use radio_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("radio_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Loaded once; shared read-only by every request
    let lexicon = match &config.wordlist {
        Some(path) => ProfanityLexicon::from_file(path)?,
        None => ProfanityLexicon::bundled(),
    };
    tracing::info!(entries = lexicon.len(), "loaded profanity lexicon");

    let directory = DirectoryClient::new(config.directory.clone())?;
    let geolocator = GeoClient::new(config.geo.clone())?;
    let translator = GoogleTranslator::new(config.translator.clone())?;

    let policy = ContentPolicy::new(Arc::new(lexicon), Arc::new(translator));
    let resolver = Resolver::new(
        Arc::new(directory),
        Arc::new(geolocator),
        policy,
        config.presentability,
    );

    let app = create_router(AppState::new(resolver), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "radio server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
