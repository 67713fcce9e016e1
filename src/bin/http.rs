#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use timeline_tool::{Settings, TimelineSession, http_api, logging};

    logging::init_tracing("info");
    let settings = Settings::from_env();
    let addr = settings.socket_addr()?;

    let mut session = TimelineSession::new(settings.config_path.clone());
    if settings.config_path.exists() {
        if let Err(err) = session.load_default() {
            tracing::warn!(error = %err, "initial timeline config could not be loaded");
        }
    }

    println!("timeline-tool HTTP API listening on http://{addr}");
    http_api::serve(addr, session).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
