use crate::config::Settings;
use crate::server::Server;

/// Starts the HTTP server, applying any CLI overrides to the settings.
pub async fn handle_serve(
    mut settings: Settings,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    Server::new(settings).run().await
}
