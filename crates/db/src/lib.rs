//! MongoDB client factory for the librarian service.

use anyhow::Context;
use librarian_kernel::settings::DatabaseSettings;
use mongodb::{bson::doc, options::ClientOptions, Client, Database};

/// Application name reported to the server in the handshake.
const APP_NAME: &str = "librarian";

/// Establish the process-wide MongoDB connection and return the configured database.
///
/// The server is pinged once so an unreachable store fails startup instead of
/// the first request.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Database> {
    let mut options = ClientOptions::parse(&settings.uri)
        .await
        .with_context(|| "failed to parse database connection string")?;
    options.app_name = Some(APP_NAME.to_string());

    let client = Client::with_options(options).context("failed to build database client")?;
    let database = client.database(&settings.name);

    ping(&database)
        .await
        .with_context(|| format!("database '{}' is unreachable", settings.name))?;

    tracing::info!(
        target: "librarian-db",
        database = %settings.name,
        "database connection established"
    );

    Ok(database)
}

/// Round-trip a `ping` command to the server.
pub async fn ping(database: &Database) -> anyhow::Result<()> {
    database
        .run_command(doc! { "ping": 1 }, None)
        .await
        .context("ping command failed")?;
    Ok(())
}
