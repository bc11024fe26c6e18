use anyhow::Context;
use librarian_app::bootstrap::{self, StoreBackend};
use librarian_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load librarian settings")?;
    librarian_telemetry::init(&settings.telemetry);

    bootstrap::run(settings, StoreBackend::Mongo).await
}
