use jsonbind::{DecoderOptions, config, logger};

use crate::{api, server::Server};

pub async fn run() -> anyhow::Result<()> {
    let router = api::create_router();

    logger::init()?;

    // Config loads before the subscriber exists, so its fallback warning
    // is repeated here.
    if let Some(err) = config::load_error() {
        tracing::warn!(error = %format!("{err:#}"), "using default configuration");
    }

    let options = DecoderOptions::process_defaults();
    tracing::info!(
        use_opaque_numbers = options.use_opaque_numbers,
        disallow_unknown_fields = options.disallow_unknown_fields,
        "Starting application..."
    );

    let server = Server::new(config::get().server());

    server.start(router).await
}
