mod api;
mod app;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
