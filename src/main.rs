//! thumbnail-dl - download playlist thumbnails at a chosen size

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
