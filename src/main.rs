use clap::Parser;
use headlines::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Results go to stdout, so keep logs on stderr. The fmt subscriber also
    // picks up `log` records from the library.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    cli::run(Cli::parse()).await
}
