use clap::Parser;
use oneshot_web::{Config, Server};
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut builder = Server::builder().address(config.address);
    if let Some(directory) = config.directory {
        builder = builder.directory(directory);
    }

    match builder.build() {
        Ok(server) => server.start().await,
        Err(e) => error!(cause = %e, "invalid server configuration"),
    }
}
