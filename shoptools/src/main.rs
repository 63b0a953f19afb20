use clap::Parser;

mod store;

use store::{handle_store_command, StoreCommand};

#[derive(Parser, Debug)]
#[command(version, about = "Admin tools for the storefront API")]
pub struct Arguments {
    #[command(subcommand)]
    command: StoreCommand,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    handle_store_command(cli.command).await;
}
