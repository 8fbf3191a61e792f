use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = general_settings::cli::Cli::parse();
    if let Err(e) = general_settings::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
