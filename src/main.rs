use clap::Parser;
use log::error;

use exifscope::cli::{self, Cli, Commands};
use exifscope::{server, Config};

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let result = actix_web::rt::System::new().block_on(async move {
        match cli.command {
            Some(Commands::Serve) | None => server::run(Config::new())
                .await
                .map_err(anyhow::Error::from),
            Some(Commands::Extract { file, format }) => cli::handle_extract(&file, format).await,
        }
    });

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
