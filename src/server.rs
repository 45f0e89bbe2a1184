use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::handlers;
use crate::services::{MetadataExtractor, UploadReceiver};

pub async fn run(config: Config) -> std::io::Result<()> {
    let host = config.host.clone();
    let port = config.port;

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    if !config.static_dir.is_dir() {
        warn!("Static directory {:?} not found, front-end disabled", config.static_dir);
    }

    print_banner(&host, port);
    info!("Server running at http://{}:{}/", host, port);
    info!(
        "Uploads in {:?}, engine {:?}, timeout {:?}, max upload {} bytes",
        config.upload_dir, config.exiftool_path, config.extract_timeout, config.max_upload_bytes
    );

    let startup_time = Instant::now();
    let receiver = web::Data::new(UploadReceiver::new(
        config.upload_dir.clone(),
        config.max_upload_bytes,
    ));
    let extractor = web::Data::new(MetadataExtractor::from_config(&config));
    let static_dir = config.static_dir.clone();

    HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(receiver.clone())
            .app_data(extractor.clone())
            .configure(move |cfg| configure_routes(cfg, static_dir))
    })
    .bind((host, port))?
    .run()
    .await?;

    info!("Server stopped. Uptime: {:?}", startup_time.elapsed());
    Ok(())
}

/// Health probe and extraction endpoint.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health))
        .route("/api/extract", web::post().to(handlers::extract_metadata));
}

fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: PathBuf) {
    configure_api(cfg);
    if static_dir.is_dir() {
        cfg.service(Files::new("/", static_dir).index_file("index.html"));
    }
}

fn print_banner(host: &str, port: u16) {
    let banner = r#"
            _  __
  _____  _(_)/ _|___  ___ ___  _ __   ___
 / _ \ \/ / | |_/ __|/ __/ _ \| '_ \ / _ \
|  __/>  <| |  _\__ \ (_| (_) | |_) |  __/
 \___/_/\_\_|_| |___/\___\___/| .__/ \___|
                              |_|
"#;
    println!("{}", banner);
    println!("         exifscope started at: http://{}:{}\n", host, port);
}
