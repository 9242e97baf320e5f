mod config;
mod context;
mod detector;
mod processor;
mod services;
mod storage;

use crate::config::Config;
use crate::context::AppContext;
use crate::detector::{GeminiDetector, PlaceholderDetector};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::from_env();
    let url = format!("http://{}:{}", config.host, config.port);

    // Make sure the schema exists before the first request needs it. The
    // server still starts on failure; handlers degrade to local-only mode.
    if let Err(e) = storage::open(&config.db_path) {
        error!("Failed to initialize database {}: {}", config.db_path, e);
    }

    {
        let _url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&_url_clone);
        });
    }

    let detector: Arc<dyn PlaceholderDetector> = Arc::new(GeminiDetector::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    ));
    let ctx = web::Data::new(AppContext {
        config: config.clone(),
        detector,
    });

    info!("Server running at {}", url);

    let bind = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(ctx.clone())
            .service(services::documents::configure_routes())
            .service(services::export::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind(bind)?
    .run()
    .await
}
