/// siklus web
///
/// Serves the menstrual-cycle prediction site: landing pages, the
/// prediction form and its result page.
///
/// Run with:
///   cargo run --bin siklus-web --release
/// Then open http://127.0.0.1:5000
///
/// Environment:
///   SIKLUS_BIND        listen address (default 0.0.0.0:5000)
///   SIKLUS_MODEL_PATH  XGBoost JSON model (default model/xgb_model.json)
///   RUST_LOG           log filter (default info)

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::process;
use std::sync::Arc;

use log::{error, info};
use tiny_http::Server;

use siklus::{AppConfig, FormHandler, GbtModel};
use state::AppState;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let model = match GbtModel::load_json(&config.model_path) {
        Ok(m) => m,
        Err(e) => {
            error!("failed to load model from {}: {}", config.model_path.display(), e);
            process::exit(1);
        }
    };
    info!(
        "model loaded from {} ({} trees, {} classes, max depth {})",
        config.model_path.display(),
        model.num_trees(),
        model.num_class(),
        model.max_depth()
    );

    let server = match Server::http(config.bind_addr) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to bind {}: {}", config.bind_addr, e);
            process::exit(1);
        }
    };
    info!("listening on http://{}", config.bind_addr);

    let shared_state = Arc::new(AppState::new(FormHandler::new(Arc::new(model))));

    // One thread per request; the model is immutable so handlers never lock.
    for request in server.incoming_requests() {
        let state_clone = Arc::clone(&shared_state);
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
