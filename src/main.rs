#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use {
    log::LevelFilter,
    trade_vision::{Cli, run_app},
};

#[cfg(not(target_arch = "wasm32"))]
use {
    clap::Parser,
    eframe::{NativeOptions, egui::ViewportBuilder},
    std::path::PathBuf,
    trade_vision::PERSISTENCE,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, prelude::*};

#[cfg(not(target_arch = "wasm32"))]
const APP_NAME: &str = "Trade Vision";

/// (dependencies, this crate)
fn log_levels() -> (LevelFilter, LevelFilter) {
    if cfg!(debug_assertions) {
        (LevelFilter::Warn, LevelFilter::Info)
    } else {
        (LevelFilter::Error, LevelFilter::Error)
    }
}

// --- WEB ---

#[cfg(target_arch = "wasm32")]
const CANVAS_ID: &str = "the_canvas_id";

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
fn init_console_log() {
    let (deps, ours) = log_levels();
    let _ = fern::Dispatch::new()
        .level(deps)
        .level_for(env!("CARGO_CRATE_NAME"), ours)
        .chain(fern::Output::call(|record| {
            let line = format!("[{}] {}", record.target(), record.args());
            match record.level() {
                log::Level::Error => web_sys::console::error_1(&line.into()),
                log::Level::Warn => web_sys::console::warn_1(&line.into()),
                log::Level::Info => web_sys::console::info_1(&line.into()),
                log::Level::Debug | log::Level::Trace => web_sys::console::log_1(&line.into()),
            }
        }))
        .apply();
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    init_console_log();

    let canvas = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CANVAS_ID))
        .ok_or_else(|| format!("no #{} element in the page", CANVAS_ID))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| format!("#{} is not a canvas", CANVAS_ID))?;

    let args = Cli::default();
    eframe::WebRunner::new()
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(|cc| Ok(Box::new(run_app(cc, args)))),
        )
        .await
}

// --- NATIVE ---

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    let (deps, ours) = log_levels();
    env_logger::Builder::new()
        .filter(None, deps)
        .filter(Some(env!("CARGO_CRATE_NAME")), ours)
        .init();

    std::panic::set_hook(Box::new(|info| {
        log::error!(
            "Panic: {}\n{}",
            info,
            std::backtrace::Backtrace::force_capture()
        );
    }));

    let args = Cli::parse();
    // UI prefs sit next to the business data so --data-dir moves both
    let state_path = args
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(PERSISTENCE.directory))
        .join(PERSISTENCE.app.state_path);

    let options = NativeOptions {
        persistence_path: Some(state_path),
        viewport: ViewportBuilder::default()
            .with_inner_size([1180.0, 860.0])
            .with_min_inner_size([720.0, 560.0])
            .with_drag_and_drop(true)
            .with_title(APP_NAME),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(run_app(cc, args)))),
    )
}
