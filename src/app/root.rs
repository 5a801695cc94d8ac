use {
    eframe::{
        Frame, Storage,
        egui::{CentralPanel, Context, DroppedFile, Visuals},
    },
    std::{
        sync::{
            Arc,
            mpsc::{self, Receiver, Sender},
        },
        time::Duration,
    },
};

use crate::{
    Cli,
    analysis::AnalysisPipeline,
    app::UiPrefs,
    config::DF,
    data::{GeminiClient, PersistentStore},
    domain::Language,
    engine::{JobResult, Screen, VisionEngine, spawn_analysis},
    error::VisionError,
    models::Plan,
    ui::{
        PricingState, UI_CONFIG, UiAction, render_analytics, render_dashboard,
        render_error_banner, render_header, render_preview, render_pricing, render_upload,
        ui_text,
    },
    utils::now_timestamp_ms,
};

#[cfg(not(target_arch = "wasm32"))]
use {
    crate::{config::PERSISTENCE, data::FileStore},
    std::path::{Path, PathBuf},
};

#[cfg(target_arch = "wasm32")]
use crate::data::LocalStorageStore;

/// Plan expiry is re-checked at most this often while the app is idle
const ACCESS_REFRESH: Duration = Duration::from_secs(30);

pub struct App {
    prefs: UiPrefs,
    engine: VisionEngine,
    pipeline: Arc<AnalysisPipeline<GeminiClient>>,
    has_api_key: bool,
    results_tx: Sender<JobResult>,
    results_rx: Receiver<JobResult>,
    pricing: PricingState,
    path_input: String,
    last_access_check: i64,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let prefs: UiPrefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        let language = prefs.resolve_language(args.lang, Language::detect());

        let now = now_timestamp_ms();
        let mut engine = VisionEngine::new(open_store(&args), language, now);
        engine.set_view(prefs.view);

        let client = GeminiClient::new(args.api_key.clone(), args.model.clone());
        let has_api_key = client.has_api_key();
        if !has_api_key {
            log::warn!("No API key configured: analyses are disabled");
        }

        let (results_tx, results_rx) = mpsc::channel();

        #[allow(unused_mut)]
        let mut app = Self {
            prefs,
            engine,
            pipeline: Arc::new(AnalysisPipeline::new(client)),
            has_api_key,
            results_tx,
            results_rx,
            pricing: PricingState::default(),
            path_input: String::new(),
            last_access_check: now,
        };

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = &args.image {
            app.load_path(path);
        }

        app
    }

    /// Worker results arrive here; stale ones are dropped by the engine.
    fn drain_results(&mut self, now_ms: i64) {
        while let Ok(result) = self.results_rx.try_recv() {
            let token = result.token;
            if !self.engine.complete_analysis(result, now_ms) && DF.log_pipeline {
                log::info!("Result #{} ignored", token);
            }
        }
    }

    fn refresh_access_if_due(&mut self, now_ms: i64) {
        if now_ms - self.last_access_check >= ACCESS_REFRESH.as_millis() as i64 {
            self.last_access_check = now_ms;
            self.engine.refresh_access(now_ms);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped: Vec<DroppedFile> = ctx.input(|i| i.raw.dropped_files.clone());
        // Only the first file counts
        if let Some(file) = dropped.into_iter().next() {
            self.load_dropped(file);
        }
    }

    fn load_dropped(&mut self, file: DroppedFile) {
        if let Some(bytes) = file.bytes {
            let name = if file.name.is_empty() {
                String::from("chart")
            } else {
                file.name
            };
            self.engine.select_file(name, bytes);
            return;
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = file.path {
            self.load_path(&path);
            return;
        }

        self.engine.report_error(VisionError::InputInvalid(String::from(
            "the dropped item carried no readable data",
        )));
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match std::fs::read(path) {
            Ok(bytes) => self.engine.select_file(name, bytes),
            Err(e) => self.engine.report_error(VisionError::InputInvalid(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn apply(&mut self, ctx: &Context, action: UiAction, now_ms: i64) {
        if DF.log_selection {
            log::info!("UI action {:?}", action);
        }
        let text = ui_text(self.engine.language());

        match action {
            UiAction::StartTrial => match self.engine.choose_plan(Plan::Silver, now_ms) {
                Ok(_) => self.pricing.clear(),
                Err(refusal) => self.pricing.show_refusal(refusal, text),
            },
            UiAction::RedeemCode(code) => match self.engine.redeem_activation_code(&code, now_ms) {
                Ok(_) => self.pricing.clear(),
                Err(refusal) => self.pricing.show_refusal(refusal, text),
            },
            UiAction::LoadPath(path) => {
                #[cfg(not(target_arch = "wasm32"))]
                {
                    self.load_path(&PathBuf::from(path));
                    self.path_input.clear();
                }
                #[cfg(target_arch = "wasm32")]
                let _ = path;
            }
            UiAction::Analyze => match self.engine.begin_analysis(now_ms) {
                Ok(request) => {
                    let repaint = ctx.clone();
                    spawn_analysis(
                        Arc::clone(&self.pipeline),
                        request,
                        self.results_tx.clone(),
                        move || repaint.request_repaint(),
                    );
                }
                Err(blocked) => log::warn!("Analysis not started: {}", blocked),
            },
            UiAction::Reset => self.engine.reset(),
            UiAction::SelectHistory(id) => {
                if !self.engine.select_history(&id) {
                    log::warn!("History entry {} no longer exists", id);
                }
            }
            UiAction::RecordOutcome(slot, outcome) => {
                self.engine.record_outcome(slot, outcome);
            }
            UiAction::SetView(view) => self.engine.set_view(view),
            UiAction::SetLanguage(language) => {
                self.engine.set_language(language);
                self.prefs.language = Some(language);
            }
            UiAction::DismissError => self.engine.dismiss_error(),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        let now = now_timestamp_ms();
        self.drain_results(now);
        self.refresh_access_if_due(now);
        self.handle_dropped_files(ctx);

        let text = ui_text(self.engine.language());
        let mut actions = Vec::new();
        actions.extend(render_header(ctx, &self.engine, text));

        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                let screen = self.engine.screen();
                // The preview draws its own banner under the trigger
                if screen != Screen::Preview {
                    if let Some(error) = self.engine.error() {
                        actions.extend(render_error_banner(ui, error, self.engine.language(), text));
                        ui.add_space(8.0);
                    }
                }
                let action = match screen {
                    Screen::Pricing => {
                        render_pricing(ui, self.engine.access(), &mut self.pricing, text)
                    }
                    Screen::Upload => render_upload(ui, &self.engine, &mut self.path_input, text),
                    Screen::Preview => render_preview(ui, &self.engine, self.has_api_key, text),
                    Screen::Dashboard => self
                        .engine
                        .active()
                        .and_then(|active| render_dashboard(ui, active, now, text)),
                    Screen::Analytics => {
                        render_analytics(ui, &self.engine.performance(), self.engine.language(), text);
                        None
                    }
                };
                actions.extend(action);
            });

        for action in actions {
            self.apply(ctx, action, now);
        }

        if self.engine.is_analyzing() {
            ctx.request_repaint_after(Duration::from_millis(250));
        } else {
            ctx.request_repaint_after(ACCESS_REFRESH);
        }
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        self.prefs.view = self.engine.view();
        if DF.log_selection {
            log::info!("💾 SAVE [App]: {:?}", self.prefs);
        }
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_store(args: &Cli) -> PersistentStore {
    let directory = args
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(PERSISTENCE.directory));
    log::info!("Storing data in {}", directory.display());
    PersistentStore::new(Box::new(FileStore::new(directory)))
}

#[cfg(target_arch = "wasm32")]
fn open_store(_args: &Cli) -> PersistentStore {
    match LocalStorageStore::open() {
        Some(store) => PersistentStore::new(Box::new(store)),
        None => {
            log::warn!("localStorage unavailable, keeping data for this session only");
            PersistentStore::in_memory()
        }
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.central_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.hyperlink_color = UI_CONFIG.colors.accent;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}
