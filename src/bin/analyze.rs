//! Headless analysis: runs one chart through the same engine and store as the
//! desktop app and prints the result as JSON.
//!
//! ```text
//! analyze --image chart.png --lang fr
//! analyze --report
//! ```

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
use {
    anyhow::{Context, Result, bail},
    clap::Parser,
    std::{path::PathBuf, sync::Arc},
    trade_vision::{
        AnalysisPipeline, Cli, GeminiClient, Language, PERSISTENCE, PersistentStore,
        VisionEngine,
        data::FileStore,
        engine::{JobResult, process_request},
        models::{AccessState, Plan},
        utils::{format_duration, now_timestamp_ms},
    },
};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(author, version, about = "Analyze a chart screenshot without the GUI")]
struct Args {
    #[command(flatten)]
    common: Cli,

    /// Start the free trial first if no plan is active
    #[arg(long, default_value_t = false)]
    trial: bool,

    /// Redeem a Gold activation code before analyzing
    #[arg(long)]
    code: Option<String>,

    /// Print the monthly performance report instead of analyzing
    #[arg(long, default_value_t = false)]
    report: bool,
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let now = now_timestamp_ms();
    let language = args.common.lang.unwrap_or_else(Language::detect);
    let directory = args
        .common
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(PERSISTENCE.directory));
    let store = PersistentStore::new(Box::new(FileStore::new(&directory)));
    let mut engine = VisionEngine::new(store, language, now);

    if args.report {
        print_report(&engine);
        return Ok(());
    }

    if let Some(code) = &args.code {
        engine
            .redeem_activation_code(code, now)
            .context("activation refused")?;
    } else if args.trial && engine.access() == AccessState::NoPlan {
        engine
            .choose_plan(Plan::Silver, now)
            .context("trial refused")?;
    }

    let Some(path) = args.common.image.clone() else {
        bail!("nothing to do: pass --image <PATH> or --report");
    };
    let bytes = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    engine.select_file(name, bytes);
    if let Some(error) = engine.error() {
        bail!("{}", error);
    }

    let request = engine
        .begin_analysis(now)
        .context("cannot analyze (use --trial or --code to activate a plan)")?;

    let client = GeminiClient::new(args.common.api_key.clone(), args.common.model.clone());
    let pipeline = Arc::new(AnalysisPipeline::new(client));
    let (tx, rx) = std::sync::mpsc::channel::<JobResult>();
    process_request(&pipeline, request, &tx).await;
    let result = rx.recv().context("analysis produced no result")?;
    log::info!("Model answered in {}", format_duration(result.duration_ms as i64));

    engine.complete_analysis(result, now_timestamp_ms());
    if let Some(error) = engine.error() {
        bail!("{}", error.user_message(language));
    }
    let active = engine
        .active()
        .context("analysis finished without a result")?;

    println!("{}", serde_json::to_string_pretty(&active.result)?);
    if let Some(id) = &active.history_id {
        eprintln!("saved as {} in {}", id, directory.display());
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn print_report(engine: &VisionEngine) {
    let report = engine.performance();
    if report.is_empty() {
        println!("No resolved setups yet.");
        return;
    }
    let rate = |r: Option<f64>| r.map_or_else(|| "-".to_string(), |r| format!("{:.1}%", r * 100.0));

    println!(
        "ALL      {:>3}W {:>3}L {:>3}BE  {}",
        report.global.wins,
        report.global.losses,
        report.global.break_evens,
        rate(report.global.win_rate())
    );
    for month in &report.months {
        println!(
            "{}  {:>3}W {:>3}L {:>3}BE  {}",
            month.label(),
            month.tally.wins,
            month.tally.losses,
            month.tally.break_evens,
            rate(month.tally.win_rate())
        );
    }
}
