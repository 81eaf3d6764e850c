use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sc_app::{
    AppError, AppResult, Outcome, ReplayStep, SessionStore, Settings, load_script, load_store,
    replay_script, save_store,
};

#[derive(Parser)]
#[command(name = "sc-cli")]
#[command(about = "SimCCT CLI - session history replay and inspection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a session snapshot file
    Validate {
        /// Path to the session YAML file
        session_path: PathBuf,
    },
    /// Replay an action script and print the resulting history
    Replay {
        /// Path to the script YAML file
        script_path: PathBuf,
        /// Settings YAML file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Override the history capacity from settings
        #[arg(long)]
        capacity: Option<usize>,
        /// Write the final store (session + history) as JSON
        #[arg(long)]
        save: Option<PathBuf>,
        /// Print machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the history timeline of a saved store
    History {
        /// Path to a store written by `replay --save`
        store_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { session_path } => cmd_validate(&session_path),
        Commands::Replay {
            script_path,
            settings,
            capacity,
            save,
            json,
        } => cmd_replay(
            &script_path,
            settings.as_deref(),
            capacity,
            save.as_deref(),
            json,
        ),
        Commands::History { store_path } => cmd_history(&store_path),
    }
}

fn cmd_validate(session_path: &Path) -> AppResult<()> {
    println!("Validating session: {}", session_path.display());
    let snapshot = sc_session::load_yaml(session_path)?;
    let alloy = snapshot.alloy_store.active_alloy();
    println!("✓ Session is valid");
    println!(
        "  Method: {:?}, alloy: {} ({} elements)",
        snapshot.configurations.method,
        alloy.name,
        alloy.compositions.len()
    );
    println!("  Fingerprint: {}", sc_session::fingerprint(&snapshot)?);
    Ok(())
}

fn cmd_replay(
    script_path: &Path,
    settings_path: Option<&Path>,
    capacity: Option<usize>,
    save: Option<&Path>,
    json: bool,
) -> AppResult<()> {
    let mut settings = Settings::load_or_default(settings_path)?;
    if let Some(capacity) = capacity {
        settings.history_capacity = capacity;
    }

    let script = load_script(script_path)?;
    info!(
        script = %script_path.display(),
        actions = script.actions.len(),
        capacity = settings.history_capacity,
        "replaying script"
    );
    let report = replay_script(&script, &settings)?;

    if let Some(path) = save {
        save_store(path, &report.store)?;
        info!(path = %path.display(), "store saved");
    }

    if json {
        let out = serde_json::json!({
            "steps": report.steps,
            "timeline": report.store.timeline()?,
        });
        let text = serde_json::to_string_pretty(&out).map_err(|e| AppError::Parse {
            what: "replay output",
            message: e.to_string(),
        })?;
        println!("{}", text);
        return Ok(());
    }

    println!("Replayed {} actions:", report.steps.len());
    for step in &report.steps {
        println!("  {}", describe_step(step));
    }
    if report.rejected_count() > 0 {
        println!("  ({} rejected)", report.rejected_count());
    }
    println!();
    print_timeline(&report.store)
}

fn cmd_history(store_path: &Path) -> AppResult<()> {
    let store = load_store(store_path)?;
    print_timeline(&store)
}

fn describe_step(step: &ReplayStep) -> String {
    let what = match (&step.outcome, &step.error) {
        (_, Some(err)) => format!("rejected: {}", err),
        (Some(Outcome::Recorded { index, evicted }), None) => {
            if *evicted {
                format!("recorded at {} (oldest evicted)", index)
            } else {
                format!("recorded at {}", index)
            }
        }
        (Some(Outcome::Loaded { index }), None) => format!("loaded {}", index),
        (Some(Outcome::Ignored), None) => "ignored (at boundary)".to_string(),
        (Some(Outcome::Reset), None) => "session reset".to_string(),
        (None, None) => "no result".to_string(),
    };
    format!("#{:<3} {:<22} {}", step.step, action_name(step), what)
}

fn action_name(step: &ReplayStep) -> &'static str {
    use sc_app::Action;
    match step.action {
        Action::UpdateConfigurations { .. } => "UpdateConfigurations",
        Action::UpdateAlloyStore { .. } => "UpdateAlloyStore",
        Action::SetDilution { .. } => "SetDilution",
        Action::StepBack => "StepBack",
        Action::StepForward => "StepForward",
        Action::JumpTo { .. } => "JumpTo",
        Action::Reset => "Reset",
    }
}

fn print_timeline(store: &SessionStore) -> AppResult<()> {
    let history = store.history();
    println!(
        "History ({} of {} slots, back: {}, forward: {}):",
        history.len(),
        history.capacity(),
        yes_no(store.can_step_back()),
        yes_no(store.can_step_forward())
    );
    for entry in store.timeline()? {
        let marker = if entry.is_current { "▶" } else { " " };
        println!(
            "  {} {:>3}  {}  {}",
            marker,
            entry.index,
            entry.fingerprint,
            entry.captured_at.format("%Y-%m-%d %H:%M:%S%.3f")
        );
    }
    Ok(())
}

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}
