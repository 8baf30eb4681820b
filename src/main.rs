// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;

use payment_register::logging::init_logging;
use payment_register::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::default();

    // Logging is diagnostics only; the register still runs without it
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("⚠️  Logging disabled: {:#}", err);
    }

    run_ui_mode(&config)
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig) -> Result<()> {
    use payment_register::{AppState, RecordStore};

    // A broken file degrades to an empty register; the error is shown in the UI
    let (store, load_error) = RecordStore::open(&config.data_file);
    let state = AppState::with_load_error(load_error);

    let mut app = ui::App::new(store, state);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
