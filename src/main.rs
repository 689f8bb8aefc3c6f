use clap::Parser;

use mazetrace::{app, config::Config, error::AppError, logging};

fn main() -> Result<(), AppError> {
    let config = Config::parse();
    // Held until exit so buffered log lines are flushed
    let _log_guard = logging::init(&config.log_file, config.log_level)?;
    tracing::info!("[main] starting with {:?}", config);

    let mut stdout = std::io::stdout();
    if config.headless {
        return app::run_headless(&config, &mut stdout);
    }

    app::setup_terminal(&mut stdout)?;
    let result = app::run(&config, &mut stdout);
    app::restore_terminal(&mut stdout)?;
    if let Err(e) = &result {
        tracing::error!("[main] exiting with error: {}", e);
    }
    result
}
