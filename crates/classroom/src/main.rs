#![forbid(unsafe_code)]

//! # Classroom
//!
//! Terminal classroom exercises: todo lists, a GPA calculator and a member
//! directory saved under the data directory.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p classroom -- --page directory
//! ```

use std::sync::Arc;

use anyhow::Context;
use recordbook::{FileStore, KeyValueStore};
use tracing::info;

use classroom::app::App;
use classroom::cli::Cli;
use classroom::config::Config;
use classroom::program::Program;
use classroom::theme::Theme;
use classroom::{logging, selfcheck};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = Config::from_cli(&cli);
    config.validate()?;

    match logging::init(&config) {
        Ok(path) => info!(log = %path.display(), "logging started"),
        Err(e) => eprintln!("classroom: logging disabled: {e}"),
    }
    info!(config = %config.to_diagnostic_string(), "starting");

    if config.is_headless() {
        let report = selfcheck::run()?;
        println!("{report}");
        return Ok(());
    }

    let port: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.data_dir));
    let app = App::new(port, Theme::new(config.use_color())).with_start_page(config.start_page);

    let mut program = Program::new(app);
    if config.alt_screen {
        program = program.with_alt_screen();
    }
    let app = program.run().context("terminal session failed")?;

    info!(page = %app.page(), "exited");
    Ok(())
}
