//! Binary entry point: parse flags, start logging, seed the library, and run
//! the Ratatui event loop until the user exits.
use clap::Parser;
use reading_list::{init_logging, run_app, seed_library, App, Config, Library};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    let library = if config.empty {
        Library::new()
    } else {
        seed_library()
    };
    tracing::info!(books = library.len(), "starting reading list");

    let mut app = App::new(library, config.columns);
    let result = run_app(&mut app);
    if let Err(err) = &result {
        tracing::error!(error = %err, "terminal session failed");
    }
    result
}
