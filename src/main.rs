// Entry point: parse options, load the dataset once, then hand control to
// the interactive menus until the user exits.
//
// Prompts use a line editor, so Ctrl-C cancels the prompt it interrupts:
// inside a sub-menu that returns to the main menu, at the main menu it ends
// the session.
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use park_reviews::config::Cli;
use park_reviews::loader;
use park_reviews::menu::App;
use park_reviews::tui::{Console, Terminal};
use park_reviews::util;
use std::io;
use std::process;

fn run(cli: &Cli) -> Result<()> {
    let terminal = Terminal::new().context("opening terminal")?;
    let mut console = Console::new(terminal, io::stdout());
    console.banner();

    let reviews = loader::load_reviews(&cli.data)
        .with_context(|| format!("loading dataset {}", cli.data.display()))?;
    console.show_msg(&format!("Dataset loaded with {} lines.\n", util::format_int(reviews.len())));

    App::new(&reviews, cli.out_dir.clone()).run(&mut console);
    info!("Session finished");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Fatal error: {:#}", e);
        process::exit(1);
    }
}
