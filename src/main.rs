// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, create the API client and the
//   session, and hand them to the UI loop.
// - A TTY gets the dialoguer prompts; piped stdin is read line by line.

use std::io::{self, IsTerminal};

use anyhow::Context;
use cronosquery::{
    api::ApiClient,
    menu::{InterruptFlag, LinePrompt, TerminalPrompt},
    session::Session,
    ui::main_menu,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr and stay quiet unless RUST_LOG asks for more.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Ctrl-C outside a prompt raises this flag instead of killing the process.
    let interrupt = InterruptFlag::install().context("Failed to install SIGINT handler")?;
    let api = ApiClient::new()?;
    let mut session = Session::default();

    // Blocks until the user exits or presses Ctrl-C.
    if io::stdin().is_terminal() {
        let mut prompt = TerminalPrompt::new(interrupt.clone());
        main_menu(&mut session, &api, &mut prompt, &interrupt)
    } else {
        let mut prompt =
            LinePrompt::new(io::stdin().lock(), io::stdout().lock()).with_interrupt(interrupt.clone());
        main_menu(&mut session, &api, &mut prompt, &interrupt)
    }
}
