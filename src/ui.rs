// UI layer: the interactive query loop. Chain -> module -> endpoint ->
// parameters -> request -> summary, then query again, switch chain or exit.
// Everything is synchronous; one request is in flight at most.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{PromptError, QueryError};
use crate::format::format_response;
use crate::menu::{ask, choose, InterruptFlag, Prompt};
use crate::path::build_path;
use crate::registry::{param_prompt, DEFAULT_CHAIN};
use crate::session::Session;

const RULE_WIDTH: usize = 50;

/// What to do after a query has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Query,
    Switch,
    Exit,
}

impl NextAction {
    /// Blank or a "yes"-ish answer queries again; unknown answers exit.
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "s" | "switch" => NextAction::Switch,
            "q" | "query" | "y" | "yes" | "" => NextAction::Query,
            _ => NextAction::Exit,
        }
    }
}

/// Run the interactive session until the user exits or interrupts.
/// Returns an error only when the console itself stops working.
///
/// `interrupt` is checked once each request has completed, so Ctrl-C during
/// a request takes effect after the response arrives.
pub fn main_menu<P>(session: &mut Session, api: &ApiClient, prompt: &mut P, interrupt: &InterruptFlag) -> Result<()>
where
    P: Prompt + ?Sized,
{
    match run(session, api, prompt, interrupt) {
        Err(e) if is_interrupt(&e) => {
            prompt.show("")?;
            prompt.show("👋 Goodbye!")?;
            Ok(())
        }
        other => other,
    }
}

fn is_interrupt(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<PromptError>(), Some(PromptError::Interrupted))
}

fn run<P>(session: &mut Session, api: &ApiClient, prompt: &mut P, interrupt: &InterruptFlag) -> Result<()>
where
    P: Prompt + ?Sized,
{
    prompt.show("🚀 Welcome to Cronos Chain Data Query CLI")?;
    prompt.show(&"=".repeat(RULE_WIDTH))?;
    prompt.show("This tool allows you to query data from Cronos EVM and POS chains")?;

    select_chain(session, prompt, "Selected")?;

    loop {
        match query_once(session, api, prompt, interrupt) {
            Ok(NextAction::Exit) => {
                prompt.show("👋 Goodbye!")?;
                return Ok(());
            }
            Ok(_) => {}
            // Console failures and interrupts end the session.
            Err(e) if e.is::<PromptError>() => return Err(e),
            Err(e) => {
                warn!(error = %e, "query step failed");
                prompt.error(&format!("❌ An error occurred: {:#}", e))?;
            }
        }
    }
}

fn select_chain<P>(session: &mut Session, prompt: &mut P, verb: &str) -> Result<()>
where
    P: Prompt + ?Sized,
{
    let options: Vec<(&'static str, String)> = session
        .registry()
        .chains()
        .iter()
        .map(|c| {
            let marker = if c.key == DEFAULT_CHAIN { "⭐ " } else { "   " };
            (c.key, format!("{}{} - {}", marker, c.name, c.description))
        })
        .collect();
    let key = choose(prompt, "Which chain would you like to query? (EVM is recommended)", &options)?;

    match session.switch_chain(key) {
        Ok(chain) => {
            prompt.show("")?;
            prompt.show(&format!("✅ {}: {}", verb, chain.name))?;
            prompt.show(&format!("🌐 Base URL: {}", chain.base_url))?;
        }
        Err(e) => prompt.error(&format!("❌ Invalid chain selection: {}", e))?,
    }
    Ok(())
}

/// One pass through the menus. Request failures are reported here and do
/// not propagate.
fn query_once<P>(
    session: &mut Session,
    api: &ApiClient,
    prompt: &mut P,
    interrupt: &InterruptFlag,
) -> Result<NextAction>
where
    P: Prompt + ?Sized,
{
    let modules = session.registry().modules();
    let module_options: Vec<_> = modules.iter().map(|m| (m, m.name.to_string())).collect();
    let module = choose(prompt, "Which module would you like to check?", &module_options)?;

    let endpoint_options: Vec<_> = module.endpoints.iter().map(|e| (e.key, e.name.to_string())).collect();
    let endpoint_key = choose(
        prompt,
        &format!("What would you like to check in {}?", module.name),
        &endpoint_options,
    )?;
    let endpoint = session
        .registry()
        .lookup(session.current_chain().key, module.key, endpoint_key)?;

    let mut params = HashMap::new();
    for &param in endpoint.params {
        let value = ask(prompt, &param_prompt(param), true)?;
        params.insert(param.to_string(), value);
    }
    let path = build_path(endpoint.path, &params)
        .with_context(|| format!("building path for {}/{}", module.key, endpoint.key))?;

    prompt.show("")?;
    prompt.show(&format!("🔄 Making request to {}...", endpoint.path))?;
    let chain = session.current_chain();
    let result = fetch_with_spinner(api, &chain.base_url, &path);
    interrupt.check()?;
    match result {
        Ok(data) => {
            prompt.show("")?;
            prompt.show("✅ Result:")?;
            prompt.show(&"-".repeat(RULE_WIDTH))?;
            prompt.show(&format_response(&data, chain))?;
        }
        Err(e) => {
            debug!(error = %e, %path, "request failed");
            let message = match &e {
                QueryError::Decode(_) => format!("❌ Error parsing JSON response: {}", e),
                _ => format!("❌ Error making request: {}", e),
            };
            prompt.error(&message)?;
            prompt.error("❌ Failed to retrieve data")?;
        }
    }

    prompt.show("")?;
    prompt.show(&format!("Current chain: {}", chain.name))?;
    prompt.show("")?;
    let answer = prompt.read_line("Options: (q)uery again, (s)witch chain, (e)xit")?;
    let next = NextAction::parse(&answer);
    if next == NextAction::Switch {
        select_chain(session, prompt, "Switched to")?;
    }
    Ok(next)
}

fn fetch_with_spinner(api: &ApiClient, base_url: &str, path: &str) -> Result<Value, QueryError> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Querying...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = api.fetch(base_url, path);
    spinner.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_action_answers() {
        assert_eq!(NextAction::parse(""), NextAction::Query);
        assert_eq!(NextAction::parse(" Y "), NextAction::Query);
        assert_eq!(NextAction::parse("query"), NextAction::Query);
        assert_eq!(NextAction::parse("S"), NextAction::Switch);
        assert_eq!(NextAction::parse("switch"), NextAction::Switch);
        assert_eq!(NextAction::parse("e"), NextAction::Exit);
        assert_eq!(NextAction::parse("exit"), NextAction::Exit);
        assert_eq!(NextAction::parse("whatever"), NextAction::Exit);
    }
}
