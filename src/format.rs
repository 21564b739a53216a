// Response formatter: turns a decoded REST response into a short summary.
//
// The first entry of `RENDERERS` whose key is present at the top level
// wins, so a response carrying several recognised keys renders the same
// way every time. Anything unrecognised, or anything a renderer cannot
// make sense of, is shown as pretty-printed JSON.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::FormatError;
use crate::registry::Chain;

type Renderer = fn(&Map<String, Value>, &Chain) -> Result<String, FormatError>;

const RENDERERS: &[(&str, Renderer)] = &[
    ("tally", render_tally),
    ("balances", render_balances),
    ("proposals", render_proposals),
    ("validators", render_validators),
    ("pool", render_pool),
    ("rewards", render_rewards),
    ("commission", render_commission),
    ("block", render_block),
    ("node_info", render_node_info),
];

const LARGE_AMOUNT: i128 = 1_000_000;
const MAX_PROPOSALS: usize = 5;
const MAX_VALIDATORS: usize = 3;
const PROPOSER_CHARS: usize = 20;

/// Render `data` for display. `chain` is the chain the query went to.
pub fn format_response(data: &Value, chain: &Chain) -> String {
    let obj = match data {
        Value::Null => return "No data received".into(),
        Value::Object(map) if map.is_empty() => return "No data received".into(),
        Value::Object(map) => map,
        other => return pretty_json(other),
    };

    for (key, render) in RENDERERS {
        if obj.contains_key(*key) {
            return match render(obj, chain) {
                Ok(text) => text,
                Err(e) => {
                    warn!(key, error = %e, "summary unavailable, showing raw JSON");
                    pretty_json(data)
                }
            };
        }
    }
    pretty_json(data)
}

/// Two-space indented JSON, non-ASCII kept as-is.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(n: i128) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Capitalise the first letter of every run of letters, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Integer value of a JSON string or number. Cosmos encodes amounts as
/// strings, so both are accepted.
fn parse_int(value: &Value) -> Option<i128> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        _ => None,
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Token amounts above a million get separators, smaller ones are shown
/// plainly and non-numeric ones verbatim.
fn amount(value: &Value) -> String {
    match parse_int(value) {
        Some(n) if n > LARGE_AMOUNT => group_thousands(n),
        Some(n) => n.to_string(),
        None => scalar(value),
    }
}

fn percent(part: i128, total: i128) -> String {
    format!("{:.1}", part as f64 / total as f64 * 100.0)
}

fn header(title: &str, width: usize) -> Vec<String> {
    vec![title.to_string(), "=".repeat(width)]
}

fn unknown() -> Value {
    Value::String("unknown".into())
}

fn zero() -> Value {
    Value::String("0".into())
}

/// Missing or `null` lists are empty; anything else must be a list of `T`.
fn list_of<T: DeserializeOwned>(value: Option<&Value>) -> Result<Vec<T>, FormatError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(v) => Ok(Vec::<T>::deserialize(v)?),
    }
}

#[derive(Debug, Deserialize)]
struct Coin {
    #[serde(default = "unknown")]
    denom: Value,
    #[serde(default = "zero")]
    amount: Value,
}

#[derive(Debug, Deserialize)]
struct Proposal {
    #[serde(default = "unknown")]
    id: Value,
    #[serde(default = "unknown")]
    status: Value,
}

#[derive(Debug, Default, Deserialize)]
struct Description {
    #[serde(default)]
    moniker: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Validator {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    description: Description,
    #[serde(default = "zero")]
    tokens: Value,
}

fn render_tally(data: &Map<String, Value>, _chain: &Chain) -> Result<String, FormatError> {
    let tally = &data["tally"];
    let count = |field: &'static str| match tally.get(field) {
        None => Ok(0),
        Some(v) => parse_int(v).ok_or_else(|| FormatError::NotAnInteger {
            field,
            value: v.to_string(),
        }),
    };
    let yes = count("yes_count")?;
    let no = count("no_count")?;
    let abstain = count("abstain_count")?;
    let veto = count("no_with_veto_count")?;
    let total = [no, abstain, veto]
        .into_iter()
        .try_fold(yes, i128::checked_add)
        .ok_or(FormatError::Overflow)?;

    let mut lines = header("🗳️  PROPOSAL TALLY RESULTS", 40);
    if total > 0 {
        for (label, n) in [("✅ Yes", yes), ("❌ No", no), ("⏸️  Abstain", abstain), ("🚫 Veto", veto)] {
            lines.push(format!("{}: {} ({}%)", label, group_thousands(n), percent(n, total)));
        }
        lines.push(String::new());
        lines.push(format!("📊 Total Votes: {}", group_thousands(total)));
    } else {
        lines.push("No votes cast yet".into());
    }
    Ok(lines.join("\n"))
}

fn render_balances(data: &Map<String, Value>, _chain: &Chain) -> Result<String, FormatError> {
    let mut lines = header("💰 ACCOUNT BALANCES", 30);
    let balances: Vec<Coin> = list_of(data.get("balances"))?;
    if balances.is_empty() {
        lines.push("No balances found".into());
    }
    for coin in &balances {
        lines.push(format!("🪙 {}: {}", scalar(&coin.denom), amount(&coin.amount)));
    }
    Ok(lines.join("\n"))
}

fn render_proposals(data: &Map<String, Value>, _chain: &Chain) -> Result<String, FormatError> {
    let mut lines = header("📋 GOVERNANCE PROPOSALS", 35);
    let proposals: Vec<Proposal> = list_of(data.get("proposals"))?;
    if proposals.is_empty() {
        lines.push("No proposals found".into());
    }
    for p in proposals.iter().take(MAX_PROPOSALS) {
        let status = scalar(&p.status).replace("PROPOSAL_STATUS_", "");
        lines.push(format!("📄 Proposal #{}: {}", scalar(&p.id), title_case(&status)));
    }
    if proposals.len() > MAX_PROPOSALS {
        lines.push(format!("... and {} more proposals", proposals.len() - MAX_PROPOSALS));
    }
    Ok(lines.join("\n"))
}

fn render_validators(data: &Map<String, Value>, _chain: &Chain) -> Result<String, FormatError> {
    let mut lines = header("⚡ VALIDATORS", 20);
    let validators: Vec<Validator> = list_of(data.get("validators"))?;
    if validators.is_empty() {
        lines.push("No validators found".into());
        return Ok(lines.join("\n"));
    }

    let active: Vec<&Validator> = validators
        .iter()
        .filter(|v| v.status.as_deref() == Some("BOND_STATUS_BONDED"))
        .collect();
    lines.push(format!("🟢 Active Validators: {}", active.len()));
    lines.push(format!("📊 Total Validators: {}", validators.len()));
    lines.push(String::new());
    for (i, v) in active.iter().take(MAX_VALIDATORS).enumerate() {
        let moniker = v.description.moniker.as_deref().unwrap_or("Unknown");
        lines.push(format!("{}. {} - {} tokens", i + 1, moniker, amount(&v.tokens)));
    }
    Ok(lines.join("\n"))
}

fn render_pool(data: &Map<String, Value>, _chain: &Chain) -> Result<String, FormatError> {
    let mut lines = header("🏊 STAKING POOL", 20);
    let pool = &data["pool"];
    let bonded = pool.get("bonded_tokens").cloned().unwrap_or_else(zero);
    let not_bonded = pool.get("not_bonded_tokens").cloned().unwrap_or_else(zero);

    let parsed = parse_int(&bonded)
        .zip(parse_int(&not_bonded))
        .and_then(|(b, n)| b.checked_add(n).map(|total| (b, n, total)));
    match parsed {
        Some((b, n, total)) => {
            lines.push(format!("🔒 Bonded: {}", group_thousands(b)));
            lines.push(format!("🔓 Unbonded: {}", group_thousands(n)));
            lines.push(format!("📊 Total: {}", group_thousands(total)));
            if total > 0 {
                lines.push(format!("📈 Bonded %: {}%", percent(b, total)));
            }
        }
        None => {
            lines.push(format!("🔒 Bonded: {}", scalar(&bonded)));
            lines.push(format!("🔓 Unbonded: {}", scalar(&not_bonded)));
        }
    }
    Ok(lines.join("\n"))
}

fn render_coins(mut lines: Vec<String>, coins: &[Coin], empty: &str) -> String {
    if coins.is_empty() {
        lines.push(empty.into());
    }
    for coin in coins {
        lines.push(format!("🪙 {}: {}", scalar(&coin.denom), scalar(&coin.amount)));
    }
    lines.join("\n")
}

fn render_rewards(data: &Map<String, Value>, _chain: &Chain) -> Result<String, FormatError> {
    let total: Vec<Coin> = list_of(data.get("total"))?;
    Ok(render_coins(header("🎁 DELEGATION REWARDS", 25), &total, "No rewards available"))
}

fn render_commission(data: &Map<String, Value>, _chain: &Chain) -> Result<String, FormatError> {
    let commission: Vec<Coin> = list_of(data["commission"].get("commission"))?;
    Ok(render_coins(header("💼 VALIDATOR COMMISSION", 30), &commission, "No commission data"))
}

fn render_block(data: &Map<String, Value>, _chain: &Chain) -> Result<String, FormatError> {
    let mut lines = header("🧱 BLOCK INFORMATION", 25);
    let head = &data["block"]["header"];
    let field = |key: &str| head.get(key).map(scalar).unwrap_or_else(|| "unknown".into());
    let proposer: String = field("proposer_address").chars().take(PROPOSER_CHARS).collect();
    lines.push(format!("📏 Height: {}", field("height")));
    lines.push(format!("⏰ Time: {}", field("time")));
    lines.push(format!("👤 Proposer: {}...", proposer));
    Ok(lines.join("\n"))
}

fn render_node_info(data: &Map<String, Value>, chain: &Chain) -> Result<String, FormatError> {
    let mut lines = header("🖥️  NODE INFORMATION", 25);
    let version = &data["node_info"]["application_version"];
    let field = |key: &str| version.get(key).map(scalar).unwrap_or_else(|| "unknown".into());
    lines.push(format!("📦 Name: {}", field("name")));
    lines.push(format!("🏷️  Version: {}", field("version")));
    lines.push(format!("🌐 Network: {}", chain.name));
    Ok(lines.join("\n"))
}
