// Library root
// -----------
// This crate exposes the pieces of the Cronos query console. The binary
// (`main.rs`) wires them into the interactive CLI.
//
// Module responsibilities:
// - `registry`: the two chains and the Cosmos SDK REST endpoints, kept in
//   menu order.
// - `session`: which chain the next query goes to.
// - `path`: fills `{param}` tokens in an endpoint template.
// - `api`: blocking HTTP GET returning decoded JSON.
// - `menu`: numbered menus and free-text questions over a `Prompt`.
// - `format`: turns a response into a short human-readable summary.
// - `ui`: the interactive loop tying the above together.
//
// Everything except `ui` and the terminal prompt is free of console I/O,
// so it can be tested without a TTY.
pub mod api;
pub mod error;
pub mod format;
pub mod menu;
pub mod path;
pub mod registry;
pub mod session;
pub mod ui;
