// Menu engine: numbered choices and free-text questions over a `Prompt`.
//
// Two prompt back ends exist. `TerminalPrompt` drives an interactive TTY
// through `dialoguer`; `LinePrompt` reads plain lines from any reader and
// is used for piped input and in tests.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::style::Stylize;
use dialoguer::Input;

use crate::error::{PromptError, SelectionError};

/// Line-based console the menus talk to.
pub trait Prompt {
    /// Print one line of normal output.
    fn show(&mut self, text: &str) -> Result<(), PromptError>;

    /// Print one line of error output.
    fn error(&mut self, text: &str) -> Result<(), PromptError>;

    /// Ask for a line of input. The returned string has its line ending
    /// removed but is otherwise untouched.
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;
}

/// Ctrl-C and end of input both mean the user wants out.
fn prompt_error(err: io::Error) -> PromptError {
    match err.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => PromptError::Interrupted,
        _ => PromptError::Io(err),
    }
}

/// Set by SIGINT. Outside raw-mode prompts the terminal delivers Ctrl-C as
/// a signal, so the flag is polled after each read and each request.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    /// A flag raised by SIGINT instead of the default terminate action.
    pub fn install() -> io::Result<Self> {
        let flag = InterruptFlag::default();
        signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&flag.0))?;
        Ok(flag)
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<(), PromptError> {
        if self.is_raised() {
            Err(PromptError::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Interactive terminal backed by `dialoguer`.
#[derive(Debug, Default)]
pub struct TerminalPrompt {
    interrupt: InterruptFlag,
}

impl TerminalPrompt {
    pub fn new(interrupt: InterruptFlag) -> Self {
        TerminalPrompt { interrupt }
    }
}

impl Prompt for TerminalPrompt {
    fn show(&mut self, text: &str) -> Result<(), PromptError> {
        println!("{}", text);
        Ok(())
    }

    fn error(&mut self, text: &str) -> Result<(), PromptError> {
        println!("{}", text.red());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.interrupt.check()?;
        let line = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        self.interrupt.check()?;
        Ok(line)
    }
}

/// Plain reader/writer pair, e.g. a locked stdin and stdout.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
    interrupt: InterruptFlag,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompt {
            input,
            output,
            interrupt: InterruptFlag::default(),
        }
    }

    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn show(&mut self, text: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{}", text).map_err(prompt_error)
    }

    fn error(&mut self, text: &str) -> Result<(), PromptError> {
        self.show(text)
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.interrupt.check()?;
        write!(self.output, "{}: ", prompt).map_err(prompt_error)?;
        self.output.flush().map_err(prompt_error)?;
        let mut line = String::new();
        if self.input.read_line(&mut line).map_err(prompt_error)? == 0 {
            return Err(PromptError::Interrupted);
        }
        self.interrupt.check()?;
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Turn a typed answer into a zero-based index into `len` options.
pub fn parse_selection(input: &str, len: usize) -> Result<usize, SelectionError> {
    let input = input.trim();
    let n: i64 = match input.parse() {
        Ok(n) => n,
        // Too many digits for i64 is still a number, just not one on the list.
        Err(_) if is_integer(input) => return Err(SelectionError::OutOfRange { max: len }),
        Err(_) => return Err(SelectionError::InvalidNumber),
    };
    if n >= 1 && (n as u64) <= len as u64 {
        Ok(n as usize - 1)
    } else {
        Err(SelectionError::OutOfRange { max: len })
    }
}

/// Show `options` as a 1-based list and ask until a valid number is
/// entered. Returns the key of the chosen option.
pub fn choose<P, K>(prompt: &mut P, title: &str, options: &[(K, String)]) -> Result<K, PromptError>
where
    P: Prompt + ?Sized,
    K: Copy,
{
    prompt.show("")?;
    prompt.show(&format!("🔹 {}", title))?;
    prompt.show(&"=".repeat(50))?;
    for (i, (_, label)) in options.iter().enumerate() {
        prompt.show(&format!("{}. {}", i + 1, label))?;
    }

    let question = format!("Select an option (1-{})", options.len());
    loop {
        prompt.show("")?;
        let answer = prompt.read_line(&question)?;
        match parse_selection(&answer, options.len()) {
            Ok(idx) => return Ok(options[idx].0),
            Err(e) => prompt.error(&e.to_string())?,
        }
    }
}

/// Ask a free-text question. With `required`, blank answers are rejected.
pub fn ask<P>(prompt: &mut P, question: &str, required: bool) -> Result<String, PromptError>
where
    P: Prompt + ?Sized,
{
    loop {
        let answer = prompt.read_line(question)?;
        let answer = answer.trim();
        if answer.is_empty() && required {
            prompt.error("❌ This field is required")?;
            continue;
        }
        return Ok(answer.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> LinePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompt: LinePrompt<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompt.into_output()).unwrap()
    }

    fn options() -> Vec<(&'static str, String)> {
        vec![
            ("auth", "Authentication & Accounts".to_string()),
            ("bank", "Bank & Balances".to_string()),
            ("gov", "Governance".to_string()),
        ]
    }

    #[test]
    fn reprompts_until_valid_choice() {
        let mut prompt = scripted("abc\n99\n2\n");
        let key = choose(&mut prompt, "Which module would you like to check?", &options()).unwrap();
        assert_eq!(key, "bank");

        let out = output(prompt);
        assert_eq!(out.matches("Select an option (1-3): ").count(), 3);
        assert_eq!(out.matches("❌ Please enter a valid number").count(), 1);
        assert_eq!(out.matches("❌ Please enter a number between 1 and 3").count(), 1);
    }

    #[test]
    fn lists_options_in_order() {
        let mut prompt = scripted("1\n");
        choose(&mut prompt, "Pick", &options()).unwrap();
        let out = output(prompt);
        let auth = out.find("1. Authentication & Accounts").unwrap();
        let bank = out.find("2. Bank & Balances").unwrap();
        let gov = out.find("3. Governance").unwrap();
        assert!(auth < bank && bank < gov);
        assert!(out.contains("🔹 Pick"));
    }

    #[test]
    fn end_of_input_is_an_interrupt() {
        let mut prompt = scripted("7\n");
        let err = choose(&mut prompt, "Pick", &options()).unwrap_err();
        assert!(matches!(err, PromptError::Interrupted));
    }

    #[test]
    fn parse_selection_bounds() {
        assert_eq!(parse_selection(" 3 ", 3), Ok(2));
        assert_eq!(parse_selection("0", 3), Err(SelectionError::OutOfRange { max: 3 }));
        assert_eq!(parse_selection("-1", 3), Err(SelectionError::OutOfRange { max: 3 }));
        assert_eq!(parse_selection("", 3), Err(SelectionError::InvalidNumber));
        assert_eq!(parse_selection("1.5", 3), Err(SelectionError::InvalidNumber));
        assert_eq!(
            parse_selection("99999999999999999999", 3),
            Err(SelectionError::OutOfRange { max: 3 })
        );
        assert_eq!(parse_selection("-", 3), Err(SelectionError::InvalidNumber));
    }

    #[test]
    fn ask_requires_non_blank_answer() {
        let mut prompt = scripted("\n   \n cro1abc \n");
        let value = ask(&mut prompt, "Enter address", true).unwrap();
        assert_eq!(value, "cro1abc");
        assert_eq!(output(prompt).matches("❌ This field is required").count(), 2);
    }

    #[test]
    fn ask_optional_accepts_blank() {
        let mut prompt = scripted("\n");
        assert_eq!(ask(&mut prompt, "Filter", false).unwrap(), "");
    }

    #[test]
    fn raised_interrupt_stops_the_next_read() {
        let interrupt = InterruptFlag::default();
        let mut prompt = scripted("1\n2\n").with_interrupt(interrupt.clone());
        assert_eq!(prompt.read_line("first").unwrap(), "1");
        interrupt.raise();
        assert!(matches!(prompt.read_line("second"), Err(PromptError::Interrupted)));
    }

    #[test]
    fn io_errors_map_to_interrupt_or_io() {
        let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(prompt_error(eof), PromptError::Interrupted));
        let broken = io::Error::new(io::ErrorKind::BrokenPipe, "pipe");
        assert!(matches!(prompt_error(broken), PromptError::Io(_)));
    }
}
