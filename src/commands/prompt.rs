//! Interactive prompts on stderr/stdin.

use std::io::{self, BufRead, IsTerminal, Write};

use color_print::cformat;
use git_well::git::not_interactive;
use git_well::styling::{PROMPT_SYMBOL, eprint, eprintln};

/// Response from a `[y/N]` prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResponse {
    /// User accepted (y/yes)
    Accepted,
    /// User declined (n/no/empty/other)
    Declined,
}

fn ensure_interactive(what: &str) -> anyhow::Result<()> {
    if io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(not_interactive(what))
    }
}

/// Ask a `[y/N]` question. Fails if stdin is not a terminal.
pub fn prompt_yes_no(prompt_text: &str) -> anyhow::Result<PromptResponse> {
    ensure_interactive("confirmation")?;
    eprint!("{}", cformat!("{PROMPT_SYMBOL} {prompt_text} <bold>[y/N]</> "));
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    Ok(match input.trim().to_lowercase().as_str() {
        "y" | "yes" => PromptResponse::Accepted,
        _ => PromptResponse::Declined,
    })
}

/// Ask the user to pick one of `choices` from a numbered list.
///
/// Loops until the answer is a valid index or one of the choices verbatim.
pub fn prompt_choice(what: &str, choices: &[String]) -> anyhow::Result<String> {
    ensure_interactive(what)?;
    for (idx, choice) in choices.iter().enumerate() {
        eprintln!("{}", cformat!("  <bold>{idx}</>: {choice}"));
    }

    let last = choices.len().saturating_sub(1);
    loop {
        eprint!("{}", cformat!("{PROMPT_SYMBOL} Choose a {what} <bold>[0-{last}]</> "));
        io::stderr().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            anyhow::bail!("No {what} chosen");
        }
        if let Some(choice) = parse_choice(&input, choices) {
            return Ok(choice.to_string());
        }
        eprintln!("Not a valid choice: {:?}", input.trim());
    }
}

/// Resolve an answer given as an index or a literal choice.
fn parse_choice<'a>(input: &str, choices: &'a [String]) -> Option<&'a str> {
    let input = input.trim();
    if let Some(choice) = choices.iter().find(|c| c.as_str() == input) {
        return Some(choice);
    }
    let idx: usize = input.parse().ok()?;
    choices.get(idx).map(String::as_str)
}
