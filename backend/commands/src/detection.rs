/// Terminal input parsing.
///
/// The first whitespace-separated token is the command name (lower-cased);
/// the rest are positional arguments. There is no quoting or escaping.
use crate::types::CommandInvocation;

/// Parse a line of terminal input. Returns `None` for blank input.
pub fn detect_command(text: &str) -> Option<CommandInvocation> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut tokens = trimmed.split_whitespace();
    let name = tokens.next()?.to_lowercase();

    Some(CommandInvocation {
        name,
        args: tokens.map(String::from).collect(),
    })
}
