//! Prefix stripping and tokenizing.

/// A command name candidate and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Case-folded first token.
    pub name: String,
    pub args: Vec<String>,
}

/// Parse `content` as a command invocation.
///
/// Returns `None` when the text does not start with `prefix` or nothing but
/// whitespace follows it. The prefix match is case-sensitive; the command
/// name is lower-cased, arguments are kept as typed.
pub fn parse_invocation(content: &str, prefix: &str) -> Option<Invocation> {
    let rest = content.strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    let name = tokens.next()?.to_lowercase();
    Some(Invocation {
        name,
        args: tokens.map(str::to_string).collect(),
    })
}
