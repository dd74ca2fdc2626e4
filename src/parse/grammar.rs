use super::types::ParseNode;
use crate::error::{Result, ShellError};

/// Top-level operator separating consecutive atomic commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    /// `;`: run next after the previous completes
    Semi,
    /// `|`: feed previous output to next
    Pipe,
}

impl Operator {
    fn as_char(self) -> char {
        match self {
            Operator::Semi => ';',
            Operator::Pipe => '|',
        }
    }
}

/// Split a command line at `;` and `|`, treating single-quoted,
/// double-quoted and back-quoted spans as opaque.
///
/// Always returns `operators.len() + 1` parts; parts are trimmed and may be
/// empty (the caller decides which empties are legal).
fn split_top_level(line: &str) -> Result<(Vec<String>, Vec<Operator>)> {
    let mut parts = Vec::new();
    let mut operators = Vec::new();
    let mut buf = String::new();
    // The quote character of the span we are inside, if any.
    let mut open: Option<char> = None;

    for c in line.chars() {
        if let Some(q) = open {
            if c == q {
                open = None;
            }
            buf.push(c);
            continue;
        }
        match c {
            '\'' | '"' | '`' => {
                open = Some(c);
                buf.push(c);
            }
            ';' | '|' => {
                parts.push(buf.trim().to_string());
                operators.push(if c == ';' { Operator::Semi } else { Operator::Pipe });
                buf.clear();
            }
            _ => buf.push(c),
        }
    }

    if let Some(q) = open {
        return Err(ShellError::parse(format!("unterminated {q} in command line")));
    }
    parts.push(buf.trim().to_string());

    Ok((parts, operators))
}

/// Parse a full command line into a [`ParseNode`] tree.
///
/// A single trailing `;` is accepted and ignored. Any other empty segment
/// (`; ls`, `ls | | cat`, `ls |`) is rejected.
pub fn parse(line: &str) -> Result<ParseNode> {
    if line.trim().is_empty() {
        return Err(ShellError::parse("empty command line"));
    }
    let (mut parts, mut operators) = split_top_level(line)?;

    // Strip the trailing `;` only when a command precedes it.
    let n = parts.len();
    if operators.last() == Some(&Operator::Semi)
        && parts[n - 1].is_empty()
        && n > 1
        && !parts[n - 2].is_empty()
    {
        parts.pop();
        operators.pop();
    }

    let mut sequence: Option<ParseNode> = None;
    let mut pipeline: Option<ParseNode> = None;

    for (i, part) in parts.into_iter().enumerate() {
        if part.is_empty() {
            let after = i.checked_sub(1).and_then(|j| operators.get(j));
            let message = match (operators.get(i), after) {
                (Some(op), _) => format!("missing command before '{}'", op.as_char()),
                (None, Some(op)) => format!("missing command after '{}'", op.as_char()),
                (None, None) => "empty command line".to_string(),
            };
            return Err(ShellError::parse(message));
        }

        let atom = ParseNode::AtomicText(part);
        pipeline = Some(match pipeline.take() {
            None => atom,
            Some(left) => ParseNode::PipeExpr(Box::new(left), Box::new(atom)),
        });

        if operators.get(i) == Some(&Operator::Pipe) {
            continue;
        }

        // `;` or end of line closes the current pipeline.
        if let Some(segment) = pipeline.take() {
            sequence = Some(match sequence.take() {
                None => segment,
                Some(left) => ParseNode::Sequence(Box::new(left), Box::new(segment)),
            });
        }
    }

    sequence.ok_or_else(|| ShellError::parse("empty command line"))
}
