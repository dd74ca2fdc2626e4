//! Types produced by the parser and tokenizer and consumed by the eval layer.

use crate::error::{Result, ShellError};

/// Transient parse tree of a full command line.
///
/// Precedence, lowest to highest: `;` sequencing, `|` piping, atomic text.
/// Both operators are left-associative, so `a | b | c` parses as
/// `PipeExpr(PipeExpr(a, b), c)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    /// `left ; right`
    Sequence(Box<ParseNode>, Box<ParseNode>),
    /// `left | right`
    PipeExpr(Box<ParseNode>, Box<ParseNode>),
    /// One atomic command, trimmed, with quotes and backticks left intact.
    AtomicText(String),
}

/// Lexical unit of an atomic command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    /// `<`
    InputRedirect,
    /// `>`
    OutputRedirect,
}

/// Where the next emitted word is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectMode {
    #[default]
    Argument,
    Input,
    Output,
}

/// Raw tokenizer result: every word routed to its destination list.
///
/// Redirection targets are collected as lists so that the count rule can
/// be checked in one place by [`Tokens::into_invocation`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub name: String,
    pub args: Vec<String>,
    pub input_files: Vec<String>,
    pub output_files: Vec<String>,
}

impl Tokens {
    /// Enforce "at most one input and one output redirection".
    pub fn into_invocation(self) -> Result<Invocation> {
        let Tokens {
            name,
            args,
            mut input_files,
            mut output_files,
        } = self;
        if input_files.len() > 1 {
            return Err(ShellError::parse("only one input redirection permitted"));
        }
        if output_files.len() > 1 {
            return Err(ShellError::parse("only one output redirection permitted"));
        }
        Ok(Invocation {
            name,
            args,
            input_file: input_files.pop(),
            output_file: output_files.pop(),
        })
    }
}

/// A fully resolved invocation, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
    pub input_file: Option<String>,
    pub output_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(inputs: &[&str], outputs: &[&str]) -> Tokens {
        Tokens {
            name: "app".into(),
            args: vec!["x".into()],
            input_files: inputs.iter().map(|s| s.to_string()).collect(),
            output_files: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn single_redirections_resolve() {
        let inv = tokens(&["in"], &["out"]).into_invocation().unwrap();
        assert_eq!(inv.input_file.as_deref(), Some("in"));
        assert_eq!(inv.output_file.as_deref(), Some("out"));
        assert_eq!(inv.args, vec!["x"]);
    }

    #[test]
    fn no_redirections_resolve() {
        let inv = tokens(&[], &[]).into_invocation().unwrap();
        assert!(inv.input_file.is_none());
        assert!(inv.output_file.is_none());
    }

    #[test]
    fn two_inputs_rejected() {
        let err = tokens(&["a", "b"], &[]).into_invocation().unwrap_err();
        assert_eq!(err.to_string(), "only one input redirection permitted");
    }

    #[test]
    fn two_outputs_rejected() {
        let err = tokens(&[], &["a", "b"]).into_invocation().unwrap_err();
        assert_eq!(err.to_string(), "only one output redirection permitted");
    }
}
