//! Executable command tree built from a [`ParseNode`].

use crate::error::{Result, ShellError};
use crate::parse::ParseNode;

/// Executable AST. Each node owns its children.
///
/// Input and output are not stored here: the evaluator threads them
/// through as parameters, so the tree is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandNode {
    /// One atomic command; the text is never blank.
    Call(String),
    /// Left output becomes right input.
    Pipe(Box<CommandNode>, Box<CommandNode>),
    /// Left runs to completion, then right.
    Sequence(Box<CommandNode>, Box<CommandNode>),
}

impl CommandNode {
    /// Build a `Call`, rejecting blank text.
    pub fn call(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ShellError::parse("command is invalid"));
        }
        Ok(CommandNode::Call(text))
    }
}

/// Map a parse tree one-to-one onto a command tree.
pub fn build(node: ParseNode) -> Result<CommandNode> {
    Ok(match node {
        ParseNode::AtomicText(text) => CommandNode::call(text)?,
        ParseNode::PipeExpr(left, right) => {
            CommandNode::Pipe(Box::new(build(*left)?), Box::new(build(*right)?))
        }
        ParseNode::Sequence(left, right) => {
            CommandNode::Sequence(Box::new(build(*left)?), Box::new(build(*right)?))
        }
    })
}
