pub mod glob;
pub mod grammar;
pub mod tokenize;
pub mod types;

pub use grammar::parse;
pub use tokenize::{WordExpander, tokenize};
pub use types::{Invocation, ParseNode, RedirectMode, Token, Tokens};
