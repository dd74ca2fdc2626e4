use std::path::Path;

use super::glob;
use super::types::{RedirectMode, Token, Tokens};
use crate::error::{Result, ShellError};

/// Characters that end a bare word.
const WORD_BREAKS: &[char] = &['"', '\'', '`', '<', '>'];

/// Services the tokenizer needs from its caller.
///
/// The evaluator implements this: `substitute` runs a back-quoted command
/// to completion and returns everything it wrote.
pub trait WordExpander {
    /// Directory that bare words are globbed against.
    fn current_dir(&self) -> &Path;

    /// Evaluate `command` with empty input and return its captured output.
    fn substitute(&mut self, command: &str) -> Result<String>;
}

/// Collects words into their destination lists while tracking the
/// one-shot redirection mode.
#[derive(Default)]
struct Router {
    mode: RedirectMode,
    words: Vec<String>,
    input_files: Vec<String>,
    output_files: Vec<String>,
}

impl Router {
    fn redirect(&mut self, mode: RedirectMode) -> Result<()> {
        if self.mode != RedirectMode::Argument {
            return Err(ShellError::parse("missing redirection target"));
        }
        self.mode = mode;
        Ok(())
    }

    /// Route one token's worth of words, then fall back to argument mode.
    fn emit(&mut self, words: Vec<String>) {
        let target = match self.mode {
            RedirectMode::Argument => &mut self.words,
            RedirectMode::Input => &mut self.input_files,
            RedirectMode::Output => &mut self.output_files,
        };
        target.extend(words);
        self.mode = RedirectMode::Argument;
    }

    /// Drop a pending redirection without routing anything to it.
    fn reset(&mut self) {
        self.mode = RedirectMode::Argument;
    }

    fn finish(self) -> Result<Tokens> {
        if self.mode != RedirectMode::Argument {
            return Err(ShellError::parse("missing redirection target"));
        }
        let mut words = self.words.into_iter();
        let Some(name) = words.next() else {
            return Err(ShellError::parse("command is invalid"));
        };
        Ok(Tokens {
            name,
            args: words.collect(),
            input_files: self.input_files,
            output_files: self.output_files,
        })
    }
}

/// Find the byte index of the closing `quote` at or after `from`.
fn closing(text: &str, from: usize, quote: char) -> Result<usize> {
    text[from..]
        .find(quote)
        .map(|i| from + i)
        .ok_or_else(|| ShellError::parse(format!("unterminated {quote} in command")))
}

/// One scanned unit of an atomic command.
#[derive(Debug, PartialEq, Eq)]
enum Lexeme {
    /// Final token: a quoted word or a redirect marker.
    Token(Token),
    /// Unquoted word, still subject to wildcard expansion.
    Bare(String),
    /// Text between backticks.
    Substitution(String),
}

/// Scan the next lexeme at or after byte `pos`, returning it with the byte
/// index just past it. `None` once only whitespace remains.
fn next_lexeme(text: &str, pos: usize) -> Result<Option<(Lexeme, usize)>> {
    let Some((offset, c)) = text[pos..].char_indices().find(|(_, c)| !c.is_whitespace()) else {
        return Ok(None);
    };
    let start = pos + offset;

    let scanned = match c {
        '`' => {
            let end = closing(text, start + 1, '`')?;
            (Lexeme::Substitution(text[start + 1..end].to_string()), end + 1)
        }
        '"' | '\'' => {
            let end = closing(text, start + 1, c)?;
            let word = text[start + 1..end].to_string();
            (Lexeme::Token(Token::Word(word)), end + 1)
        }
        '<' => (Lexeme::Token(Token::InputRedirect), start + 1),
        '>' => (Lexeme::Token(Token::OutputRedirect), start + 1),
        _ => {
            let end = text[start..]
                .find(|ch: char| ch.is_whitespace() || WORD_BREAKS.contains(&ch))
                .map_or(text.len(), |i| start + i);
            (Lexeme::Bare(text[start..end].to_string()), end)
        }
    };
    Ok(Some(scanned))
}

/// Split one atomic command into name, arguments and redirection targets.
///
/// Back-quoted spans are evaluated through `expander` and their output is
/// spliced in front of the unscanned remainder, which is then scanned
/// afresh: substituted text is re-quoted, re-globbed and may itself
/// contain redirections.
pub fn tokenize(text: &str, expander: &mut dyn WordExpander) -> Result<Tokens> {
    let mut router = Router::default();
    let mut rest = text.to_string();
    let mut pos = 0;

    while let Some((lexeme, end)) = next_lexeme(&rest, pos)? {
        pos = end;
        match lexeme {
            Lexeme::Substitution(command) => {
                // The span consumes a pending redirection; its words are
                // routed afresh.
                router.reset();
                let output = expander.substitute(&command)?;
                log::debug!("substituted {command:?} -> {output:?}");
                rest = format!("{output} {}", &rest[end..]);
                pos = 0;
            }
            Lexeme::Token(Token::InputRedirect) => router.redirect(RedirectMode::Input)?,
            Lexeme::Token(Token::OutputRedirect) => router.redirect(RedirectMode::Output)?,
            Lexeme::Token(Token::Word(word)) => router.emit(vec![word]),
            Lexeme::Bare(word) => router.emit(glob::expand(&word, expander.current_dir())?),
        }
    }

    router.finish()
}
