//! Built-in applications: the operations an invocation name resolves to.
//!
//! Each application is a stateless transformation over its arguments, the
//! effective input string and an output sink. Only `cd` touches the
//! [`ShellContext`]; everything else reads it for path resolution.

/// Change the working directory.
pub mod cd;
/// Concatenate files or pass input through.
pub mod cat;
/// Select byte ranges from each line.
pub mod cut;
/// Print arguments.
pub mod echo;
/// Recursively list files matching a wildcard.
pub mod find;
/// Print lines matching a regular expression.
pub mod grep;
/// First lines of a file or input.
pub mod head;
/// List directory entries.
pub mod ls;
/// Print the working directory.
pub mod pwd;
/// Sort lines.
pub mod sort;
/// Last lines of a file or input.
pub mod tail;
/// Collapse adjacent duplicate lines.
pub mod uniq;

use std::io::Write;

use crate::error::{Result, ShellError};
use crate::eval::ShellContext;

/// Trait for runnable applications.
///
/// Implementations must not retain `output` beyond the call.
pub trait Application: Send + Sync {
    /// Run with the given arguments, effective input and output sink.
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        input: &str,
        output: &mut dyn Write,
    ) -> Result<()>;
}

/// Instantiate the built-in registered under `name`, if there is one.
pub fn builtin(name: &str) -> Option<Box<dyn Application>> {
    let app: Box<dyn Application> = match name {
        "cd" => Box::new(cd::Cd),
        "pwd" => Box::new(pwd::Pwd),
        "ls" => Box::new(ls::Ls),
        "cat" => Box::new(cat::Cat),
        "echo" => Box::new(echo::Echo),
        "head" => Box::new(head::Head),
        "tail" => Box::new(tail::Tail),
        "grep" => Box::new(grep::Grep),
        "cut" => Box::new(cut::Cut),
        "find" => Box::new(find::Find),
        "uniq" => Box::new(uniq::Uniq),
        "sort" => Box::new(sort::Sort),
        _ => return None,
    };
    Some(app)
}

/// Read a file named relative to the working directory.
pub(crate) fn read_file(ctx: &ShellContext, app: &str, name: &str) -> Result<String> {
    let path = ctx.resolve(name);
    if path.is_dir() {
        return Err(ShellError::app(app, format!("{name} is a directory")));
    }
    std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ShellError::app(app, format!("{name} does not exist")),
        _ => ShellError::app(app, format!("cannot open {name}")),
    })
}

/// Text to operate on: the named file if given, else the effective input.
pub(crate) fn source(
    ctx: &ShellContext,
    app: &str,
    file: Option<&str>,
    input: &str,
) -> Result<String> {
    match file {
        Some(name) => read_file(ctx, app, name),
        None => Ok(input.to_string()),
    }
}

/// Write each line followed by a newline.
pub(crate) fn write_lines<'a>(
    output: &mut dyn Write,
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    for line in lines {
        writeln!(output, "{line}")?;
    }
    output.flush()?;
    Ok(())
}

/// Parse `[-n N] [FILE]`, shared by `head` and `tail`.
pub(crate) fn line_count_args<'a>(
    app: &str,
    args: &'a [String],
) -> Result<(usize, Option<&'a str>)> {
    const DEFAULT_LINES: usize = 10;
    match args {
        [] => Ok((DEFAULT_LINES, None)),
        [file] => Ok((DEFAULT_LINES, Some(file.as_str()))),
        [flag, count, rest @ ..] if rest.len() <= 1 => {
            if flag != "-n" {
                return Err(ShellError::app(app, format!("wrong argument {flag}")));
            }
            let count = count
                .parse::<usize>()
                .map_err(|_| ShellError::app(app, format!("wrong argument {count}")))?;
            Ok((count, rest.first().map(String::as_str)))
        }
        _ => Err(ShellError::app(app, "wrong arguments")),
    }
}
