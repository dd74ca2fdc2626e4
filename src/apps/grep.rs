use std::io::Write;

use regex::Regex;

use super::{Application, read_file};
use crate::error::{Result, ShellError};
use crate::eval::ShellContext;

/// `grep PATTERN [FILE...]`
///
/// With more than one file each match is prefixed with `file:`.
pub struct Grep;

impl Application for Grep {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        let Some((pattern, files)) = args.split_first() else {
            return Err(ShellError::app("grep", "wrong number of arguments"));
        };
        let re = Regex::new(pattern)
            .map_err(|_| ShellError::app("grep", format!("invalid pattern {pattern}")))?;

        if files.is_empty() {
            for line in input.lines().filter(|l| re.is_match(l)) {
                writeln!(output, "{line}")?;
            }
            output.flush()?;
            return Ok(());
        }

        // Read everything up front so a bad file produces no partial output.
        let contents = files
            .iter()
            .map(|name| {
                read_file(ctx, "grep", name)
                    .map_err(|_| ShellError::app("grep", format!("wrong file argument {name}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let prefix = files.len() > 1;
        for (name, text) in files.iter().zip(&contents) {
            for line in text.lines().filter(|l| re.is_match(l)) {
                if prefix {
                    write!(output, "{name}:")?;
                }
                writeln!(output, "{line}")?;
            }
        }
        output.flush()?;
        Ok(())
    }
}
