use std::io::Write;

use super::{Application, source, write_lines};
use crate::error::{Result, ShellError};
use crate::eval::ShellContext;

/// `uniq [-i] [FILE]`
pub struct Uniq;

impl Application for Uniq {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        let (ignore_case, file) = match args {
            [] => (false, None),
            [flag] if flag == "-i" => (true, None),
            [file] => (false, Some(file.as_str())),
            [flag, file] if flag == "-i" => (true, Some(file.as_str())),
            [flag, _] => return Err(ShellError::app("uniq", format!("wrong argument {flag}"))),
            _ => return Err(ShellError::app("uniq", "too many arguments")),
        };
        let text = source(ctx, "uniq", file, input)?;

        let same = |a: &str, b: &str| {
            if ignore_case {
                a.to_lowercase() == b.to_lowercase()
            } else {
                a == b
            }
        };
        let mut kept: Vec<&str> = Vec::new();
        for line in text.lines() {
            if kept.last().is_none_or(|prev| !same(prev, line)) {
                kept.push(line);
            }
        }
        write_lines(output, kept)
    }
}
