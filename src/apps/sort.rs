use std::io::Write;

use super::{Application, source, write_lines};
use crate::error::{Result, ShellError};
use crate::eval::ShellContext;

/// `sort [-r] [FILE]`
pub struct Sort;

impl Application for Sort {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        let (reverse, file) = match args {
            [] => (false, None),
            [flag] if flag == "-r" => (true, None),
            [file] => (false, Some(file.as_str())),
            [flag, file] if flag == "-r" => (true, Some(file.as_str())),
            _ => return Err(ShellError::app("sort", "wrong arguments")),
        };
        let text = source(ctx, "sort", file, input)?;

        let mut lines: Vec<&str> = text.lines().collect();
        lines.sort_unstable();
        if reverse {
            lines.reverse();
        }
        write_lines(output, lines)
    }
}
