use std::io::Write;

use super::{Application, line_count_args, source, write_lines};
use crate::error::Result;
use crate::eval::ShellContext;

/// `tail [-n N] [FILE]`
pub struct Tail;

impl Application for Tail {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        let (count, file) = line_count_args("tail", args)?;
        let text = source(ctx, "tail", file, input)?;
        let lines: Vec<&str> = text.lines().collect();
        let skip = lines.len().saturating_sub(count);
        write_lines(output, lines[skip..].iter().copied())
    }
}
