use std::io::Write;

use super::{Application, line_count_args, source, write_lines};
use crate::error::Result;
use crate::eval::ShellContext;

/// `head [-n N] [FILE]`
pub struct Head;

impl Application for Head {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        let (count, file) = line_count_args("head", args)?;
        let text = source(ctx, "head", file, input)?;
        write_lines(output, text.lines().take(count))
    }
}
