use std::io::Write;

use super::Application;
use crate::error::Result;
use crate::eval::ShellContext;

pub struct Echo;

impl Application for Echo {
    fn exec(
        &self,
        _ctx: &mut ShellContext,
        args: &[String],
        _input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        if args.is_empty() {
            return Ok(());
        }
        writeln!(output, "{}", args.join(" "))?;
        output.flush()?;
        Ok(())
    }
}
