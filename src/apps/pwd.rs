use std::io::Write;

use super::Application;
use crate::error::Result;
use crate::eval::ShellContext;

pub struct Pwd;

impl Application for Pwd {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        _args: &[String],
        _input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln!(output, "{}", ctx.current_dir().display())?;
        output.flush()?;
        Ok(())
    }
}
