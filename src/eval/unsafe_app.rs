use std::io::Write;

use crate::apps::Application;
use crate::error::{Result, ShellError};
use crate::eval::ShellContext;

/// Decorator that turns a failure into output.
///
/// Wraps the resolution of `name`: an unknown name is absorbed the same
/// way as an error raised by the application itself. The error message
/// and a newline are written to the output sink and the call succeeds.
pub struct UnsafeApp<'r> {
    name: String,
    inner: Option<&'r dyn Application>,
}

impl<'r> UnsafeApp<'r> {
    pub fn new(name: &str, inner: Option<&'r dyn Application>) -> Self {
        Self {
            name: name.to_string(),
            inner,
        }
    }
}

impl Application for UnsafeApp<'_> {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        let result = match self.inner {
            Some(app) => app.exec(ctx, args, input, output),
            None => Err(ShellError::UnknownApp(self.name.clone())),
        };
        if let Err(e) = result {
            log::warn!("unsafe {}: absorbed error: {e}", self.name);
            writeln!(output, "{e}")?;
            output.flush()?;
        }
        Ok(())
    }
}
