use std::io::Write;

use super::Application;
use crate::error::{Result, ShellError};
use crate::eval::ShellContext;

/// `ls [DIR]`: visible entry names, tab separated, on one line.
pub struct Ls;

impl Application for Ls {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        _input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        let dir = match args {
            [] => ctx.current_dir().to_path_buf(),
            [dir] => ctx.resolve(dir),
            _ => return Err(ShellError::app("ls", "too many arguments")),
        };
        let entries =
            std::fs::read_dir(&dir).map_err(|_| ShellError::app("ls", "no such directory"))?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();

        if !names.is_empty() {
            writeln!(output, "{}", names.join("\t"))?;
            output.flush()?;
        }
        Ok(())
    }
}
