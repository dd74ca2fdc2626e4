use std::io::Write;

use super::Application;
use crate::error::{Result, ShellError};
use crate::eval::ShellContext;

/// `cd DIR`: the only application that mutates the context.
pub struct Cd;

impl Application for Cd {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        _input: &str,
        _output: &mut dyn Write,
    ) -> Result<()> {
        let dir = match args {
            [] => return Err(ShellError::app("cd", "missing argument")),
            [dir] => dir,
            _ => return Err(ShellError::app("cd", "too many arguments")),
        };
        let expanded = shellexpand::tilde(dir);
        let target = ctx.resolve(&expanded);
        if !target.is_dir() {
            return Err(ShellError::app(
                "cd",
                format!("{dir} is not an existing directory"),
            ));
        }
        let canonical = target.canonicalize()?;
        log::debug!("cd: {}", canonical.display());
        ctx.set_current_dir(canonical);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::testing::{run, sandbox};

    #[test]
    fn changes_to_subdirectory() {
        let (dir, mut ctx) = sandbox(&[("sub/f.txt", "")]);
        run(&Cd, &mut ctx, &["sub"], "").unwrap();
        let expected = dir.path().join("sub").canonicalize().unwrap();
        assert_eq!(ctx.current_dir(), expected);
    }

    #[test]
    fn dot_dot_is_canonicalized() {
        let (dir, mut ctx) = sandbox(&[("sub/f.txt", "")]);
        run(&Cd, &mut ctx, &["sub"], "").unwrap();
        run(&Cd, &mut ctx, &[".."], "").unwrap();
        assert_eq!(ctx.current_dir(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn argument_count() {
        let (_dir, mut ctx) = sandbox(&[]);
        assert_eq!(
            run(&Cd, &mut ctx, &[], "").unwrap_err().to_string(),
            "cd: missing argument"
        );
        assert_eq!(
            run(&Cd, &mut ctx, &["a", "b"], "").unwrap_err().to_string(),
            "cd: too many arguments"
        );
    }

    #[test]
    fn rejects_files_and_missing() {
        let (_dir, mut ctx) = sandbox(&[("f.txt", "")]);
        assert_eq!(
            run(&Cd, &mut ctx, &["f.txt"], "").unwrap_err().to_string(),
            "cd: f.txt is not an existing directory"
        );
        assert!(run(&Cd, &mut ctx, &["nowhere"], "").is_err());
    }
}
