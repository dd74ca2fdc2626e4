use std::io::Write;
use std::path::Path;

use glob::Pattern;

use super::Application;
use crate::error::{Result, ShellError};
use crate::eval::ShellContext;

/// `find [PATH] -name PATTERN`
///
/// Prints every regular file below PATH whose name matches PATTERN, as
/// PATH joined with the relative path. Directories are visited in name
/// order.
pub struct Find;

fn walk(dir: &Path, shown: &str, pattern: &Pattern, output: &mut dyn Write) -> Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = format!("{shown}/{name}");
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk(&entry.path(), &path, pattern, output)?;
        } else if file_type.is_file() && pattern.matches(&name) {
            writeln!(output, "{path}")?;
        }
    }
    Ok(())
}

impl Application for Find {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        _input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        let (root, pattern) = match args {
            [flag, pattern] if flag == "-name" => (".", pattern),
            [root, flag, pattern] if flag == "-name" => (root.as_str(), pattern),
            _ => return Err(ShellError::app("find", "wrong arguments")),
        };
        let pattern = Pattern::new(pattern)
            .map_err(|_| ShellError::app("find", format!("invalid pattern {pattern}")))?;

        let dir = ctx.resolve(root);
        if !dir.is_dir() {
            return Err(ShellError::app("find", format!("{root} is not a directory")));
        }
        walk(&dir, root.trim_end_matches('/'), &pattern, output)?;
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::testing::{run, sandbox};

    fn tree() -> (tempfile::TempDir, ShellContext) {
        sandbox(&[
            ("a.txt", ""),
            ("b.md", ""),
            ("dir/c.txt", ""),
            ("dir/deeper/d.txt", ""),
        ])
    }

    #[test]
    fn from_current_directory() {
        let (_dir, mut ctx) = tree();
        let out = run(&Find, &mut ctx, &["-name", "*.txt"], "").unwrap();
        assert_eq!(out, "./a.txt\n./dir/c.txt\n./dir/deeper/d.txt\n");
    }

    #[test]
    fn from_given_path() {
        let (_dir, mut ctx) = tree();
        let out = run(&Find, &mut ctx, &["dir/", "-name", "*.txt"], "").unwrap();
        assert_eq!(out, "dir/c.txt\ndir/deeper/d.txt\n");
    }

    #[test]
    fn exact_name() {
        let (_dir, mut ctx) = tree();
        assert_eq!(run(&Find, &mut ctx, &["-name", "b.md"], "").unwrap(), "./b.md\n");
    }

    #[test]
    fn errors() {
        let (_dir, mut ctx) = tree();
        assert_eq!(
            run(&Find, &mut ctx, &["*.txt"], "").unwrap_err().to_string(),
            "find: wrong arguments"
        );
        assert_eq!(
            run(&Find, &mut ctx, &["nope", "-name", "x"], "").unwrap_err().to_string(),
            "find: nope is not a directory"
        );
    }
}
