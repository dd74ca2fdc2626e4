use std::io::Write;

use super::{Application, read_file};
use crate::error::Result;
use crate::eval::ShellContext;

/// `cat [FILE...]`: with no files, copies the effective input.
pub struct Cat;

impl Application for Cat {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        if args.is_empty() {
            output.write_all(input.as_bytes())?;
        } else {
            for name in args {
                let content = read_file(ctx, "cat", name)?;
                output.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    output.write_all(b"\n")?;
                }
            }
        }
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::testing::{run, sandbox};

    #[test]
    fn concatenates_files() {
        let (_dir, mut ctx) = sandbox(&[("a", "one\n"), ("b", "two")]);
        assert_eq!(run(&Cat, &mut ctx, &["a", "b"], "").unwrap(), "one\ntwo\n");
    }

    #[test]
    fn passes_input_through() {
        let (_dir, mut ctx) = sandbox(&[]);
        assert_eq!(run(&Cat, &mut ctx, &[], "piped\n").unwrap(), "piped\n");
    }

    #[test]
    fn missing_file() {
        let (_dir, mut ctx) = sandbox(&[("a", "one\n")]);
        assert_eq!(
            run(&Cat, &mut ctx, &["a", "zzz"], "").unwrap_err().to_string(),
            "cat: zzz does not exist"
        );
    }
}
