use std::io::Write;

use super::{Application, source};
use crate::error::{Result, ShellError};
use crate::eval::ShellContext;

/// Inclusive, 1-based byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Range {
    start: usize,
    end: usize,
}

impl Range {
    fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }
}

/// Parse a byte list such as `1,3-5,8-` or `-2`.
fn parse_list(list: &str) -> Result<Vec<Range>> {
    let invalid = || ShellError::app("cut", format!("invalid list {list}"));
    let bound = |s: &str| s.parse::<usize>().ok().filter(|n| *n >= 1);

    list.split(',')
        .map(|item| {
            let range = match item.split_once('-') {
                None => {
                    let n = bound(item).ok_or_else(invalid)?;
                    Range { start: n, end: n }
                }
                Some(("", "")) => return Err(invalid()),
                Some(("", end)) => Range {
                    start: 1,
                    end: bound(end).ok_or_else(invalid)?,
                },
                Some((start, "")) => Range {
                    start: bound(start).ok_or_else(invalid)?,
                    end: usize::MAX,
                },
                Some((start, end)) => Range {
                    start: bound(start).ok_or_else(invalid)?,
                    end: bound(end).ok_or_else(invalid)?,
                },
            };
            if range.start > range.end {
                return Err(invalid());
            }
            Ok(range)
        })
        .collect()
}

/// `cut -b LIST [FILE]`
pub struct Cut;

impl Application for Cut {
    fn exec(
        &self,
        ctx: &mut ShellContext,
        args: &[String],
        input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        let (list, file) = match args {
            [flag, list] if flag == "-b" => (list, None),
            [flag, list, file] if flag == "-b" => (list, Some(file.as_str())),
            _ => return Err(ShellError::app("cut", "wrong arguments")),
        };
        let ranges = parse_list(list)?;
        let text = source(ctx, "cut", file, input)?;

        for line in text.lines() {
            let selected: Vec<u8> = line
                .bytes()
                .enumerate()
                .filter(|(i, _)| ranges.iter().any(|r| r.contains(i + 1)))
                .map(|(_, b)| b)
                .collect();
            output.write_all(&selected)?;
            output.write_all(b"\n")?;
        }
        output.flush()?;
        Ok(())
    }
}
