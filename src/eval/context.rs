use std::path::{Path, PathBuf};

/// Execution context shared by every node of an evaluation.
///
/// Holds the working directory that globbing, redirection and relative
/// paths resolve against. Only `cd` writes it.
#[derive(Debug, Clone)]
pub struct ShellContext {
    cwd: PathBuf,
}

impl ShellContext {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// Context rooted at the process working directory.
    pub fn from_process() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn current_dir(&self) -> &Path {
        &self.cwd
    }

    pub fn set_current_dir(&mut self, dir: impl Into<PathBuf>) {
        self.cwd = dir.into();
    }

    /// Resolve `path` against the working directory. Absolute paths are
    /// returned unchanged.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_paths() {
        let ctx = ShellContext::new("/work");
        assert_eq!(ctx.resolve("a/b.txt"), PathBuf::from("/work/a/b.txt"));
    }

    #[test]
    fn keeps_absolute_paths() {
        let ctx = ShellContext::new("/work");
        assert_eq!(ctx.resolve("/etc/hosts"), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn set_current_dir_replaces() {
        let mut ctx = ShellContext::new("/work");
        ctx.set_current_dir("/elsewhere");
        assert_eq!(ctx.current_dir(), Path::new("/elsewhere"));
    }
}
