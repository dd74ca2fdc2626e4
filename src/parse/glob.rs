//! Wildcard expansion of bare words against the working directory.

use std::path::Path;

use glob::{MatchOptions, Pattern};

use crate::error::Result;

/// Returns true if the word contains a wildcard metacharacter.
pub fn contains_glob(word: &str) -> bool {
    word.contains(['*', '?', '['])
}

/// Expand `word` against the entry names of `dir`.
///
/// Matches are returned sorted by name. A word that matches nothing (or
/// contains no wildcard) is returned unchanged as the only element.
pub fn expand(word: &str, dir: &Path) -> Result<Vec<String>> {
    if !contains_glob(word) {
        return Ok(vec![word.to_string()]);
    }
    let pattern = Pattern::new(word)?;
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut matches: Vec<String> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| pattern.matches_with(name, options))
            .collect(),
        Err(e) => {
            log::debug!("glob: cannot read {}: {e}", dir.display());
            Vec::new()
        }
    };

    if matches.is_empty() {
        return Ok(vec![word.to_string()]);
    }
    matches.sort();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.md", ".hidden.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        dir
    }

    #[test]
    fn literal_word_untouched() {
        let dir = fixture();
        assert_eq!(expand("a.txt", dir.path()).unwrap(), vec!["a.txt"]);
        assert_eq!(expand("nothing", dir.path()).unwrap(), vec!["nothing"]);
    }

    #[test]
    fn star_matches_sorted() {
        let dir = fixture();
        assert_eq!(
            expand("*.txt", dir.path()).unwrap(),
            vec![".hidden.txt", "a.txt", "b.txt"]
        );
    }

    #[test]
    fn question_mark_and_class() {
        let dir = fixture();
        assert_eq!(expand("?.md", dir.path()).unwrap(), vec!["c.md"]);
        assert_eq!(expand("[ab].txt", dir.path()).unwrap(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn no_match_falls_back_to_pattern() {
        let dir = fixture();
        assert_eq!(expand("*.rs", dir.path()).unwrap(), vec!["*.rs"]);
    }

    #[test]
    fn separator_is_literal() {
        let dir = fixture();
        assert_eq!(expand("*/a.txt", dir.path()).unwrap(), vec!["*/a.txt"]);
    }

    #[test]
    fn invalid_pattern_is_error() {
        let dir = fixture();
        assert!(expand("[", dir.path()).is_err());
    }

    #[test]
    fn missing_directory_falls_back() {
        let dir = fixture();
        let gone = dir.path().join("gone");
        assert_eq!(expand("*.txt", &gone).unwrap(), vec!["*.txt"]);
    }
}
