use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A `[NAME:]ROOT=OUTPUT` job given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobArg {
    pub name: String,
    pub root: PathBuf,
    pub output: PathBuf,
}

impl FromStr for JobArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, pair) = split_name(s);

        let (root, output) = pair
            .rsplit_once('=')
            .ok_or_else(|| format!("Expected ROOT=OUTPUT, got: {s}"))?;
        let (root, output) = (root.trim(), output.trim());
        if root.is_empty() {
            return Err(format!("Missing root directory in: {s}"));
        }
        if output.is_empty() {
            return Err(format!("Missing output file in: {s}"));
        }

        let root = PathBuf::from(root);
        let name = name.map_or_else(|| default_job_name(&root), str::to_string);
        Ok(Self {
            name,
            root,
            output: PathBuf::from(output),
        })
    }
}

/// Split off a `NAME:` prefix. Single letters are left alone so `C:\src` stays a path.
fn split_name(s: &str) -> (Option<&str>, &str) {
    match s.split_once(':') {
        Some((name, rest))
            if name.len() > 1
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') =>
        {
            (Some(name), rest)
        }
        _ => (None, s),
    }
}

/// `backend/src` is labelled `backend`; anything else by its last component.
#[must_use]
pub fn default_job_name(root: &Path) -> String {
    let last = root.file_name().and_then(|n| n.to_str());
    let parent = root
        .parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str());

    match (last, parent) {
        (Some("src"), Some(parent)) => parent.to_string(),
        (Some(last), _) => last.to_string(),
        _ => "snapshot".to_string(),
    }
}

/// Trim a suffix and give it a leading dot (`ts` → `.ts`).
///
/// # Errors
/// Returns an error for blank input.
pub fn normalize_suffix(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Suffix must not be empty".to_string());
    }
    if trimmed.starts_with('.') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!(".{trimmed}"))
    }
}
