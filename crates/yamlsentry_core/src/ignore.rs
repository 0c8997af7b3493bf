//! Editing ansible-lint's ignore file and building inline suppressions.
//!
//! The ignore file holds one `<path> <rule>` pair per line, with paths
//! relative to the project root. Blank lines and `#` comments are kept
//! verbatim when the file is rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use yamlsentry_diagnostic::Source;

use crate::CheckError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum IgnoreLine {
    Entry {
        path: String,
        rule: String,
        text: String,
    },
    Other(String),
}

/// An ignore file loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreFile {
    file: PathBuf,
    root: PathBuf,
    lines: Vec<IgnoreLine>,
}

impl IgnoreFile {
    /// Loads `file`; a missing file yields an empty list.
    ///
    /// `root` is the directory entry paths are relative to.
    pub fn load(file: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Result<Self, CheckError> {
        let file = file.into();
        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No ignore file at {}", file.display());
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            file,
            root: root.into(),
            lines: content.lines().map(parse_line).collect(),
        })
    }

    /// Returns the ignore file location.
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Iterates over `(path, rule)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| match line {
            IgnoreLine::Entry { path, rule, .. } => Some((path.as_str(), rule.as_str())),
            IgnoreLine::Other(_) => None,
        })
    }

    /// Whether `rule` is ignored for `path`.
    pub fn contains(&self, path: &Path, rule: &str) -> bool {
        let key = self.relative(path);
        self.entries().any(|(p, r)| p == key && r == rule)
    }

    /// Adds an entry. Returns false when it was already present.
    pub fn add(&mut self, path: &Path, rule: &str) -> bool {
        if self.contains(path, rule) {
            return false;
        }
        let path = self.relative(path);
        self.lines.push(IgnoreLine::Entry {
            text: format!("{path} {rule}"),
            path,
            rule: rule.to_string(),
        });
        true
    }

    /// Removes an entry. Returns false when it was not present.
    pub fn remove(&mut self, path: &Path, rule: &str) -> bool {
        let key = self.relative(path);
        let before = self.lines.len();
        self.lines.retain(|line| {
            !matches!(line, IgnoreLine::Entry { path, rule: r, .. } if *path == key && r == rule)
        });
        self.lines.len() != before
    }

    /// Writes the file back, creating parent directories as needed.
    pub fn save(&self) -> Result<(), CheckError> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.file, self.render())?;
        Ok(())
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let (IgnoreLine::Entry { text, .. } | IgnoreLine::Other(text)) = line;
            out.push_str(text);
            out.push('\n');
        }
        out
    }

    /// Root-relative path with `/` separators.
    fn relative(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn parse_line(line: &str) -> IgnoreLine {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return IgnoreLine::Other(line.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(path), Some(rule)) => IgnoreLine::Entry {
            path: path.to_string(),
            rule: rule.to_string(),
            text: line.to_string(),
        },
        _ => IgnoreLine::Other(line.to_string()),
    }
}

/// Comment that suppresses `rule` on a single line, if the tool supports one.
pub fn inline_suppression(source: Source, rule: &str) -> Option<String> {
    match source {
        Source::AnsibleLint => Some(format!("# noqa: {rule}")),
        Source::Yamllint => Some(format!("# yamllint disable-line rule:{rule}")),
        Source::PreCommit => None,
    }
}
