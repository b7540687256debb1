//! Which filesystem paths count as a change worth rebuilding for.

use std::path::{Path, PathBuf};

/// Predicate over changed paths, independent of the watcher's event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeFilter {
    /// Only these exact files (the project list and tool catalog).
    Exact {
        files: Vec<PathBuf>,
    },
    /// Any file under one of `roots` ending in one of `suffixes`, except
    /// paths under an `ignore` prefix (the output directory, which the
    /// rebuild itself writes to).
    Suffix {
        roots: Vec<PathBuf>,
        suffixes: Vec<String>,
        ignore: Vec<PathBuf>,
    },
}

impl ChangeFilter {
    /// Match exactly `files`. Paths are made absolute so they compare equal
    /// to the absolute paths the watcher reports.
    pub fn exact<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut absolute = Vec::new();
        for file in files {
            for form in path_forms(file.as_ref()) {
                if !absolute.contains(&form) {
                    absolute.push(form);
                }
            }
        }
        Self::Exact {
            files: absolute,
        }
    }

    /// Match recognised suffixes anywhere under `roots`. A root nested in
    /// another root is folded into it.
    pub fn suffix<S: AsRef<str>>(roots: &[PathBuf], suffixes: &[S], ignore: &[PathBuf]) -> Self {
        let mut absolute_roots: Vec<PathBuf> = roots.iter().map(|root| absolute(root)).collect();
        absolute_roots.sort();
        absolute_roots.dedup_by(|nested, outer| nested.starts_with(outer));
        Self::Suffix {
            roots: absolute_roots,
            suffixes: suffixes.iter().map(|s| s.as_ref().to_string()).collect(),
            ignore: ignore.iter().flat_map(|p| path_forms(p)).collect(),
        }
    }

    /// Whether a change to `path` should trigger a rebuild.
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            ChangeFilter::Exact {
                files,
            } => {
                let candidate = absolute(path);
                files.iter().any(|file| *file == candidate)
            }
            ChangeFilter::Suffix {
                roots,
                suffixes,
                ignore,
            } => {
                let candidate = absolute(path);
                let under_root = roots.iter().any(|root| {
                    candidate.starts_with(root)
                        || std::fs::canonicalize(root).is_ok_and(|r| candidate.starts_with(r))
                });
                if !under_root || ignore.iter().any(|prefix| candidate.starts_with(prefix)) {
                    return false;
                }
                let name = candidate.to_string_lossy();
                suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
            }
        }
    }

    /// Directories that must be watched for this filter to see its changes.
    pub fn watch_roots(&self) -> Vec<PathBuf> {
        match self {
            ChangeFilter::Exact {
                files,
            } => {
                let mut dirs: Vec<PathBuf> = Vec::new();
                for dir in files.iter().filter_map(|f| f.parent()) {
                    if !dirs.iter().any(|d| d == dir) {
                        dirs.push(dir.to_path_buf());
                    }
                }
                dirs
            }
            ChangeFilter::Suffix {
                roots,
                ..
            } => roots.clone(),
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// The absolute form of `path`, plus its canonical form when that differs
/// (symlinked temp dirs, `/private/var` on macOS).
fn path_forms(path: &Path) -> Vec<PathBuf> {
    let abs = absolute(path);
    let canonical = std::fs::canonicalize(&abs).ok().or_else(|| {
        // Not created yet: canonicalize the directory it will appear in.
        let parent = std::fs::canonicalize(abs.parent()?).ok()?;
        Some(parent.join(abs.file_name()?))
    });
    match canonical {
        Some(canonical) if canonical != abs => vec![abs, canonical],
        _ => vec![abs],
    }
}
