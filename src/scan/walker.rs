// Source file discovery
//
// Roots are either filesystem paths (walked recursively) or glob patterns
// (expanded with `glob`). Every candidate is routed by extension.

use crate::config::ScanConfig;
use crate::error::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Which extractor handles a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    /// C++ binding sources
    Native,
    /// Lua sources
    Script,
}

/// A file selected for extraction
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: SourceKind,
}

/// Enumerates source files under a set of roots
pub struct PathWalker {
    native_extensions: Vec<String>,
    script_extensions: Vec<String>,
    exclude: Vec<glob::Pattern>,
}

impl PathWalker {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let exclude = config
            .exclude
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            native_extensions: config.native_extensions.clone(),
            script_extensions: config.script_extensions.clone(),
            exclude,
        })
    }

    /// Classify a path by its extension
    pub fn classify(&self, path: &Path) -> Option<SourceKind> {
        let ext = path.extension()?.to_str()?;
        if self.native_extensions.iter().any(|e| e == ext) {
            Some(SourceKind::Native)
        } else if self.script_extensions.iter().any(|e| e == ext) {
            Some(SourceKind::Script)
        } else {
            None
        }
    }

    /// Discover all source files under `roots`, sorted by path.
    ///
    /// Fails only on an invalid glob pattern.
    pub fn discover<S: AsRef<str>>(&self, roots: &[S]) -> Result<Vec<SourceFile>> {
        let mut files = BTreeSet::new();

        for root in roots {
            let root = root.as_ref();
            if is_glob(root) && !Path::new(root).exists() {
                self.expand_glob(root, &mut files)?;
            } else {
                self.walk_path(Path::new(root), &mut files);
            }
        }

        Ok(files.into_iter().collect())
    }

    fn expand_glob(&self, pattern: &str, files: &mut BTreeSet<SourceFile>) -> Result<()> {
        let mut matched = 0usize;
        for entry in glob::glob(pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("skipping {}: {}", e.path().display(), e.error());
                    continue;
                }
            };
            if path.is_dir() {
                continue;
            }
            matched += 1;
            self.consider(&path, &path, files);
        }
        if matched == 0 {
            debug!("pattern {} matched no files", pattern);
        }
        Ok(())
    }

    fn walk_path(&self, root: &Path, files: &mut BTreeSet<SourceFile>) {
        if !root.exists() {
            warn!("root {} does not exist", root.display());
            return;
        }

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            let relative = match entry.path().strip_prefix(root) {
                Ok(rel) if !rel.as_os_str().is_empty() => rel,
                _ => entry.path(),
            };
            self.consider(entry.path(), relative, files);
        }
    }

    fn consider(&self, path: &Path, relative: &Path, files: &mut BTreeSet<SourceFile>) {
        let Some(kind) = self.classify(path) else {
            return;
        };
        if self.is_excluded(relative) {
            debug!("excluded {}", path.display());
            return;
        }
        files.insert(SourceFile {
            path: path.to_path_buf(),
            kind,
        });
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.iter().any(|p| p.matches_path(relative))
    }
}

/// Check whether a root contains glob metacharacters.
///
/// An existing path is walked as-is even when its name contains them.
fn is_glob(root: &str) -> bool {
    root.contains(['*', '?', '['])
}
