// Scanning pipeline: discover files, extract each, merge into one model

pub mod walker;

pub use walker::{PathWalker, SourceFile, SourceKind};

use crate::config::Config;
use crate::error::Result;
use crate::model::ApiModel;
use crate::parser::{read_source, NativeExtractor, ScriptExtractor};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of scanning a set of roots
#[derive(Debug, Default)]
pub struct ScanResult {
    /// The merged API model
    pub model: ApiModel,
    /// Number of C++ files read
    pub native_files: usize,
    /// Number of Lua files read
    pub script_files: usize,
    /// Files that could not be read (path -> error message)
    pub read_errors: BTreeMap<PathBuf, String>,
}

/// Runs discovery and extraction over a set of roots
pub struct Scanner {
    walker: PathWalker,
    native: NativeExtractor,
    script: ScriptExtractor,
    progress: bool,
}

impl Scanner {
    /// Create a scanner with the given configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            walker: PathWalker::new(&config.scan)?,
            native: NativeExtractor::from_config(&config.scan),
            script: ScriptExtractor::new(),
            progress: config.output.progress,
        })
    }

    /// Show a progress bar on stderr while extracting
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// List the files a scan of `roots` would read
    pub fn discover<S: AsRef<str>>(&self, roots: &[S]) -> Result<Vec<SourceFile>> {
        self.walker.discover(roots)
    }

    /// Scan all roots into a single model.
    ///
    /// Files are extracted in parallel, each into its own model; the
    /// per-file models are then merged in path order so the result does not
    /// depend on scheduling or enumeration order.
    pub fn scan<S: AsRef<str>>(&self, roots: &[S]) -> Result<ScanResult> {
        let files = self.discover(roots)?;
        info!("discovered {} source files", files.len());

        let progress = self.progress_bar(files.len());

        let extracted: Vec<(&SourceFile, std::io::Result<ApiModel>)> = files
            .par_iter()
            .map(|file| {
                let model = self.extract_file(file);
                if let Some(pb) = &progress {
                    pb.set_message(file_label(&file.path));
                    pb.inc(1);
                }
                (file, model)
            })
            .collect();

        if let Some(pb) = progress {
            pb.finish_with_message("extraction complete");
        }

        let mut result = ScanResult::default();
        for (file, outcome) in extracted {
            match outcome {
                Ok(model) => {
                    match file.kind {
                        SourceKind::Native => result.native_files += 1,
                        SourceKind::Script => result.script_files += 1,
                    }
                    result.model.merge(model);
                }
                Err(e) => {
                    warn!("cannot read {}: {}", file.path.display(), e);
                    result.read_errors.insert(file.path.clone(), e.to_string());
                }
            }
        }

        let stats = result.model.stats();
        info!(
            "scanned {} C++ and {} Lua files: {} globals, {} lua globals, {} modules, {} usertypes",
            result.native_files,
            result.script_files,
            stats.globals,
            stats.lua_globals,
            stats.modules,
            stats.usertypes
        );

        Ok(result)
    }

    /// Read one file and extract it into a fresh model
    pub fn extract_file(&self, file: &SourceFile) -> std::io::Result<ApiModel> {
        debug!("extracting {}", file.path.display());
        let source = read_source(&file.path)?;
        let mut model = ApiModel::new();
        self.extract_source(file.kind, &source, &mut model);
        Ok(model)
    }

    /// Extract already-loaded source text into `model`
    pub fn extract_source(&self, kind: SourceKind, source: &str, model: &mut ApiModel) {
        match kind {
            SourceKind::Native => self.native.extract(source, model),
            SourceKind::Script => self.script.extract(source, model),
        }
    }

    fn progress_bar(&self, len: usize) -> Option<ProgressBar> {
        if !self.progress {
            return None;
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        let lib = dir.path().join("lib");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&lib).unwrap();

        fs::write(
            src.join("BindBox.cpp"),
            r#"
void bind(sol::state& state) {
    state.set_function("spawn", &spawn);
    state.new_usertype<Box>("Box",
        "left", &Box::left,
        "setLeft", &Box::SetLeft,
        sol::constructors<Box(int)>());
}
"#,
        )
        .unwrap();

        fs::write(
            src.join("BindMore.hpp"),
            r#"lua.new_usertype<Box>("Box", "right", &Box::right, sol::constructors<Box()>());"#,
        )
        .unwrap();

        fs::write(
            lib.join("util.lua"),
            "local M = {}\nfunction M.foo() end\nfunction bar() end\nreturn M\n",
        )
        .unwrap();

        dir
    }

    fn scanner() -> Scanner {
        Scanner::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_scan_project() {
        let dir = create_test_project();
        let result = scanner().scan(&[dir.path().to_str().unwrap()]).unwrap();

        assert_eq!(result.native_files, 2);
        assert_eq!(result.script_files, 1);
        assert!(result.read_errors.is_empty());

        let model = &result.model;
        assert!(model.globals.contains("spawn"));
        assert!(model.lua_globals.contains("bar"));
        assert!(model.lua_modules["M"].functions.contains("foo"));

        let ut = &model.usertypes["Box"];
        assert_eq!(ut.fields.iter().collect::<Vec<_>>(), vec!["left", "right"]);
        assert_eq!(ut.methods.iter().collect::<Vec<_>>(), vec!["setLeft"]);
        // BindBox.cpp sorts before BindMore.hpp
        assert_eq!(ut.constructors, vec!["Box(int)", "Box()"]);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let dir = create_test_project();
        let root = dir.path().to_str().unwrap();
        let first = scanner().scan(&[root]).unwrap();
        let second = scanner().scan(&[root]).unwrap();
        assert_eq!(first.model, second.model);
    }

    #[test]
    fn test_root_order_does_not_matter() {
        let dir = create_test_project();
        let src = dir.path().join("src").to_str().unwrap().to_string();
        let lib = dir.path().join("lib").to_str().unwrap().to_string();

        let a = scanner().scan(&[src.clone(), lib.clone()]).unwrap();
        let b = scanner().scan(&[lib, src]).unwrap();
        assert_eq!(a.model, b.model);
    }

    #[test]
    fn test_scan_empty_roots() {
        let roots: [&str; 0] = [];
        let result = scanner().scan(&roots).unwrap();
        assert!(result.model.is_empty());
        assert_eq!(result.native_files + result.script_files, 0);
    }

    #[test]
    fn test_extract_file_missing_is_error() {
        let file = SourceFile {
            path: PathBuf::from("/nonexistent/Bind.cpp"),
            kind: SourceKind::Native,
        };
        assert!(scanner().extract_file(&file).is_err());
    }

    #[test]
    fn test_extract_source_dispatches_by_kind() {
        let scanner = scanner();
        let mut model = ApiModel::new();
        scanner.extract_source(SourceKind::Script, "function lua_only() end", &mut model);
        scanner.extract_source(
            SourceKind::Native,
            r#"lua.set_function("native_only", f);"#,
            &mut model,
        );
        // Lua text through the native extractor finds nothing, and vice versa
        scanner.extract_source(SourceKind::Native, "function ignored() end", &mut model);

        assert!(model.lua_globals.contains("lua_only"));
        assert!(model.globals.contains("native_only"));
        assert!(!model.lua_globals.contains("ignored"));
    }

    #[test]
    fn test_with_progress() {
        let dir = create_test_project();
        let result = scanner()
            .with_progress(true)
            .scan(&[dir.path().to_str().unwrap()])
            .unwrap();
        assert_eq!(result.native_files, 2);
    }
}
