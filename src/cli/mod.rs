//! CLI module for luasurface

mod args;

pub use args::Args;

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::{emit_json, emit_stub};
use crate::scan::Scanner;
use std::path::Path;
use std::process::ExitCode;
use tracing::warn;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Scan the roots and write the requested outputs
pub fn execute(args: Args) -> Result<()> {
    let mut cfg = Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE));
    cfg.merge_cli(args.module_name);

    let scanner = Scanner::new(&cfg)?;
    let result = scanner.scan(&args.roots)?;

    if !result.read_errors.is_empty() {
        warn!("{} files could not be read", result.read_errors.len());
    }

    let model = &result.model;

    if let Some(path) = &args.out_dlua {
        let stub = emit_stub(model, Some(cfg.output.module_name.as_str()));
        write_output(path, &stub)?;
        println!("Wrote {}", path.display());
    }

    if let Some(path) = &args.out_json {
        let mut json = emit_json(model)?;
        json.push('\n');
        write_output(path, &json)?;
        println!("Wrote {}", path.display());
    }

    if args.out_dlua.is_none() && args.out_json.is_none() {
        println!("{}", emit_json(model)?);
    }

    Ok(())
}

/// Write an output document, creating parent directories as needed
fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::write(path, e))?;
    }
    std::fs::write(path, contents).map_err(|e| Error::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_output_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("types/nested/core.d.lua");
        write_output(&path, "---@meta\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "---@meta\n");
    }

    #[test]
    fn test_write_output_failure_names_path() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be written as a file
        let err = write_output(dir.path(), "x").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_execute_writes_both_outputs() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("Bind.cpp"), r#"lua.set_function("spawn", f);"#).unwrap();

        let stub_path = dir.path().join("out/api.d.lua");
        let json_path = dir.path().join("out/api.json");
        let args = Args {
            roots: vec![src.to_str().unwrap().to_string()],
            out_dlua: Some(stub_path.clone()),
            out_json: Some(json_path.clone()),
            module_name: Some("test.api".to_string()),
        };
        execute(args).unwrap();

        let stub = std::fs::read_to_string(&stub_path).unwrap();
        assert!(stub.starts_with("---@meta\n---@module \"test.api\"\n"));
        assert!(stub.contains("function spawn(...) end"));

        let json = std::fs::read_to_string(&json_path).unwrap();
        assert!(json.ends_with("}\n"));
        let model = crate::output::parse_json(&json).unwrap();
        assert!(model.globals.contains("spawn"));
    }
}
