// Extractors turning source text into API model contributions

mod native;
mod script;
pub mod tokens;

pub use native::{classify_key, MemberKind, NativeExtractor, METHOD_PREFIXES};
pub use script::{parse_declaration, FunctionDecl, ScriptExtractor};

use std::path::Path;

/// Read a source file, replacing invalid UTF-8 instead of failing
pub fn read_source(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
