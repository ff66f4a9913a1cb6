// Lua function declaration extractor
//
// Line oriented: only `function Name(` and `function Module.Name(` at the
// start of a line (after indentation) are recognized.

use crate::model::ApiModel;
use tracing::debug;

/// A recognized function declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionDecl<'a> {
    /// `function name(`
    Global(&'a str),
    /// `function Module.name(`
    Module { module: &'a str, name: &'a str },
}

/// Extractor for Lua source text
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptExtractor;

impl ScriptExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all function declarations in `source` into `model`
    pub fn extract(&self, source: &str, model: &mut ApiModel) {
        for line in source.lines() {
            match parse_declaration(line) {
                Some(FunctionDecl::Global(name)) => {
                    debug!("lua global {}", name);
                    model.lua_globals.insert(name.to_string());
                }
                Some(FunctionDecl::Module { module, name }) => {
                    debug!("lua module function {}.{}", module, name);
                    model.module_mut(module).functions.insert(name.to_string());
                }
                None => {}
            }
        }
    }
}

/// Parse a single line as a function declaration
pub fn parse_declaration(line: &str) -> Option<FunctionDecl<'_>> {
    let rest = line.trim_start().strip_prefix("function")?;
    let after_keyword = rest.trim_start();
    if after_keyword.len() == rest.len() {
        // `functionfoo(` or bare `function`
        return None;
    }

    let (first, rest) = take_name(after_keyword)?;
    let (decl, rest) = match rest.strip_prefix('.') {
        Some(qualified) => {
            let (name, rest) = take_name(qualified)?;
            (FunctionDecl::Module { module: first, name }, rest)
        }
        None => (FunctionDecl::Global(first), rest),
    };

    rest.trim_start().starts_with('(').then_some(decl)
}

/// Split off a leading `[A-Za-z0-9_]+` run
fn take_name(s: &str) -> Option<(&str, &str)> {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some(s.split_at(end))
}
