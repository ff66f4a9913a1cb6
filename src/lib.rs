//! luasurface - recover the Lua API surface of a sol2-embedding project
//!
//! Scans C++ binding sources (`set_function`, `new_usertype`) and Lua
//! sources (`function name(`, `function Module.name(`) and emits the result
//! as a LuaLS `.d.lua` stub or as canonical JSON.

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod scan;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use model::{ApiModel, ModuleDescriptor, UsertypeDescriptor};
pub use output::{emit_json, emit_stub, parse_json};
pub use parser::{NativeExtractor, ScriptExtractor};
pub use scan::{ScanResult, Scanner, SourceFile, SourceKind};
