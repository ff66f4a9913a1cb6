//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Extract the Lua API from sol2 bindings and Lua sources, emit .d.lua / JSON
#[derive(Parser, Debug)]
#[command(name = "luasurface")]
#[command(about = "Extract Lua API (sol2 + Lua) and emit .d.lua / JSON")]
#[command(version)]
pub struct Args {
    /// Folders, files or glob patterns to scan (e.g. libs/lua/src 'lib/**/*.lua')
    #[arg(long, required = true, num_args = 1..)]
    pub roots: Vec<String>,

    /// Output .d.lua path
    #[arg(long)]
    pub out_dlua: Option<PathBuf>,

    /// Output JSON path
    #[arg(long)]
    pub out_json: Option<PathBuf>,

    /// Module name to stamp into .d.lua (default: ccad.generated)
    #[arg(long)]
    pub module_name: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
