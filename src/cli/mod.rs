pub mod compare;
pub mod fixtures;

use std::{
    error::Error,
    io::Read,
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "jsontrail", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare two JSON documents and print every mismatch with its path
    Compare(CompareArgs),

    /// Run every golden fixture in a directory
    Fixtures(FixturesArgs),
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Path to the expected JSON document, or `-` to read it from stdin
    pub expected: PathBuf,

    /// Path to the actual JSON document, or `-` to read it from stdin
    pub actual: PathBuf,
}

#[derive(Debug, Args)]
pub struct FixturesArgs {
    /// Directory holding `<name>.expected.json`, `<name>.actual.json` and `<name>.result` triples
    #[arg(env = "JSONTRAIL_FIXTURES")]
    pub dir: PathBuf,
}

pub(crate) fn load_json(path: &Path) -> Result<serde_json::Value, Box<dyn Error>> {
    if path == Path::new("-") {
        return read_from_stdin();
    }
    let data = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&data)?;
    Ok(json)
}

fn read_from_stdin() -> Result<serde_json::Value, Box<dyn Error>> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let json: serde_json::Value = serde_json::from_str(&buffer)?;
    Ok(json)
}
