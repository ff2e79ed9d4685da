use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lazy", version, about = "Dictionary import and lookup")]
pub struct Cli {
    /// JSON config file; defaults apply when it does not exist
    #[arg(long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    /// Store file, overrides the configured path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import an EIJIRO or EJDIC text dump
    Import(ImportArgs),

    /// Look up a word or phrase, translating it when the dictionary has no entry
    Lookup {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Register a translation endpoint after a test request
    RegisterApi { url: String },
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub file: PathBuf,

    /// Encoding label such as `shift_jis`; detected when omitted
    #[arg(long)]
    pub encoding: Option<String>,

    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Read window in bytes
    #[arg(long)]
    pub chunk_size: Option<usize>,
}
