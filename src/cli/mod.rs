//! Command-line interface for audiolib.
//!
//! Starts an interactive shell over a fresh library. Commands come from
//! stdin, or from a script file with `--script`.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::adapters::MemoryStore;
use crate::config;
use crate::console::StdoutConsole;

pub mod shell;

pub use shell::{Flow, Shell};

/// audiolib - personal library of songs, podcasts and audiobooks
#[derive(Parser, Debug)]
#[command(name = "audiolib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store catalog (YAML) to download from; overrides configuration
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,
}

impl Cli {
    /// Load the store and run the shell
    pub fn execute(self) -> Result<()> {
        let store = self.load_store()?;
        info!(items = store.len(), "Store loaded");

        let mut out = StdoutConsole;

        match self.script {
            Some(path) => {
                let file = File::open(&path)
                    .with_context(|| format!("Failed to open script: {}", path.display()))?;
                Shell::new(store).run(BufReader::new(file), &mut out)
            }
            None => {
                let stdin = io::stdin();
                let mut shell = Shell::new(store);
                if stdin.is_terminal() {
                    println!("Type 'help' for a list of commands");
                    shell = shell.with_prompt("> ");
                }
                shell.run(stdin.lock(), &mut out)
            }
        }
    }

    /// Store from --store, then configuration, then the demo catalog
    fn load_store(&self) -> Result<MemoryStore> {
        let path = match &self.store {
            Some(path) => Some(path.clone()),
            None => config::config()?.store.clone(),
        };

        match path {
            Some(path) => MemoryStore::load(&path),
            None => MemoryStore::demo(),
        }
    }
}
