//! CLI module for the math agent API

pub mod serve;

use clap::{Parser, Subcommand};

/// Math agent API - self-correcting RAG question answering
#[derive(Parser)]
#[command(name = "math-agent-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
