//! CLI module for the Team Roster API
//!
//! Provides subcommands for:
//! - `serve`: run the HTTP API
//! - `migrate`: apply PostgreSQL migrations and exit
//! - `token`: mint a signed bearer token for a role

pub mod migrate;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

use crate::domain::Role;

/// Team Roster API - teams, players and team statistics
#[derive(Parser)]
#[command(name = "team-roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Apply PostgreSQL schema migrations and exit
    Migrate,

    /// Mint a bearer token signed with the configured secret
    Token(TokenArgs),
}

#[derive(clap::Args, Debug)]
pub struct TokenArgs {
    /// Subject recorded in the token
    #[arg(long)]
    pub subject: String,

    /// Role granted to the bearer (admin or viewer)
    #[arg(long, default_value = "viewer")]
    pub role: Role,
}
