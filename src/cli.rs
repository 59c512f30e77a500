// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Drives the command-line program.

use crate::cloner::{self, Cloner, Summary};
use crate::conf::{self, ConfigError, FileConfig};
use crate::reddit::auth::Credentials;
use crate::reddit::service::{RedditService, Service};
use clap::{ArgGroup, Parser};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;

/// Prints `message` to stderr and exits with `error_code`.
pub fn die(error_code: i32, message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(error_code);
}

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(
    about = "Copy subreddits and multireddits from one Reddit account to another",
    long_about = None
)]
#[command(group(ArgGroup::new("credentials").required(true).args(["terminal", "config"])))]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    /// Input credentials from the terminal
    #[arg(long)]
    terminal: bool,

    /// Path to JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity<WarnLevel> {
        self.verbosity
    }

    /// Where credentials will be read from.
    pub fn source(&self) -> CredentialSource<'_> {
        match &self.config {
            Some(path) if !self.terminal => CredentialSource::File(path),
            _ => CredentialSource::Terminal,
        }
    }
}

/// Where credentials are read from.
#[derive(Debug, PartialEq)]
pub enum CredentialSource<'a> {
    /// Prompted for on the terminal.
    Terminal,

    /// Read from a JSON configuration file.
    File(&'a Path),
}

impl CredentialSource<'_> {
    /// Reads credentials from this source.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match self {
            CredentialSource::Terminal => conf::terminal_credentials(),
            CredentialSource::File(path) => FileConfig::load(path).map(Credentials::from),
        }
    }
}

/// Runs the command-line program against the Reddit API.
pub async fn run(config: Config) -> Result<Summary, Error> {
    run_with(config, RedditService::default()).await
}

/// Runs the command-line program using the given service.
pub async fn run_with<S: Service>(config: Config, service: S) -> Result<Summary, Error> {
    let credentials = config.source().credentials()?;
    let summary = Cloner::new(service).run(credentials).await?;
    println!("{summary}");
    Ok(summary)
}

/// An error that stops the program.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The clone could not be completed.
    #[error(transparent)]
    Clone(#[from] cloner::Error),
}
