// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Loading credentials from a configuration file or the terminal.

use crate::reddit::auth::{AccountCredentials, ClientCredentials, Credentials, Role};
use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// Credentials as stored in a JSON configuration file.
///
/// ```json
/// {
///   "client_id": "...",
///   "secret_token": "...",
///   "src_username": "...",
///   "src_password": "...",
///   "dst_username": "...",
///   "dst_password": "..."
/// }
/// ```
#[derive(Deserialize)]
pub struct FileConfig {
    client_id: String,
    secret_token: String,
    src_username: String,
    src_password: String,
    dst_username: String,
    dst_password: String,
}

impl FileConfig {
    /// Reads a configuration file from `path`.
    ///
    /// The file holds passwords in plain text, so a warning is logged
    /// reminding the user to delete it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        warn!(
            "{} contains credentials in plain text. Please delete it when you are done.",
            path.display()
        );
        Self::parse(&contents).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            err => err,
        })
    }

    /// Parses the contents of a configuration file.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("client_id", &self.client_id),
            ("secret_token", &self.secret_token),
            ("src_username", &self.src_username),
            ("src_password", &self.src_password),
            ("dst_username", &self.dst_username),
            ("dst_password", &self.dst_password),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ConfigError::EmptyField(*name)),
            None => Ok(()),
        }
    }
}

impl From<FileConfig> for Credentials {
    fn from(config: FileConfig) -> Self {
        Credentials {
            client: ClientCredentials::new(config.client_id, config.secret_token),
            source: AccountCredentials::new(config.src_username, config.src_password),
            destination: AccountCredentials::new(config.dst_username, config.dst_password),
        }
    }
}

/// Asks for credentials using `prompt`, which displays its argument and
/// returns the user's answer.
///
/// Answers other than passwords are trimmed of surrounding whitespace.
/// Passwords are kept as entered. An empty answer is an error.
pub fn prompt_credentials<F>(mut prompt: F) -> Result<Credentials, ConfigError>
where
    F: FnMut(&str) -> io::Result<String>,
{
    let mut ask = |question: &str, field: &'static str| -> Result<Answer, ConfigError> {
        let answer = prompt(question).map_err(ConfigError::Prompt)?;
        if answer.trim().is_empty() {
            Err(ConfigError::EmptyField(field))
        } else {
            Ok(Answer(answer))
        }
    };

    let client_id = ask("Client ID: ", "client_id")?.trimmed();
    let secret = ask("Secret Token: ", "secret_token")?.trimmed();
    let source = ask_account(&mut ask, Role::Source)?;
    let destination = ask_account(&mut ask, Role::Destination)?;

    Ok(Credentials {
        client: ClientCredentials::new(client_id, secret),
        source,
        destination,
    })
}

/// A non-empty answer to a prompt, exactly as typed.
struct Answer(String);

impl Answer {
    fn trimmed(self) -> String {
        self.0.trim().to_string()
    }
}

fn ask_account<F>(ask: &mut F, role: Role) -> Result<AccountCredentials, ConfigError>
where
    F: FnMut(&str, &'static str) -> Result<Answer, ConfigError>,
{
    let (username_field, password_field) = match role {
        Role::Source => ("src_username", "src_password"),
        Role::Destination => ("dst_username", "dst_password"),
    };
    let username = ask(&format!("{role} Username: "), username_field)?.trimmed();
    let password = ask(&format!("{role} Password: "), password_field)?.0;
    Ok(AccountCredentials::new(username, password))
}

/// Asks for credentials on the terminal without echoing input.
pub fn terminal_credentials() -> Result<Credentials, ConfigError> {
    prompt_credentials(|question| rpassword::prompt_password(question))
}

/// An error reading credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Could not read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The configuration file is not valid JSON or is missing fields.
    #[error("Invalid configuration {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A required value is empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// The terminal could not be read.
    #[error("Could not read from terminal: {0}")]
    Prompt(io::Error),
}
