// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Reporting the outcome of write calls.
//!
//! Write calls (subscribing, creating multireddits) are never fatal: each
//! one is attempted, its outcome is printed, and the run moves on.

use crate::http::{HTTPError, Response};
use colored::Colorize;
use log::warn;
use std::fmt;

/// The outcome of a single write call.
#[derive(Debug)]
pub enum Outcome {
    /// The server answered with HTTP 200.
    Ok,

    /// The server answered with a different status.
    Failed(Response),

    /// The call could not be made at all.
    Error(String),
}

impl Outcome {
    /// The outcome of a call that produced a response or a transport error.
    pub fn from_result(result: Result<Response, HTTPError>) -> Self {
        match result {
            Ok(resp) if resp.is_ok() => Outcome::Ok,
            Ok(resp) => Outcome::Failed(resp),
            Err(err) => Outcome::Error(err.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok => write!(f, "{}", "OK".green()),
            Outcome::Failed(resp) => {
                write!(f, "{} {}\n{}", "ERROR".red(), resp.status().as_u16(), resp.body())
            }
            Outcome::Error(message) => write!(f, "{} {message}", "ERROR".red()),
        }
    }
}

/// Outcomes of a group of write calls.
#[derive(Debug, Default)]
pub struct Report {
    outcomes: Vec<Outcome>,
}

impl Report {
    /// Prints an outcome and adds it to the report.
    ///
    /// `label` identifies the call in the logs.
    pub fn record(&mut self, label: &str, outcome: Outcome) {
        if !outcome.is_ok() {
            warn!("{label} failed: {outcome:?}");
        }
        println!("{outcome}");
        self.outcomes.push(outcome);
    }

    /// Number of calls attempted.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of calls that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }
}
