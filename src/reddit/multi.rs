// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Copies multireddits from the source to the destination.
//!
//! A multireddit's path embeds its owner's username, e.g.,
//! `/user/alice/m/movies`. To recreate it on the destination account,
//! the owner in the path is replaced with the destination's username,
//! and the multireddit is created at the new path with the same name
//! and subreddits.

use crate::http::{HTTPError, HTTPResult, Response};
use crate::reddit::auth::{Role, Session};
use crate::reddit::service::Service;
use crate::reddit::thing::{Me, MultiData, Multireddit, Thing};
use crate::report::{Outcome, Report};
use log::{debug, info};
use thiserror::Error;

/// Lists the authenticated account's multireddits.
pub const MULTIS_ENDPOINT: &str = "/api/multi/mine";

/// Identifies the authenticated account.
pub const ME_ENDPOINT: &str = "/api/v1/me";

/// Reads the source account's multireddits and recreates them on the
/// destination account.
#[derive(Debug)]
pub struct MultiredditCloner<'a, S> {
    service: &'a S,
    session: &'a Session,
}

impl<'a, S: Service> MultiredditCloner<'a, S> {
    pub fn new(service: &'a S, session: &'a Session) -> Self {
        Self { service, session }
    }

    /// Every multireddit owned by the source account.
    pub async fn fetch_source_multireddits(&self) -> HTTPResult<Vec<Multireddit>> {
        let token = self.session.token(Role::Source);
        let multis: Vec<Thing<MultiData>> = self
            .service
            .get(token, MULTIS_ENDPOINT, &[])
            .await?
            .error_for_status()?
            .json()?;
        info!("Source owns {} multireddits", multis.len());
        Ok(multis
            .into_iter()
            .map(|thing| Multireddit::from(thing.data))
            .collect())
    }

    /// The canonical username of the account playing `role`.
    ///
    /// This may differ from the login used to authenticate, e.g., in
    /// capitalization.
    pub async fn username_of(&self, role: Role) -> HTTPResult<String> {
        let token = self.session.token(role);
        let me: Me = self
            .service
            .get(token, ME_ENDPOINT, &[])
            .await?
            .error_for_status()?
            .json()?;
        debug!("{role} account is {}", me.name);
        Ok(me.name)
    }

    /// Creates each multireddit on the destination account as a private
    /// multireddit.
    ///
    /// Both accounts' usernames are looked up first; failing to look
    /// them up is an error, since no path can be rewritten without them.
    /// After that, each multireddit is created independently, and a
    /// failure to create one does not stop the rest from being created.
    pub async fn clone_to_destination(&self, multireddits: &[Multireddit]) -> HTTPResult<Report> {
        let mut report = Report::default();
        if multireddits.is_empty() {
            return Ok(report);
        }

        let source = self.username_of(Role::Source).await?;
        let destination = self.username_of(Role::Destination).await?;

        for multi in multireddits {
            let label = format!("Multireddit {}", multi.name());
            let outcome = match rewrite_path(multi.path(), &source, &destination) {
                Ok(path) => Outcome::from_result(self.create(&path, multi).await),
                Err(err) => Outcome::Error(err.to_string()),
            };
            report.record(&label, outcome);
        }

        Ok(report)
    }

    async fn create(&self, path: &str, multi: &Multireddit) -> HTTPResult<Response> {
        let token = self.session.token(Role::Destination);
        let model = serde_json::to_string(&multi.model()).map_err(HTTPError::Serialization)?;
        let endpoint = format!("/api/multi{path}");
        self.service.post(token, &endpoint, &[("model", model)]).await
    }
}

/// Moves a multireddit path from one owner to another.
///
/// The path must have the form `/user/<owner>/m/<name>`, and `<owner>`
/// must be `source` (compared case-insensitively, as Reddit usernames
/// are). Only the owner segment changes.
///
/// # Examples
///
/// ```
/// use raccclo::reddit::multi::rewrite_path;
/// let path = rewrite_path("/user/alice/m/movies", "alice", "bob").unwrap();
/// assert_eq!(path, "/user/bob/m/movies");
/// ```
pub fn rewrite_path(path: &str, source: &str, destination: &str) -> Result<String, PathError> {
    let segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();
    match segments.as_slice() {
        ["", "user", owner, "m", name] if !name.is_empty() => {
            if owner.eq_ignore_ascii_case(source) {
                Ok(format!("/user/{destination}/m/{name}"))
            } else {
                Err(PathError::WrongOwner {
                    path: path.to_string(),
                    owner: owner.to_string(),
                    expected: source.to_string(),
                })
            }
        }
        _ => Err(PathError::Malformed(path.to_string())),
    }
}

/// A multireddit path that cannot be moved to the destination account.
#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    /// The path is not of the form `/user/<owner>/m/<name>`.
    #[error("Unrecognized multireddit path: {0}")]
    Malformed(String),

    /// The path belongs to someone other than the source account.
    #[error("Multireddit path {path} is owned by {owner}, not {expected}")]
    WrongOwner {
        path: String,
        owner: String,
        expected: String,
    },
}
