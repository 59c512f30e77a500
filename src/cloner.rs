// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Clones one account's subscriptions and multireddits onto another.

use crate::http::HTTPError;
use crate::reddit::auth::{self, AuthError, Credentials, Session};
use crate::reddit::multi::MultiredditCloner;
use crate::reddit::service::Service;
use crate::reddit::subscriptions::SubscriptionCloner;
use crate::report::Report;
use log::info;
use std::fmt;
use thiserror::Error;

/// Runs a clone from start to finish.
///
/// Each resource type is read in full from the source before anything is
/// written to the destination. Nothing is rolled back: if some
/// subscriptions cannot be copied, multireddits are still copied.
#[derive(Debug)]
pub struct Cloner<S> {
    service: S,
}

impl<S: Service> Cloner<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The service used to talk to Reddit.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Authenticates both accounts and copies everything from the source
    /// account to the destination account.
    ///
    /// Returns an error if either account cannot be authenticated or if
    /// anything cannot be read; failed writes are only reported in the
    /// returned [`Summary`].
    pub async fn run(&self, credentials: Credentials) -> Result<Summary, Error> {
        let session = auth::authenticate(&self.service, credentials).await?;
        self.clone_with(&session).await
    }

    /// Copies everything using an existing session.
    pub async fn clone_with(&self, session: &Session) -> Result<Summary, Error> {
        let subscriptions = SubscriptionCloner::new(&self.service, session);

        println!("Loading subreddits from source...");
        let subreddits = subscriptions.fetch_source_subscriptions().await?;

        println!("Subscribing destination...");
        let subscribed = subscriptions.subscribe_destination(&subreddits).await;

        let multis = MultiredditCloner::new(&self.service, session);

        println!("Loading multireddits from source...");
        let multireddits = multis.fetch_source_multireddits().await?;

        println!("Creating multireddits on destination...");
        let created = multis.clone_to_destination(&multireddits).await?;

        let summary = Summary {
            subreddits: subreddits.len(),
            subscribed,
            created,
        };
        info!("{summary}");
        Ok(summary)
    }
}

/// What happened during a clone.
#[derive(Debug)]
pub struct Summary {
    subreddits: usize,
    subscribed: Report,
    created: Report,
}

impl Summary {
    /// Number of subreddits the source account is subscribed to.
    pub fn subreddits(&self) -> usize {
        self.subreddits
    }

    /// Outcomes of each subscribe batch.
    pub fn subscribed(&self) -> &Report {
        &self.subscribed
    }

    /// Outcomes of each multireddit creation.
    pub fn created(&self) -> &Report {
        &self.created
    }

    /// True if every write succeeded.
    pub fn is_complete(&self) -> bool {
        self.subscribed.failed() == 0 && self.created.failed() == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Copied {} subreddits in {} batches ({} failed) and {} multireddits ({} failed)",
            self.subreddits,
            self.subscribed.attempted(),
            self.subscribed.failed(),
            self.created.attempted(),
            self.created.failed(),
        )
    }
}

/// An error that stops a clone.
#[derive(Debug, Error)]
pub enum Error {
    /// An account could not be authenticated.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Data could not be read from Reddit.
    #[error("Could not read from Reddit: {0}")]
    Fetch(#[from] HTTPError),
}
