// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Copies subreddit subscriptions from the source to the destination.

use crate::http::HTTPResult;
use crate::reddit::auth::{Role, Session};
use crate::reddit::listing::Listing;
use crate::reddit::service::Service;
use crate::reddit::thing::{Subreddit, SubredditData};
use crate::report::{Outcome, Report};
use itertools::Itertools;
use log::info;

/// Listing of the authenticated account's subscriptions.
pub const SUBSCRIPTIONS_ENDPOINT: &str = "/subreddits/mine/subscriber";

/// Endpoint used to subscribe to subreddits.
pub const SUBSCRIBE_ENDPOINT: &str = "/api/subscribe";

/// Maximum number of subreddits Reddit accepts in a single subscribe call.
pub const BATCH_SIZE: usize = 100;

/// Reads the source account's subscriptions and subscribes the
/// destination account to them.
#[derive(Debug)]
pub struct SubscriptionCloner<'a, S> {
    service: &'a S,
    session: &'a Session,
}

impl<'a, S: Service> SubscriptionCloner<'a, S> {
    pub fn new(service: &'a S, session: &'a Session) -> Self {
        Self { service, session }
    }

    /// Every subreddit the source account is subscribed to, across all
    /// pages of the listing.
    pub async fn fetch_source_subscriptions(&self) -> HTTPResult<Vec<Subreddit>> {
        let token = self.session.token(Role::Source);
        let subreddits: Vec<SubredditData> =
            Listing::new(self.service, token, SUBSCRIPTIONS_ENDPOINT)
                .collect_all()
                .await?;
        info!("Source is subscribed to {} subreddits", subreddits.len());
        Ok(subreddits.into_iter().map(Subreddit::from).collect())
    }

    /// Subscribes the destination account to `subreddits`.
    ///
    /// Subreddits are sent in batches of at most [`BATCH_SIZE`]. Every
    /// batch is attempted even if earlier batches fail.
    pub async fn subscribe_destination(&self, subreddits: &[Subreddit]) -> Report {
        let token = self.session.token(Role::Destination);
        let mut report = Report::default();

        for (i, batch) in batches(subreddits).into_iter().enumerate() {
            let params = [("action", String::from("sub")), ("sr_name", batch)];
            let result = self.service.post(token, SUBSCRIBE_ENDPOINT, &params).await;
            report.record(&format!("Subscribe batch {}", i + 1), Outcome::from_result(result));
        }

        report
    }
}

/// Comma-joined subreddit names, at most [`BATCH_SIZE`] per batch, in
/// their original order.
///
/// # Examples
///
/// ```
/// use raccclo::reddit::subscriptions::batches;
/// use raccclo::reddit::thing::Subreddit;
/// let subreddits = vec![Subreddit::new("rust", "1"), Subreddit::new("golang", "2")];
/// assert_eq!(batches(&subreddits), ["rust,golang"]);
/// ```
pub fn batches(subreddits: &[Subreddit]) -> Vec<String> {
    subreddits
        .chunks(BATCH_SIZE)
        .map(|chunk| chunk.iter().map(Subreddit::name).join(","))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Response;
    use crate::test_utils::{Method, TestService, paged_listing, session, subreddit_names};
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use std::collections::HashSet;

    fn subreddits(n: usize) -> Vec<Subreddit> {
        subreddit_names(n)
            .into_iter()
            .map(|name| Subreddit::new(name.clone(), format!("id{name}")))
            .collect()
    }

    mod batching {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn it_returns_no_batches_for_no_subreddits() {
            assert!(batches(&[]).is_empty());
        }

        #[test]
        fn it_returns_one_batch_for_exactly_one_hundred_subreddits() {
            assert_eq!(batches(&subreddits(100)).len(), 1);
        }

        #[test]
        fn it_splits_subreddits_into_batches_of_one_hundred() {
            for n in [1, 99, 101, 150, 200, 201, 999] {
                let subreddits = subreddits(n);
                let batches = batches(&subreddits);
                assert_eq!(batches.len(), n.div_ceil(BATCH_SIZE), "{n} subreddits");

                let names: Vec<&str> = batches.iter().flat_map(|b| b.split(',')).collect();
                assert!(batches.iter().all(|b| b.split(',').count() <= BATCH_SIZE));
                assert_eq!(names.len(), n);
                let unique: HashSet<&str> = names.iter().copied().collect();
                assert_eq!(unique.len(), n);
                assert!(subreddits.iter().all(|s| unique.contains(s.name())));
            }
        }
    }

    #[tokio::test]
    async fn it_fetches_every_page_of_source_subscriptions() {
        let names = subreddit_names(250);
        let service = TestService::new(move |call| paged_listing(&names, call));
        let session = session();

        let subreddits = SubscriptionCloner::new(&service, &session)
            .fetch_source_subscriptions()
            .await
            .unwrap();

        assert_eq!(subreddits.len(), 250);
        assert_eq!(subreddits[0], Subreddit::new("sub0", "idsub0"));
        assert!(service.calls().iter().all(|c| c.token == "token-alice"));
    }

    #[tokio::test]
    async fn it_subscribes_the_destination_in_batches() {
        let service = TestService::new(|_| Response::ok("{}"));
        let session = session();

        let report = SubscriptionCloner::new(&service, &session)
            .subscribe_destination(&subreddits(150))
            .await;

        let calls = service.calls_to(Method::Post, SUBSCRIBE_ENDPOINT);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].param("sr_name").unwrap().split(',').count(), 100);
        assert_eq!(calls[1].param("sr_name").unwrap().split(',').count(), 50);
        assert!(calls.iter().all(|c| c.param("action") == Some("sub")));
        assert!(calls.iter().all(|c| c.token == "token-bob"));
        assert_eq!(report.attempted(), 2);
        assert_eq!(report.failed(), 0);
    }

    #[tokio::test]
    async fn it_attempts_every_batch_after_a_failure() {
        let service = TestService::new(|call| {
            if call.param("sr_name").is_some_and(|names| names.starts_with("sub0,")) {
                Response::new(StatusCode::INTERNAL_SERVER_ERROR, "oops")
            } else {
                Response::ok("{}")
            }
        });
        let session = session();

        let report = SubscriptionCloner::new(&service, &session)
            .subscribe_destination(&subreddits(250))
            .await;

        assert_eq!(service.calls().len(), 3);
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.failed(), 1);
        assert!(!report.outcomes()[0].is_ok());
    }

    #[tokio::test]
    async fn it_makes_no_calls_when_there_is_nothing_to_subscribe_to() {
        let service = TestService::new(|_| Response::ok("{}"));
        let session = session();

        let report = SubscriptionCloner::new(&service, &session)
            .subscribe_destination(&[])
            .await;

        assert!(service.calls().is_empty());
        assert_eq!(report.attempted(), 0);
    }
}
