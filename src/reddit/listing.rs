// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Cursor-based pagination for Reddit listings.
//!
//! Reddit's listing endpoints return at most 100 things per page. The
//! next page is requested by passing the fullname of the last thing seen
//! as the `after` parameter, and the listing is exhausted once a page
//! comes back empty.

use crate::http::HTTPResult;
use crate::reddit::auth::AccessToken;
use crate::reddit::service::Service;
use crate::reddit::thing::{Listable, ListingResponse, Thing};
use log::debug;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Maximum number of things Reddit returns in a single page.
pub const PAGE_SIZE: usize = 100;

/// A cursor over the pages of a single listing.
///
/// The cursor is consumed as it is read and cannot be restarted; create a
/// new `Listing` to read the listing again.
#[derive(Debug)]
pub struct Listing<'a, S, T> {
    service: &'a S,
    token: &'a AccessToken,
    endpoint: String,
    after: Option<String>,
    done: bool,
    _thing: PhantomData<T>,
}

impl<'a, S, T> Listing<'a, S, T>
where
    S: Service,
    T: Listable + DeserializeOwned,
{
    /// Creates a cursor over the listing at `endpoint`, read on behalf of
    /// the token's account.
    pub fn new(service: &'a S, token: &'a AccessToken, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            service,
            token,
            endpoint,
            after: None,
            done: false,
            _thing: PhantomData,
        }
    }

    /// The cursor that will be sent with the next page request, if any.
    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// Fetches the next page of things.
    ///
    /// Returns `None` once the listing is exhausted. A non-200 response or
    /// an unparseable page is an error.
    pub async fn next_page(&mut self) -> HTTPResult<Option<Vec<Thing<T>>>> {
        if self.done {
            return Ok(None);
        }

        let resp = self
            .service
            .get(self.token, &self.endpoint, &self.params())
            .await?
            .error_for_status()?;
        let page: ListingResponse<T> = resp.json()?;
        let things = page.data.children;

        debug!(
            "Read {} things from {} after {:?}",
            things.len(),
            self.endpoint,
            self.after
        );

        match things.last() {
            Some(last) => {
                self.after = Some(last.fullname());
                Ok(Some(things))
            }
            None => {
                self.done = true;
                Ok(None)
            }
        }
    }

    /// Reads every remaining page and returns the things they contain.
    pub async fn collect_all(mut self) -> HTTPResult<Vec<T>> {
        let mut all = vec![];
        while let Some(page) = self.next_page().await? {
            all.extend(page.into_iter().map(|thing| thing.data));
        }
        Ok(all)
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", PAGE_SIZE.to_string())];
        if let Some(after) = &self.after {
            params.push(("after", after.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HTTPError, Response};
    use crate::reddit::thing::SubredditData;
    use crate::test_utils::{Method, TestService, paged_listing, subreddit_names};
    use reqwest::StatusCode;

    const ENDPOINT: &str = "/subreddits/mine/subscriber";

    fn token() -> AccessToken {
        AccessToken::new("token-alice")
    }

    #[tokio::test]
    async fn it_reads_full_pages_until_an_empty_page() {
        let names = subreddit_names(300);
        let service = TestService::new(move |call| paged_listing(&names, call));
        let token = token();

        let things: Vec<SubredditData> = Listing::new(&service, &token, ENDPOINT)
            .collect_all()
            .await
            .unwrap();

        assert_eq!(things.len(), 300);
        assert_eq!(things[0].display_name, "sub0");
        assert_eq!(things[299].display_name, "sub299");
        // Three full pages plus the empty terminal page.
        assert_eq!(service.calls_to(Method::Get, ENDPOINT).len(), 4);
    }

    #[tokio::test]
    async fn it_sends_a_limit_and_the_cursor_of_the_last_thing() {
        let names = subreddit_names(150);
        let service = TestService::new(move |call| paged_listing(&names, call));
        let token = token();

        let _: Vec<SubredditData> = Listing::new(&service, &token, ENDPOINT)
            .collect_all()
            .await
            .unwrap();

        let calls = service.calls();
        assert!(calls.iter().all(|call| call.param("limit") == Some("100")));
        assert_eq!(calls[0].param("after"), None);
        assert_eq!(calls[1].param("after"), Some("t5_idsub99"));
        assert_eq!(calls[2].param("after"), Some("t5_idsub149"));
        assert!(calls.iter().all(|call| call.token == "token-alice"));
    }

    #[tokio::test]
    async fn it_stops_after_the_listing_is_exhausted() {
        let service = TestService::new(|call| paged_listing(&[], call));
        let token = token();
        let mut listing: Listing<_, SubredditData> = Listing::new(&service, &token, ENDPOINT);

        assert!(listing.next_page().await.unwrap().is_none());
        assert!(listing.next_page().await.unwrap().is_none());
        assert_eq!(service.calls().len(), 1);
    }

    #[tokio::test]
    async fn it_tracks_the_cursor_between_pages() {
        let names = subreddit_names(101);
        let service = TestService::new(move |call| paged_listing(&names, call));
        let token = token();
        let mut listing: Listing<_, SubredditData> = Listing::new(&service, &token, ENDPOINT);

        assert_eq!(listing.after(), None);
        let page = listing.next_page().await.unwrap().unwrap();
        assert_eq!(page.len(), 100);
        assert_eq!(listing.after(), Some("t5_idsub99"));
        let page = listing.next_page().await.unwrap().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(listing.after(), Some("t5_idsub100"));
    }

    #[tokio::test]
    async fn it_returns_an_error_for_unsuccessful_pages() {
        let service = TestService::new(|_| Response::new(StatusCode::FORBIDDEN, "forbidden"));
        let token = token();

        let result: HTTPResult<Vec<SubredditData>> = Listing::new(&service, &token, ENDPOINT)
            .collect_all()
            .await;

        assert!(matches!(
            result,
            Err(HTTPError::Http(status, _)) if status == StatusCode::FORBIDDEN
        ));
    }
}
