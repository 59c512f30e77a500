// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! HTTPS connector for the Reddit API.
//!
//! Service structures in this module provide a low-level way to interact
//! with the Reddit API over HTTPS, essentially a specialized HTTPS client
//! specifically for Reddit's OAuth endpoints.

use crate::http::{HTTPResult, HTTPService, Response};
use crate::reddit::auth::{AccessToken, AccountCredentials, ClientCredentials};
use log::debug;
use reqwest::{Client, header};

/// Reddit's OAuth2 token endpoint.
pub const ACCESS_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Base URL for calls authorized with a bearer token.
pub const OAUTH_URL: &str = "https://oauth.reddit.com";

/// Query parameters for a request.
pub type Params<'a> = [(&'a str, String)];

/// A service for making calls to the Reddit API.
///
/// Using this trait, clients can implement different ways of connecting
/// to the Reddit API, such as an actual connector for production code,
/// and a mocked connector for testing purposes.
///
/// Endpoints are paths relative to the OAuth base URL, such as
/// `/api/v1/me`. Every method returns the response regardless of its
/// status code; callers decide whether a non-200 response is fatal.
pub trait Service {
    /// Exchanges an account's credentials for an access token.
    fn access_token(
        &self,
        client: &ClientCredentials,
        account: &AccountCredentials,
    ) -> impl Future<Output = HTTPResult<Response>> + Send;

    /// Sends a GET request to `endpoint` on behalf of the token's account.
    fn get(
        &self,
        token: &AccessToken,
        endpoint: &str,
        params: &Params<'_>,
    ) -> impl Future<Output = HTTPResult<Response>> + Send;

    /// Sends a POST request to `endpoint` on behalf of the token's account.
    ///
    /// The Reddit endpoints used by the cloner take their arguments as
    /// query parameters, so there is no request body.
    fn post(
        &self,
        token: &AccessToken,
        endpoint: &str,
        params: &Params<'_>,
    ) -> impl Future<Output = HTTPResult<Response>> + Send;
}

/// A service that contacts the Reddit API directly.
#[derive(Debug)]
pub struct RedditService {
    client: Client,
}

impl HTTPService for RedditService {}

impl Default for RedditService {
    /// Creates a new Reddit service.
    fn default() -> Self {
        let client = Self::client();
        Self { client }
    }
}

impl RedditService {
    fn uri(&self, endpoint: &str) -> String {
        format!("{OAUTH_URL}{endpoint}")
    }
}

impl Service for RedditService {
    async fn access_token(
        &self,
        client: &ClientCredentials,
        account: &AccountCredentials,
    ) -> HTTPResult<Response> {
        debug!("POST {ACCESS_TOKEN_URL} for {}", account.username());
        let resp = self
            .client
            .post(ACCESS_TOKEN_URL)
            .basic_auth(client.client_id(), Some(client.secret()))
            .form(&account.password_grant())
            .send()
            .await?;
        Response::read(resp).await
    }

    async fn get(
        &self,
        token: &AccessToken,
        endpoint: &str,
        params: &Params<'_>,
    ) -> HTTPResult<Response> {
        debug!("GET {endpoint} {:?}", param_names(params));
        let resp = self
            .client
            .get(self.uri(endpoint))
            .header(header::AUTHORIZATION, token.bearer())
            .query(params)
            .send()
            .await?;
        Response::read(resp).await
    }

    async fn post(
        &self,
        token: &AccessToken,
        endpoint: &str,
        params: &Params<'_>,
    ) -> HTTPResult<Response> {
        debug!("POST {endpoint} {:?}", param_names(params));
        let resp = self
            .client
            .post(self.uri(endpoint))
            .header(header::AUTHORIZATION, token.bearer())
            .query(params)
            .send()
            .await?;
        Response::read(resp).await
    }
}

fn param_names<'a>(params: &'a Params<'_>) -> Vec<&'a str> {
    params.iter().map(|(name, _)| *name).collect()
}
