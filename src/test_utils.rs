use crate::http::{HTTPResult, Response};
use crate::reddit::auth::{
    AccessToken, AccountCredentials, ClientCredentials, Credentials, Session,
};
use crate::reddit::service::{Params, Service};
use serde_json::json;
use std::sync::Mutex;

pub fn do_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The kind of request recorded by a [`TestService`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Method {
    Token,
    Get,
    Post,
}

/// A request made through a [`TestService`].
#[derive(Clone, Debug)]
pub struct Call {
    pub method: Method,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    /// The bearer token, or `client_id:secret` for token requests.
    pub token: String,
}

impl Call {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

type Router = Box<dyn Fn(&Call) -> Response + Send + Sync>;

/// A deterministic service that records each call and answers it from a
/// routing function.
pub struct TestService {
    router: Router,
    calls: Mutex<Vec<Call>>,
}

impl TestService {
    pub fn new(router: impl Fn(&Call) -> Response + Send + Sync + 'static) -> Self {
        do_logging();
        Self {
            router: Box::new(router),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method, endpoint: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method && call.endpoint == endpoint)
            .collect()
    }

    fn respond(&self, call: Call) -> HTTPResult<Response> {
        let resp = (self.router)(&call);
        self.calls.lock().unwrap().push(call);
        Ok(resp)
    }

    fn call(method: Method, token: &AccessToken, endpoint: &str, params: &Params<'_>) -> Call {
        Call {
            method,
            endpoint: endpoint.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            token: token.secret().to_string(),
        }
    }
}

impl Service for TestService {
    async fn access_token(
        &self,
        client: &ClientCredentials,
        account: &AccountCredentials,
    ) -> HTTPResult<Response> {
        let call = Call {
            method: Method::Token,
            endpoint: String::from("/api/v1/access_token"),
            params: account
                .password_grant()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            token: format!("{}:{}", client.client_id(), client.secret()),
        };
        self.respond(call)
    }

    async fn get(
        &self,
        token: &AccessToken,
        endpoint: &str,
        params: &Params<'_>,
    ) -> HTTPResult<Response> {
        self.respond(Self::call(Method::Get, token, endpoint, params))
    }

    async fn post(
        &self,
        token: &AccessToken,
        endpoint: &str,
        params: &Params<'_>,
    ) -> HTTPResult<Response> {
        self.respond(Self::call(Method::Post, token, endpoint, params))
    }
}

/// Credentials for a clone from `alice` to `bob`.
pub fn credentials() -> Credentials {
    Credentials {
        client: ClientCredentials::new("client", "s3cr3t"),
        source: AccountCredentials::new("alice", "hunter2"),
        destination: AccountCredentials::new("bob", "hunter3"),
    }
}

/// A session whose tokens are `token-alice` and `token-bob`.
pub fn session() -> Session {
    Session::new(
        AccessToken::new("token-alice"),
        AccessToken::new("token-bob"),
    )
}

/// Answers a token request with `token-<username>`.
pub fn token_response(call: &Call) -> Response {
    let username = call.param("username").unwrap_or_default();
    Response::ok(json!({"access_token": format!("token-{username}")}).to_string())
}

/// Names `sub0`, `sub1`, ... for `n` subreddits, with matching IDs.
pub fn subreddit_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("sub{i}")).collect()
}

/// A page of the subscription listing containing the given subreddits.
pub fn listing_page(names: &[String]) -> Response {
    let children: Vec<_> = names
        .iter()
        .map(|name| json!({"kind": "t5", "data": {"display_name": name, "id": format!("id{name}")}}))
        .collect();
    Response::ok(json!({"kind": "Listing", "data": {"children": children}}).to_string())
}

/// Serves a subscription listing of `names` in pages of 100, following the
/// `after` cursor the way Reddit does.
pub fn paged_listing(names: &[String], call: &Call) -> Response {
    let start = match call.param("after") {
        None => 0,
        Some(after) => names
            .iter()
            .position(|name| format!("t5_id{name}") == after)
            .map(|i| i + 1)
            .unwrap_or(names.len()),
    };
    let end = (start + 100).min(names.len());
    listing_page(&names[start..end])
}

/// Answers `/api/v1/me` with a username derived from the bearer token.
pub fn me_response(call: &Call) -> Response {
    let username = call.token.trim_start_matches("token-");
    Response::ok(json!({"name": username}).to_string())
}
