// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! OAuth2 authentication for the two accounts involved in a clone.
//!
//! Reddit "script" apps authenticate with the password grant: the app's
//! client ID and secret are sent as HTTP Basic Auth, and the account's
//! username and password are sent as a form body. The token endpoint
//! answers with a bearer token that authorizes every later call made on
//! behalf of that account.

use crate::http::HTTPError;
use crate::reddit::service::Service;
use crate::reddit::thing::TokenResponse;
use log::{debug, info};
use std::fmt;
use thiserror::Error;

/// The app's OAuth2 client credentials.
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        let client_id = client_id.into();
        let secret = secret.into();
        Self { client_id, secret }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// A Reddit account's login.
#[derive(Clone)]
pub struct AccountCredentials {
    username: String,
    password: String,
}

impl AccountCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let password = password.into();
        Self { username, password }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// The form body of a password grant for this account.
    ///
    /// # Examples
    ///
    /// ```
    /// use raccclo::reddit::auth::AccountCredentials;
    /// let account = AccountCredentials::new("alice", "hunter2");
    /// assert_eq!(
    ///     account.password_grant(),
    ///     [("grant_type", "password"), ("username", "alice"), ("password", "hunter2")],
    /// );
    /// ```
    pub fn password_grant(&self) -> [(&str, &str); 3] {
        [
            ("grant_type", "password"),
            ("username", &self.username),
            ("password", &self.password),
        ]
    }
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to authenticate both accounts.
///
/// Credentials are consumed by [`authenticate`] and are not kept around
/// once tokens have been obtained.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client: ClientCredentials,
    pub source: AccountCredentials,
    pub destination: AccountCredentials,
}

impl Credentials {
    /// The login for the account playing the given role.
    pub fn account(&self, role: Role) -> &AccountCredentials {
        match role {
            Role::Source => &self.source,
            Role::Destination => &self.destination,
        }
    }
}

/// The part an account plays in a clone: subscriptions are copied from the
/// source account to the destination account.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Role {
    Source,
    Destination,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Source => write!(f, "Source"),
            Role::Destination => write!(f, "Destination"),
        }
    }
}

/// An opaque OAuth2 bearer token.
#[derive(Clone, Eq, PartialEq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// The value of the `Authorization` header for this token.
    ///
    /// # Examples
    ///
    /// ```
    /// use raccclo::reddit::auth::AccessToken;
    /// assert_eq!(AccessToken::new("abc").bearer(), "bearer abc");
    /// ```
    pub fn bearer(&self) -> String {
        format!("bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Tokens for both accounts, held for the duration of a run.
///
/// Tokens are never refreshed; Reddit's tokens last an hour, which is
/// far longer than a clone takes.
#[derive(Clone, Debug)]
pub struct Session {
    source: AccessToken,
    destination: AccessToken,
}

impl Session {
    pub fn new(source: AccessToken, destination: AccessToken) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// The token for the account playing the given role.
    pub fn token(&self, role: Role) -> &AccessToken {
        match role {
            Role::Source => &self.source,
            Role::Destination => &self.destination,
        }
    }
}

/// Exchanges both accounts' credentials for bearer tokens.
///
/// The source account is authenticated first. If either exchange fails,
/// no further calls are made.
pub async fn authenticate<S: Service>(
    service: &S,
    credentials: Credentials,
) -> Result<Session, AuthError> {
    let source = request_token(service, &credentials, Role::Source).await?;
    let destination = request_token(service, &credentials, Role::Destination).await?;
    info!("Authenticated source and destination accounts");
    Ok(Session::new(source, destination))
}

/// Exchanges one account's credentials for a bearer token.
pub async fn request_token<S: Service>(
    service: &S,
    credentials: &Credentials,
    role: Role,
) -> Result<AccessToken, AuthError> {
    let account = credentials.account(role);
    debug!("Requesting {role} access token for {}", account.username());

    let resp = service.access_token(&credentials.client, account).await?;
    let resp = resp.error_for_status()?;
    let token: TokenResponse = resp.json()?;

    match token.access_token {
        Some(access_token) if !access_token.is_empty() => Ok(AccessToken::new(access_token)),
        _ => Err(AuthError::MissingToken {
            role,
            reason: token.error,
        }),
    }
}

/// An error obtaining an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint could not be reached or answered with an error.
    #[error("Could not authenticate: {0}")]
    Service(#[from] HTTPError),

    /// The token endpoint answered, but without a token.
    #[error("{role} account did not receive an access token{}", reason_suffix(.reason))]
    MissingToken { role: Role, reason: Option<String> },
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_ref()
        .map(|reason| format!(": {reason}"))
        .unwrap_or_default()
}
