// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! A "thing" in the Reddit sense.
//!
//! Historically in the Reddit API and its old source code, a "Thing" was
//! any element of the Reddit system: users, posts, comments, subreddits,
//! etc. This module holds the raw JSON shapes returned by the endpoints the
//! cloner calls, along with the smaller domain types the cloner works with
//! once the raw data has been read.

use serde::{Deserialize, Serialize};

/// A thing that can appear in a paginated listing.
pub trait Listable {
    /// The thing's base-36 ID, without its kind prefix.
    fn id(&self) -> &str;
}

/// A single item in a listing, tagged with its kind (e.g., `t5` for
/// subreddits).
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Thing<T> {
    pub kind: String,
    pub data: T,
}

impl<T: Listable> Thing<T> {
    /// The thing's "fullname": its kind and ID joined by an underscore.
    ///
    /// Listings use fullnames as pagination cursors.
    pub fn fullname(&self) -> String {
        format!("{}_{}", self.kind, self.data.id())
    }
}

/// A page of a listing, e.g., `/subreddits/mine/subscriber`.
#[derive(Debug, Deserialize)]
pub struct ListingResponse<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
pub struct ListingData<T> {
    pub children: Vec<Thing<T>>,
}

/// Raw subreddit data as it appears in the subscription listing.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SubredditData {
    pub display_name: String,
    pub id: String,
}

impl Listable for SubredditData {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Raw multireddit data as returned by `/api/multi/mine`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MultiData {
    pub name: String,
    pub path: String,
    pub subreddits: Vec<MultiSubreddit>,
}

/// A subreddit entry inside a multireddit, both when reading and when
/// creating one.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MultiSubreddit {
    pub name: String,
}

/// The authenticated account, as returned by `/api/v1/me`.
#[derive(Debug, Deserialize)]
pub struct Me {
    pub name: String,
}

/// The token endpoint's response.
///
/// Reddit answers bad credentials with a 200 and an `error` field rather
/// than an access token, so both fields are optional.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
}

/// A subreddit the source account is subscribed to.
#[derive(Clone, Debug, PartialEq)]
pub struct Subreddit {
    name: String,
    id: String,
}

impl Subreddit {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        let name = name.into();
        let id = id.into();
        Self { name, id }
    }

    /// The subreddit's display name, used when subscribing.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The subreddit's ID. Informational only.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl From<SubredditData> for Subreddit {
    fn from(data: SubredditData) -> Self {
        Self::new(data.display_name, data.id)
    }
}

/// A multireddit owned by the source account.
#[derive(Clone, Debug, PartialEq)]
pub struct Multireddit {
    name: String,
    path: String,
    subreddits: Vec<String>,
}

impl Multireddit {
    pub fn new(name: impl Into<String>, path: impl Into<String>, subreddits: Vec<String>) -> Self {
        let name = name.into();
        let path = path.into();
        Self {
            name,
            path,
            subreddits,
        }
    }

    /// The multireddit's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The multireddit's path, e.g., `/user/alice/m/movies`.
    ///
    /// The path embeds the owner's username.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Names of the subreddits in the multireddit, in order.
    pub fn subreddits(&self) -> &[String] {
        &self.subreddits
    }

    /// The payload used to create an equivalent multireddit on another
    /// account.
    pub fn model(&self) -> MultiModel {
        MultiModel {
            display_name: self.name.clone(),
            subreddits: self
                .subreddits
                .iter()
                .map(|name| MultiSubreddit { name: name.clone() })
                .collect(),
            visibility: Visibility::Private,
        }
    }
}

impl From<MultiData> for Multireddit {
    fn from(data: MultiData) -> Self {
        let subreddits = data.subreddits.into_iter().map(|s| s.name).collect();
        Self::new(data.name, data.path, subreddits)
    }
}

/// Multireddit visibility. Cloned multireddits are always private.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
}

/// The `model` parameter sent when creating a multireddit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MultiModel {
    pub display_name: String,
    pub subreddits: Vec<MultiSubreddit>,
    pub visibility: Visibility,
}
