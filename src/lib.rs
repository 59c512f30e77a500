// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! raccclo (Reddit ACCount CLOner) copies a Redditor's subreddit
//! subscriptions and multireddits from one account to another.
//!
//! It signs in to both accounts using Reddit's OAuth2 password grant,
//! reads every subreddit the source account is subscribed to, subscribes
//! the destination account to the same subreddits, and then recreates
//! each of the source account's multireddits on the destination account.
//! Multireddits are always created as private multireddits.
//!
//! # Examples
//!
//! Enter credentials interactively (input is not echoed):
//!
//! ```bash
//! raccclo --terminal
//! ```
//!
//! Read credentials from a JSON file:
//!
//! ```bash
//! raccclo --config credentials.json
//! ```
//!
//! The file must contain every one of the following fields:
//!
//! ```json
//! {
//!   "client_id": "...",
//!   "secret_token": "...",
//!   "src_username": "...",
//!   "src_password": "...",
//!   "dst_username": "...",
//!   "dst_password": "..."
//! }
//! ```
//!
//! **The file holds passwords in plain text. Delete it when you are done.**
//!
//! Get usage and help for the tool:
//!
//! ```bash
//! raccclo --help
//! ```
//!
//! # Reddit API Setup
//!
//! raccclo talks to Reddit as a "script" app. To create one:
//!
//! 1. Sign in to Reddit and visit the [app preferences] page.
//! 2. Create a new app of type "script".
//! 3. Copy the client ID (shown under the app's name) and the secret.
//!
//! Both accounts must be able to sign in with a password; accounts that
//! use two-factor authentication cannot use the password grant.
//!
//! # Partial Clones
//!
//! Nothing raccclo does can be undone, and nothing is retried. If a
//! subscribe batch or a multireddit cannot be created, the error is
//! printed and raccclo moves on. Running it again is safe for
//! subscriptions, but multireddits that were already created will fail
//! with a naming conflict.
//!
//! # License
//!
//! raccclo is licensed under the terms of the [Apache License 2.0]. Please
//! see the LICENSE file accompanying this source code or visit the previous
//! link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0
//! [app preferences]: https://www.reddit.com/prefs/apps

pub mod cli;
pub mod cloner;
pub mod conf;
pub mod http;
pub mod reddit;
pub mod report;

#[cfg(test)]
mod test_utils;
