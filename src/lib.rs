//! Mattersend — pipe standard input to Mattermost.
//!
//! Two binaries share this library: `mattersend` logs in with a username and
//! password and posts to a channel as that user; `mattersend-hook` posts
//! through a preconfigured incoming webhook. Both read the message body from
//! standard input and exit after at most two HTTP calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod input;
pub mod logging;
