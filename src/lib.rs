//! A Rust client library for the JIRA REST API.
//!
//! Construct a [`Jira`] client with the server options (and credentials,
//! unless the instance allows anonymous access), then call one method per
//! JIRA operation. Responses come back as typed views ([`types`]) or as
//! generic [`Resource`] values that mirror the server's JSON without
//! losing fields.
//!
//! ```no_run
//! use jira_client::{Auth, ClientOptions, Jira};
//!
//! # async fn example() -> jira_client::Result<()> {
//! let jira = Jira::with_auth(
//!     ClientOptions::new("https://company.atlassian.net"),
//!     Auth::basic("user@example.com", "api-token"),
//! )?;
//!
//! let issue = jira.issue("JRA-9").await?;
//! println!("{}: {}", issue.key, issue.summary());
//!
//! let page = jira.search_issues("project = JRA AND status = Open", 0, 50).await?;
//! for issue in &page.issues {
//!     println!("{}", issue);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Endpoints without a typed view remain reachable through
//! [`Jira::find`], the universal resource locator:
//!
//! ```no_run
//! # async fn example(jira: jira_client::Jira) -> jira_client::Result<()> {
//! let votes = jira.find("issue/{0}/votes", &["JRA-9"]).await?;
//! println!("{:?}", votes.u64_field("votes"));
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resource;
pub mod transport;
pub mod types;

pub use auth::Auth;
pub use client::Jira;
pub use config::ClientOptions;
pub use error::{Error, Result};
pub use resource::Resource;
