//! Marketplace plumbing for the promotion builder: API client, session
//! tokens, the promotions service and scripted wizard runs.

pub mod api;
pub mod config;
pub mod ids;
pub mod observability;
pub mod promotions;
pub mod script;
pub mod session;
