//! Article discovery and extraction.
//!
//! One generic pipeline serves every site in the registry:
//!
//! | Stage | Module | Role |
//! |-------|--------|------|
//! | Classify | [`classify`] | Decide whether a link looks like an article URL |
//! | Fetch | [`fetch`] | GET a page with a fixed User-Agent and timeout |
//! | Extract | [`extract`] | Pull title, body and date out of the HTML |
//! | Collect | [`collect`] | Drive category and pagination sweeps to a per-site target |
//!
//! # Common Patterns
//!
//! - Network access goes through the [`fetch::Fetch`] trait so the loop can
//!   run against canned pages in tests
//! - Failed fetches and rejected pages are typed values, logged and skipped
//! - Sites are crawled one at a time, one request at a time

pub mod classify;
pub mod collect;
pub mod extract;
pub mod fetch;
