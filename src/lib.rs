//! CSV dashboard core: parse an upload, filter rows by `value > threshold`,
//! summarize the result and prepare chart series and downloads.
//!
//! The desktop app (`rusty-dash`) and the headless report
//! (`rusty-dash-report`) are thin presentation layers over [`data`].

pub mod config;
pub mod data;
