//! Command implementations for the CLI.

/// A full sweep of the input tree: classify, copy or convert, summarize.
pub mod run;
