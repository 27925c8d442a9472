//! Gitlith - Terminal dashboard for a single git repository
//!
//! This library provides the file tree, status lists, key dispatch and the
//! asynchronous git operations behind the `gitlith` binary.

pub mod app;
pub mod config;
pub mod file_tree;
pub mod git;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod sync;
pub mod tui;
