//! Per-table `impl Database` blocks.

mod auth_sessions;
mod notes;
