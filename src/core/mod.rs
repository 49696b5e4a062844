//! Core business logic - framework-agnostic catalog, sale and report operations.
//!
//! Every function takes the database handle explicitly; nothing here knows
//! about HTTP.

/// Catalog queries, seeding and the admin correction
pub mod dish;
/// Per-team aggregation of the sales ledger
pub mod report;
/// Sale registration and reset
pub mod sale;
