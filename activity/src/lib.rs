//! Hive account activity aggregation.
//!
//! Drains Hive Engine token history into CSV, summarizes Hive notifications into a
//! console table, and plans the revocation of outgoing vesting delegations.

pub mod config;
pub mod error;
pub mod hive;
pub mod history;
pub mod notification;
pub mod output;
