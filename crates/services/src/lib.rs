//! uniboard/crates/services/src/lib.rs
//!
//! Application services over the domain ports: the review ledger, the
//! review workflow state machine, access-level management, and notice
//! dispatch.

pub mod access;
pub mod ledger;
pub mod notify;
pub mod review;

pub use access::AccessService;
pub use ledger::ReviewLedger;
pub use review::{Accepted, NextReview, Rejected, ReviewWorkflow};
