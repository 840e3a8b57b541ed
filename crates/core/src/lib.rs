//! Domain types, errors, and validation rules shared by the Stagehand crates.
//!
//! Nothing in here touches the database or HTTP; the rule modules are pure
//! functions returning [`error::CoreError::Validation`] on failure.

pub mod crew_member;
pub mod error;
pub mod production;
pub mod text;
pub mod types;
pub mod user;
