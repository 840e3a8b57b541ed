pub mod auth;
pub mod crew_member;
pub mod production;
