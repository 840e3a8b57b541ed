//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod crew_member_repo;
pub mod production_repo;
pub mod user_repo;

pub use crew_member_repo::CrewMemberRepo;
pub use production_repo::ProductionRepo;
pub use user_repo::UserRepo;

/// SQL expression producing the current UTC time in RFC 3339 form, matching
/// the column defaults in the migrations.
pub(crate) const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";
