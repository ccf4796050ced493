//! Project membership as supplied by the caller.

pub mod member;

pub use member::{ProjectMember, ProjectMembership};
