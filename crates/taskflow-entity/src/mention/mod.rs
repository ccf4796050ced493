//! Chat mentions.

pub mod model;

pub use model::Mention;
