//! Data models for employees and their identity documents.

pub mod card_identity;
pub mod employee;

pub use card_identity::CardIdentity;
pub use employee::{CardIdentities, Employee};
