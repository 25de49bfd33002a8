//! Domain types and rules shared by the database, mail, and API crates.
//!
//! Nothing in here touches I/O: closed enumerations, slug and field
//! validation, the submission status state machine, analytics consent state,
//! and shared-secret comparison.

pub mod consent;
pub mod contact;
pub mod content;
pub mod error;
pub mod pagination;
pub mod secret;
pub mod slug;
pub mod types;
pub mod validation;
