// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role and ownership based authorization for multi-role school applications.
//!
//! Given the active role of a signed-in actor and a description of a target entity, the policy
//! decides which actions the actor may perform. Consumers render or allow only those actions
//! and never re-derive them from roles or entity data on their own.
//!
//! Entities are grouped into families ([`chat`], [`homework`]) which each own one immutable
//! [`RuleTable`]. Rules are named, match on entity kind, relationship and role, and either grant
//! or withhold actions. Anything not granted is denied, withholding wins over granting, and an
//! actor without an active role is permitted nothing.
//!
//! ```
//! use campus_auth::Role;
//! use campus_auth::chat::{self, ChatAction, ChatKind, ChatRelationship};
//!
//! let actions = chat::evaluate(ChatKind::Group, ChatRelationship::CREATOR, Some(Role::Teacher));
//! assert!(actions.contains(&ChatAction::Edit));
//!
//! let actions = chat::evaluate(ChatKind::Group, ChatRelationship::CREATOR, None);
//! assert!(actions.is_empty());
//! ```
mod action;
mod actor;
pub mod chat;
mod context;
mod error;
mod evaluator;
pub mod homework;
pub mod predicate;
mod role;
mod rule;
mod table;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
pub mod traits;

pub use action::ActionSet;
pub use actor::{Actor, active_role};
pub use context::Context;
pub use error::PolicyError;
pub use evaluator::{Decision, Evaluator};
pub use predicate::RolePredicate;
pub use role::Role;
pub use rule::{Effect, RelationshipPredicate, Rule};
pub use table::{Conflict, RuleTable, RuleTableBuilder};
