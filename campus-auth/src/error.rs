// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

use crate::role::Role;

/// Errors which can occur when parsing policy inputs or constructing rule tables.
///
/// Evaluating a policy never fails. Missing or unknown roles lead to an empty permitted-action
/// set instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown {family} entity kind: {value}")]
    UnknownEntityKind { family: &'static str, value: String },

    #[error("actor does not hold the role {0}")]
    RoleNotAssigned(Role),

    #[error("rule {0} is declared more than once")]
    DuplicateRule(&'static str),

    #[error("rule {0} does not name any actions")]
    EmptyRule(&'static str),

    #[error("no {family} rule covers entity kind {kind}")]
    UncoveredEntityKind { family: &'static str, kind: String },
}
