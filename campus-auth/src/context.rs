// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Debug;

use crate::error::PolicyError;
use crate::traits::PolicyFamily;

/// Describes the entity a policy is evaluated against and how the actor relates to it.
///
/// Contexts are plain data. Callers look up facts like creator status from their own data
/// before describing the entity, nothing here performs I/O.
pub struct Context<F: PolicyFamily> {
    kind: F::Kind,
    relationship: F::Relationship,
}

impl<F: PolicyFamily> Context<F> {
    pub fn describe(kind: F::Kind, relationship: F::Relationship) -> Self {
        Self { kind, relationship }
    }

    /// Describe an entity whose kind is only known by name.
    ///
    /// Kinds of a family are closed, an unknown name is rejected here instead of silently
    /// yielding no permissions later on.
    pub fn parse(kind: &str, relationship: F::Relationship) -> Result<Self, PolicyError> {
        let kind = kind
            .parse::<F::Kind>()
            .map_err(|_| PolicyError::UnknownEntityKind {
                family: F::NAME,
                value: kind.to_string(),
            })?;
        Ok(Self::describe(kind, relationship))
    }

    pub fn kind(&self) -> F::Kind {
        self.kind
    }

    pub fn relationship(&self) -> F::Relationship {
        self.relationship
    }
}

// Derives would require the family marker type itself to implement these traits.
impl<F: PolicyFamily> Clone for Context<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: PolicyFamily> Copy for Context<F> {}

impl<F: PolicyFamily> Debug for Context<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("family", &F::NAME)
            .field("kind", &self.kind)
            .field("relationship", &self.relationship)
            .finish()
    }
}

impl<F: PolicyFamily> PartialEq for Context<F> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.relationship == other.relationship
    }
}

impl<F: PolicyFamily> Eq for Context<F> {}
