// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::{Debug, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::predicate::RolePredicate;
use crate::role::Role;
use crate::traits::PolicyFamily;

/// Whether a matching rule grants or withholds its actions.
///
/// Withholding always wins: an action named by any matching `Deny` rule is not permitted, no
/// matter how many `Allow` rules grant it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Effect {
    Allow,
    Deny,
}

impl Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Effect::Allow => "allow",
            Effect::Deny => "deny",
        };

        write!(f, "{}", s)
    }
}

/// Condition on the actor's relationship to an entity.
#[derive(Clone, Copy, Debug)]
pub enum RelationshipPredicate<R> {
    /// Any relationship.
    Any,

    /// Exactly this relationship.
    Is(R),

    /// Relationships satisfying the given check, for example "actor created the entity".
    Where(fn(&R) -> bool),
}

impl<R: PartialEq> RelationshipPredicate<R> {
    pub fn matches(&self, relationship: &R) -> bool {
        match self {
            RelationshipPredicate::Any => true,
            RelationshipPredicate::Is(expected) => expected == relationship,
            RelationshipPredicate::Where(check) => check(relationship),
        }
    }
}

/// A single named policy rule.
///
/// A rule applies to one entity kind. It matches when the actor's relationship and active role
/// satisfy its predicates, and then grants or withholds its actions.
pub struct Rule<F: PolicyFamily> {
    name: &'static str,
    effect: Effect,
    kind: F::Kind,
    relationship: RelationshipPredicate<F::Relationship>,
    role: RolePredicate,
    actions: Vec<F::Action>,
}

impl<F: PolicyFamily> Rule<F> {
    fn new(name: &'static str, effect: Effect, kind: F::Kind) -> Self {
        Self {
            name,
            effect,
            kind,
            relationship: RelationshipPredicate::Any,
            role: RolePredicate::Any,
            actions: Vec::new(),
        }
    }

    /// Rule granting actions on entities of the given kind.
    pub fn allow(name: &'static str, kind: F::Kind) -> Self {
        Self::new(name, Effect::Allow, kind)
    }

    /// Rule withholding actions on entities of the given kind.
    pub fn deny(name: &'static str, kind: F::Kind) -> Self {
        Self::new(name, Effect::Deny, kind)
    }

    /// Only match relationships passing the given check.
    pub fn when(mut self, check: fn(&F::Relationship) -> bool) -> Self {
        self.relationship = RelationshipPredicate::Where(check);
        self
    }

    /// Only match exactly the given relationship.
    pub fn when_is(mut self, relationship: F::Relationship) -> Self {
        self.relationship = RelationshipPredicate::Is(relationship);
        self
    }

    /// Only match active roles satisfying the given predicate.
    pub fn for_roles(mut self, role: RolePredicate) -> Self {
        self.role = role;
        self
    }

    /// Actions granted or withheld by this rule.
    pub fn actions(mut self, actions: impl IntoIterator<Item = F::Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn kind(&self) -> F::Kind {
        self.kind
    }

    pub fn role(&self) -> RolePredicate {
        self.role
    }

    pub fn granted_actions(&self) -> &[F::Action] {
        &self.actions
    }

    /// Return `true` if this rule applies to the given entity and active role.
    pub fn matches(&self, kind: F::Kind, relationship: &F::Relationship, role: Role) -> bool {
        self.kind == kind && self.relationship.matches(relationship) && self.role.matches(role)
    }
}

impl<F: PolicyFamily> Clone for Rule<F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            effect: self.effect,
            kind: self.kind,
            relationship: self.relationship,
            role: self.role,
            actions: self.actions.clone(),
        }
    }
}

impl<F: PolicyFamily> Debug for Rule<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("effect", &self.effect)
            .field("kind", &self.kind)
            .field("relationship", &self.relationship)
            .field("role", &self.role)
            .field("actions", &self.actions)
            .finish()
    }
}

impl<F: PolicyFamily> Display for Rule<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let actions: Vec<String> = self.actions.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{}: {} [{}] on {} for {}",
            self.name,
            self.effect,
            actions.join(", "),
            self.kind,
            self.role
        )
    }
}
