// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::role::Role;

/// A signed-in actor together with its role assignments.
///
/// An actor can hold several roles, for example a teacher who is also the parent of a student.
/// Exactly one of them governs permissions at a time: the active role. Which role is active is
/// decided outside of this crate (usually by the session) and recorded with [`Actor::select`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Actor<ID> {
    id: ID,
    roles: BTreeSet<Role>,
    selected: Option<Role>,
}

impl<ID> Actor<ID> {
    /// Actor without any role assignments.
    pub fn new(id: ID) -> Self {
        Self {
            id,
            roles: BTreeSet::new(),
            selected: None,
        }
    }

    /// Assign a role to this actor.
    pub fn with_role(mut self, role: Role) -> Self {
        self.assign(role);
        self
    }

    pub fn id(&self) -> &ID {
        &self.id
    }

    /// All roles assigned to this actor.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Return `true` if the actor has been assigned the given role.
    pub fn holds(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Assign a role to this actor. Assigning a role twice has no effect.
    pub fn assign(&mut self, role: Role) {
        self.roles.insert(role);
    }

    /// Remove a role assignment. Clears the selection if it was the active role.
    pub fn revoke(&mut self, role: Role) {
        self.roles.remove(&role);
        if self.selected == Some(role) {
            self.selected = None;
        }
    }

    /// Select the active role.
    ///
    /// Fails if the actor was not assigned the role, the previous selection is kept in that case.
    pub fn select(&mut self, role: Role) -> Result<(), PolicyError> {
        if !self.holds(role) {
            return Err(PolicyError::RoleNotAssigned(role));
        }
        self.selected = Some(role);
        Ok(())
    }

    /// The role currently governing this actor's permissions.
    ///
    /// This is the selected role while it is still assigned, or the only assigned role when
    /// nothing valid was selected. Actors without roles, or with several roles and no valid
    /// selection, have no active role.
    pub fn active_role(&self) -> Option<Role> {
        if let Some(role) = self.selected.filter(|role| self.holds(*role)) {
            return Some(role);
        }

        let mut roles = self.roles.iter();
        match (roles.next(), roles.next()) {
            (Some(role), None) => Some(*role),
            _ => None,
        }
    }
}

/// Active role of an optional actor, `None` when nobody is signed in.
pub fn active_role<ID>(actor: Option<&Actor<ID>>) -> Option<Role> {
    actor.and_then(Actor::active_role)
}

#[cfg(test)]
mod tests {
    use crate::{PolicyError, Role};

    use super::{Actor, active_role};

    #[test]
    fn actor_without_roles_has_no_active_role() {
        let alice = Actor::new('A');
        assert_eq!(alice.active_role(), None);
        assert_eq!(active_role::<char>(None), None);
    }

    #[test]
    fn single_role_is_active_by_default() {
        let alice = Actor::new('A').with_role(Role::Student);
        assert_eq!(alice.active_role(), Some(Role::Student));
        assert_eq!(active_role(Some(&alice)), Some(Role::Student));
    }

    #[test]
    fn several_roles_require_a_selection() {
        let mut bob = Actor::new('B')
            .with_role(Role::Teacher)
            .with_role(Role::Parent);
        assert_eq!(bob.active_role(), None);

        bob.select(Role::Parent).unwrap();
        assert_eq!(bob.active_role(), Some(Role::Parent));

        bob.select(Role::Teacher).unwrap();
        assert_eq!(bob.active_role(), Some(Role::Teacher));
    }

    #[test]
    fn selecting_unassigned_role_fails() {
        let mut bob = Actor::new('B').with_role(Role::Teacher);
        bob.assign(Role::Parent);
        bob.select(Role::Parent).unwrap();

        assert_eq!(
            bob.select(Role::SuperAdmin),
            Err(PolicyError::RoleNotAssigned(Role::SuperAdmin))
        );

        // Previous selection is kept.
        assert_eq!(bob.active_role(), Some(Role::Parent));
    }

    #[test]
    fn revoking_active_role_clears_selection() {
        let mut claire = Actor::new('C')
            .with_role(Role::Principal)
            .with_role(Role::Teacher)
            .with_role(Role::Parent);
        claire.select(Role::Principal).unwrap();

        claire.revoke(Role::Principal);
        assert!(!claire.holds(Role::Principal));
        assert_eq!(claire.active_role(), None);

        // Falls back to the single remaining role.
        claire.revoke(Role::Parent);
        assert_eq!(claire.active_role(), Some(Role::Teacher));
        assert_eq!(claire.roles().collect::<Vec<_>>(), vec![Role::Teacher]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let mut actor = Actor::new("ada".to_string())
            .with_role(Role::Teacher)
            .with_role(Role::Parent);
        actor.select(Role::Parent).unwrap();

        let json = serde_json::to_string(&actor).unwrap();
        let decoded: Actor<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, actor);
        assert_eq!(decoded.active_role(), Some(Role::Parent));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn stored_selection_of_unassigned_role_is_ignored() {
        let eve: Actor<String> = serde_json::from_str(
            r#"{"id":"eve","roles":["student"],"selected":"super_admin"}"#,
        )
        .unwrap();

        assert!(!eve.holds(Role::SuperAdmin));
        assert_eq!(eve.active_role(), Some(Role::Student));

        let role = eve.active_role();
        assert_eq!(
            crate::chat::evaluate(
                crate::chat::ChatKind::Group,
                crate::chat::ChatRelationship::CREATOR,
                role
            ),
            crate::chat::evaluate(
                crate::chat::ChatKind::Group,
                crate::chat::ChatRelationship::CREATOR,
                Some(Role::Student)
            )
        );

        // Several roles and an unassigned selection: nothing is active.
        let mallory: Actor<String> = serde_json::from_str(
            r#"{"id":"mallory","roles":["student","parent"],"selected":"school_admin"}"#,
        )
        .unwrap();
        assert_eq!(mallory.active_role(), None);
    }

    #[test]
    fn assigning_twice_is_idempotent() {
        let mut dan = Actor::new('D');
        dan.assign(Role::Student);
        dan.assign(Role::Student);
        assert_eq!(dan.roles().count(), 1);
        assert_eq!(*dan.id(), 'D');
    }
}
