// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Debug;

use tracing::trace;

use crate::action::ActionSet;
use crate::context::Context;
use crate::role::Role;
use crate::rule::Effect;
use crate::table::RuleTable;
use crate::traits::PolicyFamily;

/// Decides which actions an actor may perform on an entity.
///
/// Evaluation is a pure function of the context, the active role and the rule table: it
/// performs no I/O, holds no mutable state and can be called on every render or request.
///
/// All rules matching the entity kind, relationship and role are collected. Actions granted by
/// matching `Allow` rules are permitted unless a matching `Deny` rule withholds them. Anything
/// not granted is not permitted, and an actor without an active role is permitted nothing.
pub struct Evaluator<'a, F: PolicyFamily> {
    table: &'a RuleTable<F>,
}

impl<'a, F: PolicyFamily> Evaluator<'a, F> {
    pub fn new(table: &'a RuleTable<F>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a RuleTable<F> {
        self.table
    }

    /// Set of actions permitted to an actor with the given active role.
    pub fn evaluate(&self, context: &Context<F>, role: Option<Role>) -> ActionSet<F::Action> {
        self.decide(context, role).into_permitted()
    }

    /// Return `true` if the given action is permitted.
    pub fn is_permitted(
        &self,
        context: &Context<F>,
        role: Option<Role>,
        action: F::Action,
    ) -> bool {
        self.evaluate(context, role).contains(&action)
    }

    /// Evaluate and keep track of the rules which took part in the decision.
    pub fn decide(&self, context: &Context<F>, role: Option<Role>) -> Decision<F> {
        let Some(role) = role else {
            trace!(
                family = F::NAME,
                kind = %context.kind(),
                "no active role, nothing is permitted"
            );
            return Decision::default();
        };

        let relationship = context.relationship();
        let mut decision = Decision::default();
        let mut withheld = Vec::new();

        for rule in self.table.matching(context.kind(), &relationship, role) {
            match rule.effect() {
                Effect::Allow => {
                    decision.granted_by.push(rule.name());
                    for action in rule.granted_actions() {
                        decision.permitted.insert(*action);
                    }
                }
                Effect::Deny => {
                    decision.withheld_by.push(rule.name());
                    withheld.extend(rule.granted_actions().iter().copied());
                }
            }
        }

        for action in &withheld {
            decision.permitted.remove(action);
        }

        trace!(
            family = F::NAME,
            kind = %context.kind(),
            relationship = ?relationship,
            %role,
            permitted = %decision.permitted,
            "evaluated policy"
        );

        decision
    }
}

impl<F: PolicyFamily> Clone for Evaluator<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: PolicyFamily> Copy for Evaluator<'_, F> {}

impl<F: PolicyFamily> Debug for Evaluator<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("family", &F::NAME)
            .field("rules", &self.table.rules().len())
            .finish()
    }
}

/// Outcome of a policy evaluation together with the rules involved.
pub struct Decision<F: PolicyFamily> {
    permitted: ActionSet<F::Action>,
    granted_by: Vec<&'static str>,
    withheld_by: Vec<&'static str>,
}

impl<F: PolicyFamily> Decision<F> {
    pub fn permitted(&self) -> &ActionSet<F::Action> {
        &self.permitted
    }

    pub fn into_permitted(self) -> ActionSet<F::Action> {
        self.permitted
    }

    /// Names of the matching rules which granted actions.
    pub fn granted_by(&self) -> &[&'static str] {
        &self.granted_by
    }

    /// Names of the matching rules which withheld actions.
    pub fn withheld_by(&self) -> &[&'static str] {
        &self.withheld_by
    }
}

impl<F: PolicyFamily> Default for Decision<F> {
    fn default() -> Self {
        Self {
            permitted: ActionSet::empty(),
            granted_by: Vec::new(),
            withheld_by: Vec::new(),
        }
    }
}

impl<F: PolicyFamily> Debug for Decision<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decision")
            .field("permitted", &self.permitted)
            .field("granted_by", &self.granted_by)
            .field("withheld_by", &self.withheld_by)
            .finish()
    }
}
