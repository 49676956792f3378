// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{BTreeSet, HashSet};
use std::fmt::Debug;

use tracing::debug;

use crate::error::PolicyError;
use crate::role::Role;
use crate::rule::{Effect, Rule};
use crate::traits::PolicyFamily;

/// Immutable set of rules deciding who may do what to the entities of one family.
///
/// Tables are constructed through [`RuleTableBuilder`], which makes sure every kind of the
/// family is covered by at least one rule and that rule names are unique.
pub struct RuleTable<F: PolicyFamily> {
    rules: Vec<Rule<F>>,
}

impl<F: PolicyFamily> RuleTable<F> {
    pub fn builder() -> RuleTableBuilder<F> {
        RuleTableBuilder::default()
    }

    /// All rules, in the order they were declared.
    pub fn rules(&self) -> &[Rule<F>] {
        &self.rules
    }

    /// Look up a rule by its name.
    pub fn rule(&self, name: &str) -> Option<&Rule<F>> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    /// Rules applying to the given entity and active role.
    pub fn matching<'a>(
        &'a self,
        kind: F::Kind,
        relationship: &'a F::Relationship,
        role: Role,
    ) -> impl Iterator<Item = &'a Rule<F>> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.matches(kind, relationship, role))
    }

    /// Every input for which one rule grants an action another rule withholds.
    ///
    /// Such overlaps are resolved in favour of withholding the action. They are legal, but
    /// usually worth a closer look when changing a table.
    pub fn conflicts(&self) -> Vec<Conflict<F>> {
        let mut conflicts = Vec::new();

        for kind in F::kinds() {
            for relationship in F::relationships() {
                for role in Role::ALL {
                    let matching: Vec<&Rule<F>> =
                        self.matching(*kind, relationship, role).collect();

                    let actions_with = |effect: Effect| -> BTreeSet<F::Action> {
                        matching
                            .iter()
                            .filter(|rule| rule.effect() == effect)
                            .flat_map(|rule| rule.granted_actions().iter().copied())
                            .collect()
                    };

                    let granted = actions_with(Effect::Allow);
                    let withheld = actions_with(Effect::Deny);

                    for action in granted.intersection(&withheld) {
                        let names_with = |effect: Effect| -> Vec<&'static str> {
                            matching
                                .iter()
                                .filter(|rule| {
                                    rule.effect() == effect
                                        && rule.granted_actions().contains(action)
                                })
                                .map(|rule| rule.name())
                                .collect()
                        };

                        conflicts.push(Conflict {
                            kind: *kind,
                            relationship: *relationship,
                            role,
                            action: *action,
                            granted_by: names_with(Effect::Allow),
                            withheld_by: names_with(Effect::Deny),
                        });
                    }
                }
            }
        }

        conflicts
    }
}

impl<F: PolicyFamily> Debug for RuleTable<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTable")
            .field("family", &F::NAME)
            .field("rules", &self.rules)
            .finish()
    }
}

/// An action which is granted and withheld for the same input.
pub struct Conflict<F: PolicyFamily> {
    pub kind: F::Kind,
    pub relationship: F::Relationship,
    pub role: Role,
    pub action: F::Action,
    pub granted_by: Vec<&'static str>,
    pub withheld_by: Vec<&'static str>,
}

impl<F: PolicyFamily> Debug for Conflict<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conflict")
            .field("kind", &self.kind)
            .field("relationship", &self.relationship)
            .field("role", &self.role)
            .field("action", &self.action)
            .field("granted_by", &self.granted_by)
            .field("withheld_by", &self.withheld_by)
            .finish()
    }
}

/// Collects rules and validates them into a [`RuleTable`].
pub struct RuleTableBuilder<F: PolicyFamily> {
    rules: Vec<Rule<F>>,
}

impl<F: PolicyFamily> Default for RuleTableBuilder<F> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<F: PolicyFamily> RuleTableBuilder<F> {
    pub fn rule(mut self, rule: Rule<F>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn build(self) -> Result<RuleTable<F>, PolicyError> {
        let mut names = HashSet::new();
        for rule in &self.rules {
            if rule.granted_actions().is_empty() {
                return Err(PolicyError::EmptyRule(rule.name()));
            }

            if !names.insert(rule.name()) {
                return Err(PolicyError::DuplicateRule(rule.name()));
            }
        }

        for kind in F::kinds() {
            if !self.rules.iter().any(|rule| rule.kind() == *kind) {
                return Err(PolicyError::UncoveredEntityKind {
                    family: F::NAME,
                    kind: kind.to_string(),
                });
            }
        }

        let table = RuleTable { rules: self.rules };

        for conflict in table.conflicts() {
            debug!(
                family = F::NAME,
                kind = %conflict.kind,
                role = %conflict.role,
                action = %conflict.action,
                granted_by = ?conflict.granted_by,
                withheld_by = ?conflict.withheld_by,
                "rules overlap, action is withheld"
            );
        }

        debug!(
            family = F::NAME,
            rules = table.rules.len(),
            "built policy rule table"
        );

        Ok(table)
    }
}
