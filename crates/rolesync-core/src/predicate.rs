//! Inclusion predicate
//!
//! Decides which roles are in scope for a sync run from an ordered list of
//! include rules. Pure and side-effect free; a predicate is built once at
//! startup (invalid patterns are fatal there) and then queried repeatedly.

use regex::{Regex, RegexBuilder};

use rolesync_store::RoleIdentity;

use crate::settings::IncludeRule;
use crate::{Error, Result};

/// Outcome of evaluating a role against the rule set.
///
/// A non-empty justification marks a more informative exclusion reason
/// that should be surfaced to the caller over a generic failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateResult {
    included: bool,
    justification: Option<String>,
}

impl PredicateResult {
    /// The role is in scope.
    pub fn included() -> Self {
        Self {
            included: true,
            justification: None,
        }
    }

    /// The role is out of scope, with no specific reason.
    pub fn excluded() -> Self {
        Self {
            included: false,
            justification: None,
        }
    }

    /// The role is out of scope for a reportable reason.
    pub fn excluded_because(justification: impl Into<String>) -> Self {
        Self {
            included: false,
            justification: Some(justification.into()),
        }
    }

    /// Whether the role is in scope.
    pub fn is_included(&self) -> bool {
        self.included
    }

    /// The exclusion reason, when one was recorded.
    pub fn justification(&self) -> Option<&str> {
        self.justification.as_deref()
    }
}

/// Scope decision for role identities.
pub trait RolePredicate: Send + Sync {
    /// Decide whether `role` is in scope for synchronization.
    fn includes(&self, role: &RoleIdentity) -> PredicateResult;
}

/// One compiled include rule.
#[derive(Debug)]
struct CompiledRule {
    /// Lowercase domain constraint, if any
    domain: Option<String>,
    /// Anchored, case-insensitive name constraint, if any
    pattern: Option<Regex>,
    /// Pattern as written, for justifications
    pattern_text: Option<String>,
}

/// Predicate driven by the ordered `[[include]]` rules of [`crate::SyncSettings`].
///
/// Rules have OR semantics: the first rule that includes a role wins
/// immediately. When no rule matches, the last evaluated failure is
/// returned, preferring the last one that carries a justification.
#[derive(Debug)]
pub struct ConfigRolePredicate {
    entries: Vec<CompiledRule>,
}

impl ConfigRolePredicate {
    /// Compile an ordered rule list into a predicate.
    ///
    /// Blank constraints are treated as absent. An empty rule list
    /// includes every role.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for an unparsable pattern.
    pub fn new(rules: &[IncludeRule]) -> Result<Self> {
        let entries = rules.iter().map(Self::compile).collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    fn compile(rule: &IncludeRule) -> Result<CompiledRule> {
        let domain = rule
            .domain
            .as_deref()
            .filter(|domain| !domain.trim().is_empty())
            .map(str::to_lowercase);

        let pattern_text = rule
            .pattern
            .as_deref()
            .filter(|pattern| !pattern.trim().is_empty())
            .map(str::to_string);

        let pattern = pattern_text
            .as_deref()
            .map(|pattern| {
                // Anchor so the name portion must match in full
                RegexBuilder::new(&format!("^(?:{pattern})$"))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| Error::InvalidPattern {
                        pattern: pattern.to_string(),
                        source: Box::new(source),
                    })
            })
            .transpose()?;

        Ok(CompiledRule {
            domain,
            pattern,
            pattern_text,
        })
    }

    /// Evaluate a single rule against a role.
    fn evaluate(entry: &CompiledRule, role: &RoleIdentity) -> PredicateResult {
        if let Some(domain) = &entry.domain
            && role.domain().to_lowercase() != *domain
        {
            return PredicateResult::excluded();
        }

        if let Some(pattern) = &entry.pattern
            && !pattern.is_match(role.name())
        {
            return PredicateResult::excluded_because(format!(
                "Role name '{}' does not match pattern '{}'",
                role.name(),
                entry.pattern_text.as_deref().unwrap_or_default(),
            ));
        }

        PredicateResult::included()
    }
}

impl RolePredicate for ConfigRolePredicate {
    fn includes(&self, role: &RoleIdentity) -> PredicateResult {
        // No rules configured = include everything
        if self.entries.is_empty() {
            return PredicateResult::included();
        }

        let mut result = PredicateResult::included();
        let mut priority_result: Option<PredicateResult> = None;

        for entry in &self.entries {
            result = Self::evaluate(entry, role);

            if result.is_included() {
                // Definitely included if any rule includes it
                return result;
            }
            if result.justification().is_some() {
                priority_result = Some(result.clone());
            }
        }

        // Return the last justified failure, or the last failure outright
        priority_result.unwrap_or(result)
    }
}
