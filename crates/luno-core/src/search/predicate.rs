//! Search predicate as data, for evaluation inside the database.

use super::{SearchField, SearchQuery};

/// Condition applied to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Case-insensitive substring containment; the needle is already folded
    ContainsIgnoreCase(String),
}

/// One `field <condition>` pair of the disjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pub field: SearchField,
    pub condition: Condition,
}

/// A disjunction of [`SearchTerm`]s.
///
/// Rendered to SQL with one positional parameter per term, so user text is
/// always bound and never spliced into the statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPredicate {
    terms: Vec<SearchTerm>,
}

impl SearchPredicate {
    /// `query` contained in any of [`SearchField::ALL`].
    pub fn any_field_contains(query: &SearchQuery) -> Self {
        Self {
            terms: SearchField::ALL
                .into_iter()
                .map(|field| SearchTerm {
                    field,
                    condition: Condition::ContainsIgnoreCase(query.as_str().to_string()),
                })
                .collect(),
        }
    }

    #[cfg(test)]
    pub fn terms(&self) -> &[SearchTerm] {
        &self.terms
    }

    /// SQL boolean expression and its positional parameters.
    ///
    /// An empty disjunction is false. A `NULL` column (no category) makes its
    /// term unknown, which never satisfies the OR on its own.
    pub fn to_sql(&self) -> (String, Vec<String>) {
        if self.terms.is_empty() {
            return ("0".to_string(), Vec::new());
        }

        let mut params = Vec::with_capacity(self.terms.len());
        let clauses = self
            .terms
            .iter()
            .map(|term| match &term.condition {
                Condition::ContainsIgnoreCase(needle) => {
                    params.push(needle.clone());
                    format!("instr({}, ?) > 0", term.field.column())
                }
            })
            .collect::<Vec<_>>();

        (format!("({})", clauses.join(" OR ")), params)
    }
}
