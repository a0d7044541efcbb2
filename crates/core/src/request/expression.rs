//! Typed expressions in the store's expression grammar.
//!
//! Each expression keeps its placeholders in structured form so callers
//! (and the in-memory store) can inspect it, and renders to the exact string
//! the store expects through `Display`. Serialization uses the rendered
//! string.

use std::fmt;

use serde::{Serialize, Serializer};

/// Placeholder standing in for an attribute name: `#name`.
pub fn name_placeholder(attribute: &str) -> String {
    format!("#{attribute}")
}

/// Placeholder standing in for an attribute value: `:name`.
pub fn value_placeholder(attribute: &str) -> String {
    format!(":{attribute}")
}

/// A `#name = :value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub value: String,
}

impl Binding {
    /// Binding for `attribute` using its derived placeholders.
    pub fn for_attribute(attribute: &str) -> Self {
        Self {
            name: name_placeholder(attribute),
            value: value_placeholder(attribute),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

/// Comma-separated list of name placeholders: `#a,#b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionExpression {
    names: Vec<String>,
}

impl ProjectionExpression {
    pub fn push(&mut self, attribute: &str) {
        self.names.push(name_placeholder(attribute));
    }

    /// Name placeholders in request order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl fmt::Display for ProjectionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(","))
    }
}

/// Equality conditions on key attributes joined with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCondition {
    clauses: Vec<Binding>,
}

impl KeyCondition {
    pub fn push(&mut self, attribute: &str) {
        self.clauses.push(Binding::for_attribute(attribute));
    }

    pub fn clauses(&self) -> &[Binding] {
        &self.clauses
    }
}

impl fmt::Display for KeyCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

/// `SET` assignments followed by `REMOVE` removals.
///
/// Empty clauses are left out of the rendered string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateExpression {
    assignments: Vec<Binding>,
    removals: Vec<String>,
}

impl UpdateExpression {
    pub fn assign(&mut self, attribute: &str) {
        self.assignments.push(Binding::for_attribute(attribute));
    }

    pub fn remove(&mut self, attribute: &str) {
        self.removals.push(name_placeholder(attribute));
    }

    pub fn assignments(&self) -> &[Binding] {
        &self.assignments
    }

    /// Name placeholders of the removed attributes.
    pub fn removals(&self) -> &[String] {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.removals.is_empty()
    }
}

impl fmt::Display for UpdateExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.assignments.is_empty() {
            let assignments: Vec<String> =
                self.assignments.iter().map(Binding::to_string).collect();
            write!(f, "SET {}", assignments.join(", "))?;
        }
        if !self.removals.is_empty() {
            if !self.assignments.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "REMOVE {}", self.removals.join(", "))?;
        }
        Ok(())
    }
}

macro_rules! serialize_as_string {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )*
    };
}

serialize_as_string!(ProjectionExpression, KeyCondition, UpdateExpression);
