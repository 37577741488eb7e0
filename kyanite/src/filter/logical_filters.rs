use std::{any::Any, fmt::Display};

use crate::{
    document::Document,
    errors::KyaniteResult,
};

use super::{Filter, FilterProvider};

/// A filter that combines multiple filters with logical AND semantics.
///
/// This filter evaluates to true only when all of its component filters match a document.
/// Evaluation short-circuits on the first non-matching component.
///
/// # Responsibilities
///
/// * **Conjunction**: Requires all component filters to match
/// * **Short-Circuit Evaluation**: Stops at the first failing component
pub(crate) struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    /// Creates a new AND filter over the given component filters.
    #[inline]
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut result = String::with_capacity(self.filters.len() * 16);
        result.push('(');
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                result.push_str(" && ");
            }
            result.push_str(&filter.to_string());
        }
        result.push(')');
        write!(f, "{}", result)
    }
}

impl FilterProvider for AndFilter {
    fn apply(&self, entry: &Document) -> KyaniteResult<bool> {
        for filter in &self.filters {
            if !filter.apply(entry)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn logical_filters(&self) -> KyaniteResult<Vec<Filter>> {
        Ok(self.filters.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that combines multiple filters with logical OR semantics.
///
/// This filter evaluates to true when any of its component filters matches a document.
/// Evaluation short-circuits on the first matching component.
///
/// # Responsibilities
///
/// * **Disjunction**: Requires at least one component filter to match
/// * **Short-Circuit Evaluation**: Stops at the first matching component
pub(crate) struct OrFilter {
    filters: Vec<Filter>,
}

impl OrFilter {
    /// Creates a new OR filter over the given component filters.
    #[inline]
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        OrFilter { filters }
    }
}

impl Display for OrFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut result = String::with_capacity(self.filters.len() * 16);
        result.push('(');
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                result.push_str(" || ");
            }
            result.push_str(&filter.to_string());
        }
        result.push(')');
        write!(f, "{}", result)
    }
}

impl FilterProvider for OrFilter {
    fn apply(&self, entry: &Document) -> KyaniteResult<bool> {
        for filter in &self.filters {
            if filter.apply(entry)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn logical_filters(&self) -> KyaniteResult<Vec<Filter>> {
        Ok(self.filters.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that negates the result of another filter.
///
/// This filter inverts the match result of its inner filter. A document matches the
/// NOT filter exactly when it does not match the inner filter.
pub(crate) struct NotFilter {
    filter: Filter,
}

impl NotFilter {
    /// Creates a new NOT filter wrapping the given filter.
    #[inline]
    pub(crate) fn new(filter: Filter) -> Self {
        NotFilter { filter }
    }
}

impl Display for NotFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(not {})", self.filter)
    }
}

impl FilterProvider for NotFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> KyaniteResult<bool> {
        Ok(!self.filter.apply(entry)?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
