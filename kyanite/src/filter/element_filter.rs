use std::{any::Any, fmt::Display, sync::OnceLock};

use crate::{
    common::ELEMENT_FIELD,
    document::Document,
    errors::{ErrorKind, KyaniteError, KyaniteResult},
    Value,
};

use super::{Filter, FilterProvider};

/// A filter that matches elements within arrays.
///
/// This filter evaluates a condition against each element in an array field and matches
/// documents where at least one element satisfies the condition. Elements can be documents
/// or scalar values (matched using a special `$` field name). Applying the filter to a
/// field that is missing or not an array simply fails to match instead of raising an error,
/// so a query never aborts because of a shape mismatch in the data.
///
/// # Responsibilities
///
/// * **Array Element Matching**: Evaluates filters against array elements
/// * **Document Handling**: Applies filters to document elements
/// * **Scalar Matching**: Matches scalar values using synthetic documents with `$` field
/// * **Short-Circuit Evaluation**: Returns true on first matching element
pub(crate) struct ElementMatchFilter {
    field_name: OnceLock<String>,
    filter: Filter,
}

impl ElementMatchFilter {
    /// Creates a new element match filter for the specified array field and condition.
    ///
    /// The filter evaluates the provided condition against each element in the array field.
    /// For document elements, the condition is applied directly. For scalar elements,
    /// they are wrapped in a synthetic document with field name `$`.
    ///
    /// # Arguments
    ///
    /// * `field_name` - The name of the array field to filter
    /// * `filter` - The filter condition to evaluate against array elements
    ///
    /// # Returns
    ///
    /// A new `ElementMatchFilter` that matches arrays containing at least one matching element
    #[inline]
    pub(crate) fn new(field_name: String, filter: Filter) -> Self {
        let name = OnceLock::new();
        let _ = name.set(field_name);

        ElementMatchFilter {
            field_name: name,
            filter,
        }
    }

    fn matches(&self, value: Vec<Value>) -> KyaniteResult<bool> {
        for v in value {
            if self.match_element(&v)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn match_element(&self, value: &Value) -> KyaniteResult<bool> {
        match value {
            Value::Document(doc) => self.filter.apply(doc),
            _ => {
                let mut doc = Document::new();
                doc.put(ELEMENT_FIELD, value.clone())?;
                self.filter.apply(&doc)
            }
        }
    }
}

impl Display for ElementMatchFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(elemMatch {})", self.filter)
    }
}

impl FilterProvider for ElementMatchFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> KyaniteResult<bool> {
        let field_name = self.field_name.get()
            .ok_or_else(|| KyaniteError::new("Field name not initialized", ErrorKind::InvalidOperation))?;
        let value = entry.get(field_name)?;
        if value.is_null() {
            return Ok(false);
        }

        if let Value::Array(array) = value {
            return self.matches(array);
        }

        log::debug!(
            "ElementMatchFilter applied on non-array field value {}, no match",
            value
        );
        Ok(false)
    }

    fn has_field(&self) -> bool {
        true
    }

    fn get_field_name(&self) -> KyaniteResult<String> {
        self.field_name.get()
            .cloned()
            .ok_or_else(|| KyaniteError::new("Field name not initialized", ErrorKind::InvalidOperation))
    }

    fn set_field_name(&self, field_name: String) -> KyaniteResult<()> {
        self.field_name.get_or_init(|| field_name);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
