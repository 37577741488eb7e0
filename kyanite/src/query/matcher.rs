use crate::{
    common::{ELEMENT_FIELD, ELEM_MATCH},
    document::Document,
    errors::KyaniteResult,
    filter::{Filter, FilterProvider},
    Value,
};

use super::compile;

/// Tests a single field value against a matcher.
///
/// A matcher is either a literal value or an `$elemMatch` operator object. A literal
/// matcher compares by deep structural equality: scalars by value, arrays element by
/// element in order, and documents by their full field maps. An `$elemMatch` matcher
/// carries a subquery and matches when the value is an array with at least one element
/// satisfying that subquery; applied to anything that is not an array it simply does
/// not match.
///
/// Operator objects with no recognized operator key fall back to literal deep-equality
/// comparison rather than raising an error.
///
/// # Arguments
///
/// * `value` - The field value to test
/// * `matcher` - The literal or operator object to test against
///
/// # Returns
///
/// `true` if the value satisfies the matcher
///
/// # Examples
///
/// ```rust,ignore
/// use kyanite::{common::Value, doc, query::value_matches};
///
/// let matched = value_matches(&Value::I32(30), &Value::I32(30))?;
/// assert!(matched);
///
/// let elements = Value::Array(vec![Value::Document(doc! { a: 30 })]);
/// let matcher = Value::Document(doc! { "$elemMatch": { a: 30 } });
/// assert!(value_matches(&elements, &matcher)?);
/// ```
pub fn value_matches(value: &Value, matcher: &Value) -> KyaniteResult<bool> {
    if let Some(subquery) = elem_match_subquery(matcher) {
        let filter = compile(&subquery)?;
        if let Value::Array(elements) = value {
            for element in elements {
                if apply_to_element(element, &filter)? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }

        log::debug!(
            "elemMatch matcher applied on non-array value {}, no match",
            value
        );
        return Ok(false);
    }

    Ok(value == matcher)
}

/// Extracts the subquery of an `$elemMatch` operator object.
///
/// A matcher counts as an `$elemMatch` operator object only when it is a document with
/// exactly one field, that field is named `$elemMatch`, and its operand is itself a
/// document. Every other shape is a literal matcher and yields `None`.
pub(crate) fn elem_match_subquery(matcher: &Value) -> Option<Document> {
    let matcher_doc = matcher.as_document()?;
    let mut entries = matcher_doc.iter();
    let (name, operand) = entries.next()?;
    if entries.next().is_some() || name.as_str() != ELEM_MATCH {
        return None;
    }
    match operand {
        Value::Document(subquery) => Some(subquery),
        _ => None,
    }
}

/// Applies a compiled filter to a single array element.
///
/// Document elements are matched directly. Scalar elements are wrapped in a synthetic
/// single-field document under the `$` field name so field-addressed filters can reach
/// them.
pub(crate) fn apply_to_element(element: &Value, filter: &Filter) -> KyaniteResult<bool> {
    match element {
        Value::Document(doc) => filter.apply(doc),
        _ => {
            let mut doc = Document::new();
            doc.put(ELEMENT_FIELD, element.clone())?;
            filter.apply(&doc)
        }
    }
}
