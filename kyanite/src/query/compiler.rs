use crate::{
    document::Document,
    errors::KyaniteResult,
    filter::{all, and, ElementMatchFilter, EqualsFilter, Filter},
};

use super::elem_match_subquery;

/// Compiles a query specification into a document predicate.
///
/// Every `(field, matcher)` entry of the specification becomes one condition: a literal
/// matcher becomes a deep-equality condition on that field, and an `$elemMatch` operator
/// object becomes an array element condition built from its compiled subquery. The
/// resulting filter matches a document only when every condition holds, and an empty
/// specification compiles to a filter that matches every document.
///
/// A field that is missing from a candidate document reads as [Value::Null](crate::common::Value::Null)
/// during evaluation, so `{field: null}` matches documents without that field.
///
/// Compilation is pure; the same specification can be compiled repeatedly and the
/// compiled filter applied to any number of documents.
///
/// # Arguments
///
/// * `query_spec` - A document mapping field names to matchers
///
/// # Returns
///
/// A `Filter` that evaluates the conjunction of all field conditions
///
/// # Examples
///
/// ```rust,ignore
/// use kyanite::{doc, query::compile};
///
/// let filter = compile(&doc! { x: 10, tags: { "$elemMatch": { "$": "new" } } })?;
/// let matched = filter.apply(&candidate)?;
/// ```
pub fn compile(query_spec: &Document) -> KyaniteResult<Filter> {
    let mut conditions = Vec::with_capacity(query_spec.size());

    for (field_name, matcher) in query_spec.iter() {
        let condition = match elem_match_subquery(&matcher) {
            Some(subquery) => {
                let element_filter = compile(&subquery)?;
                Filter::new(ElementMatchFilter::new(field_name.clone(), element_filter))
            }
            None => Filter::new(EqualsFilter::new(field_name.clone(), matcher.clone())),
        };
        conditions.push(condition);
    }

    match conditions.len() {
        0 => Ok(all()),
        1 => Ok(conditions.remove(0)),
        _ => Ok(and(conditions)),
    }
}
