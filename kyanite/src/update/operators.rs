use crate::{
    common::{PULL_OPERATOR, PUSH_OPERATOR, SET_OPERATOR},
    document::Document,
    errors::KyaniteResult,
    query::{apply_to_element, compile, elem_match_subquery, value_matches},
    Value,
};

/// The closed set of document update operators.
///
/// Each variant names one operator of the update specification language and carries
/// its field-map application rule. The set is closed: operator names map to variants
/// through [from_name](UpdateOperator::from_name), and a name with no variant is not
/// an operator at all.
///
/// # Responsibilities
///
/// * **Name Dispatch**: Maps specification names like `$set` to handlers
/// * **Field Application**: Applies one operator's field map to a document
/// * **Copy Semantics**: Handlers return new documents and never modify their input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateOperator {
    /// Creates or overwrites fields with the given values.
    Set,
    /// Appends to array fields, creating a single-element array for absent fields.
    Push,
    /// Removes array elements matching a literal or `$elemMatch` criterion.
    Pull,
}

impl UpdateOperator {
    /// Looks up an update operator by its specification name.
    ///
    /// # Arguments
    ///
    /// * `name` - The operator name as it appears in an update specification
    ///
    /// # Returns
    ///
    /// The matching operator, or `None` for unrecognized names
    pub fn from_name(name: &str) -> Option<UpdateOperator> {
        match name {
            SET_OPERATOR => Some(UpdateOperator::Set),
            PUSH_OPERATOR => Some(UpdateOperator::Push),
            PULL_OPERATOR => Some(UpdateOperator::Pull),
            _ => None,
        }
    }

    /// Returns the operator's specification name.
    pub fn name(&self) -> &'static str {
        match self {
            UpdateOperator::Set => SET_OPERATOR,
            UpdateOperator::Push => PUSH_OPERATOR,
            UpdateOperator::Pull => PULL_OPERATOR,
        }
    }

    /// Applies this operator's field map to a document.
    ///
    /// Returns a new document; the input document is left untouched. Fields the
    /// operator does not target are carried over unchanged.
    pub(crate) fn apply(&self, document: &Document, fields: &Document) -> KyaniteResult<Document> {
        match self {
            UpdateOperator::Set => apply_set(document, fields),
            UpdateOperator::Push => apply_push(document, fields),
            UpdateOperator::Pull => apply_pull(document, fields),
        }
    }
}

fn apply_set(document: &Document, fields: &Document) -> KyaniteResult<Document> {
    let mut updated = document.clone();
    for (field_name, value) in fields.iter() {
        updated.put(field_name.as_str(), value.clone())?;
    }
    Ok(updated)
}

fn apply_push(document: &Document, fields: &Document) -> KyaniteResult<Document> {
    let mut updated = document.clone();
    for (field_name, value) in fields.iter() {
        if !document.contains_field(&field_name) {
            updated.put(field_name.as_str(), Value::Array(vec![value.clone()]))?;
            continue;
        }

        match document.get(&field_name)? {
            Value::Array(mut elements) => {
                elements.push(value.clone());
                updated.put(field_name.as_str(), Value::Array(elements))?;
            }
            current => {
                log::debug!(
                    "push target field {} holds non-array value {}, skipping",
                    field_name,
                    current
                );
            }
        }
    }
    Ok(updated)
}

fn apply_pull(document: &Document, fields: &Document) -> KyaniteResult<Document> {
    let mut updated = document.clone();
    for (field_name, criterion) in fields.iter() {
        let elements = match document.get(&field_name)? {
            Value::Array(elements) => elements,
            current => {
                log::debug!(
                    "pull target field {} is missing or not an array ({}), skipping",
                    field_name,
                    current
                );
                continue;
            }
        };

        let mut survivors = Vec::with_capacity(elements.len());
        match elem_match_subquery(&criterion) {
            Some(subquery) => {
                let element_filter = compile(&subquery)?;
                for element in &elements {
                    if !apply_to_element(element, &element_filter)? {
                        survivors.push(element.clone());
                    }
                }
            }
            None => {
                for element in &elements {
                    if !value_matches(element, &criterion)? {
                        survivors.push(element.clone());
                    }
                }
            }
        }
        updated.put(field_name.as_str(), Value::Array(survivors))?;
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_from_name() {
        assert_eq!(UpdateOperator::from_name("$set"), Some(UpdateOperator::Set));
        assert_eq!(
            UpdateOperator::from_name("$push"),
            Some(UpdateOperator::Push)
        );
        assert_eq!(
            UpdateOperator::from_name("$pull"),
            Some(UpdateOperator::Pull)
        );
        assert_eq!(UpdateOperator::from_name("$unset"), None);
        assert_eq!(UpdateOperator::from_name("set"), None);
        assert_eq!(UpdateOperator::from_name(""), None);
    }

    #[test]
    fn test_name_round_trip() {
        for operator in [
            UpdateOperator::Set,
            UpdateOperator::Push,
            UpdateOperator::Pull,
        ] {
            assert_eq!(UpdateOperator::from_name(operator.name()), Some(operator));
        }
    }

    #[test]
    fn test_set_adds_missing_field() {
        let original = doc! { x: 10, y: 20 };
        let updated = UpdateOperator::Set
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, doc! { x: 10, y: 20, z: 30 });
    }

    #[test]
    fn test_set_replaces_existing_field() {
        let original = doc! { x: 10, z: 35 };
        let updated = UpdateOperator::Set
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, doc! { x: 10, z: 30 });
    }

    #[test]
    fn test_set_replaces_whole_array() {
        let original = doc! { z: [1, 2, 3] };
        let updated = UpdateOperator::Set
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, doc! { z: 30 });
    }

    #[test]
    fn test_set_multiple_fields() {
        let original = doc! { x: 10 };
        let updated = UpdateOperator::Set
            .apply(&original, &doc! { y: 20, z: 30 })
            .unwrap();
        assert_eq!(updated, doc! { x: 10, y: 20, z: 30 });
    }

    #[test]
    fn test_push_creates_array_for_absent_field() {
        let original = doc! { x: 10 };
        let updated = UpdateOperator::Push
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, doc! { x: 10, z: [30] });
    }

    #[test]
    fn test_push_appends_to_existing_array() {
        let original = doc! { z: [30] };
        let updated = UpdateOperator::Push
            .apply(&original, &doc! { z: 35 })
            .unwrap();
        assert_eq!(updated, doc! { z: [30, 35] });
    }

    #[test]
    fn test_push_preserves_element_order() {
        let original = doc! { z: [3, 1, 2] };
        let updated = UpdateOperator::Push
            .apply(&original, &doc! { z: 4 })
            .unwrap();
        assert_eq!(updated, doc! { z: [3, 1, 2, 4] });
    }

    #[test]
    fn test_push_on_non_array_is_noop() {
        let original = doc! { z: 35 };
        let updated = UpdateOperator::Push
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, original);
    }

    #[test]
    fn test_push_on_explicit_null_is_noop() {
        // An explicitly null field is present, so it is not wrapped
        let original = doc! { z: (Value::Null) };
        let updated = UpdateOperator::Push
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, original);
    }

    #[test]
    fn test_push_document_element() {
        let original = doc! { z: [{a: 1}] };
        let updated = UpdateOperator::Push
            .apply(&original, &doc! { z: {a: 2} })
            .unwrap();
        assert_eq!(updated, doc! { z: [{a: 1}, {a: 2}] });
    }

    #[test]
    fn test_pull_on_missing_field_is_noop() {
        let original = doc! { x: 10 };
        let updated = UpdateOperator::Pull
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, original);
    }

    #[test]
    fn test_pull_on_non_array_is_noop() {
        let original = doc! { z: 35 };
        let updated = UpdateOperator::Pull
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, original);
    }

    #[test]
    fn test_pull_literal_removes_deep_equal_elements() {
        let original = doc! { z: [30, 35] };
        let updated = UpdateOperator::Pull
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, doc! { z: [35] });
    }

    #[test]
    fn test_pull_literal_removes_all_occurrences() {
        let original = doc! { z: [30, 35, 30, 30] };
        let updated = UpdateOperator::Pull
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, doc! { z: [35] });
    }

    #[test]
    fn test_pull_literal_document_criterion() {
        let original = doc! { z: [{a: 1}, {a: 2}] };
        let updated = UpdateOperator::Pull
            .apply(&original, &doc! { z: {a: 1} })
            .unwrap();
        assert_eq!(updated, doc! { z: [{a: 2}] });
    }

    #[test]
    fn test_pull_elem_match_removes_matching_sub_documents() {
        let original = doc! { z: [{a: 30, b: 20}, {a: 30, b: 15}, {a: 35, b: 25}] };
        let updated = UpdateOperator::Pull
            .apply(&original, &doc! { z: { "$elemMatch": { a: 30 } } })
            .unwrap();
        assert_eq!(updated, doc! { z: [{a: 35, b: 25}] });
    }

    #[test]
    fn test_pull_elem_match_preserves_survivor_order() {
        let original = doc! { z: [{a: 1}, {a: 2}, {a: 1}, {a: 3}] };
        let updated = UpdateOperator::Pull
            .apply(&original, &doc! { z: { "$elemMatch": { a: 1 } } })
            .unwrap();
        assert_eq!(updated, doc! { z: [{a: 2}, {a: 3}] });
    }

    #[test]
    fn test_pull_elem_match_skips_scalar_elements() {
        let original = doc! { z: [30, {a: 30}] };
        let updated = UpdateOperator::Pull
            .apply(&original, &doc! { z: { "$elemMatch": { a: 30 } } })
            .unwrap();
        assert_eq!(updated, doc! { z: [30] });
    }

    #[test]
    fn test_pull_can_empty_the_array() {
        let original = doc! { z: [30, 30] };
        let updated = UpdateOperator::Pull
            .apply(&original, &doc! { z: 30 })
            .unwrap();
        assert_eq!(updated, doc! { z: [] });
    }

    #[test]
    fn test_operators_never_modify_input() {
        let original = doc! { z: [30, 35], x: 10 };
        let snapshot = original.clone();

        let _ = UpdateOperator::Set
            .apply(&original, &doc! { z: 1 })
            .unwrap();
        let _ = UpdateOperator::Push
            .apply(&original, &doc! { z: 40 })
            .unwrap();
        let _ = UpdateOperator::Pull
            .apply(&original, &doc! { z: 30 })
            .unwrap();

        assert_eq!(original, snapshot);
    }
}
