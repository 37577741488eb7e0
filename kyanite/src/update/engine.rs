use crate::{
    document::Document,
    errors::{ErrorKind, KyaniteError, KyaniteResult},
    update::UpdateOperator,
};

/// Applies an update specification to a document and returns the updated copy.
///
/// Every top-level entry of the specification pairs an operator name with a document
/// of fields for that operator to act on. Entries are applied in the specification's
/// field order, each operator reading the output of the one before it. Entries whose
/// name is not a recognized operator are skipped with a debug log.
///
/// The input document is never modified. The returned document shares unchanged
/// fields with the original.
///
/// # Arguments
///
/// * `document` - The document to update
/// * `update_spec` - The update specification, keyed by operator name
///
/// # Returns
///
/// The updated document, or an `InvalidOperation` error when a recognized
/// operator's operand is not a document of fields
///
/// # Example
///
/// ```
/// use kyanite::{doc, update::update_document};
///
/// # fn main() -> kyanite::errors::KyaniteResult<()> {
/// let original = doc! { name: "widget", tags: ["new"] };
/// let updated = update_document(
///     &original,
///     &doc! {
///         "$set": { price: 25 },
///         "$push": { tags: "sale" }
///     },
/// )?;
///
/// assert_eq!(updated.get("price")?, 25.into());
/// assert_eq!(original.get("price")?, kyanite::common::Value::Null);
/// # Ok(())
/// # }
/// ```
pub fn update_document(document: &Document, update_spec: &Document) -> KyaniteResult<Document> {
    let mut updated = document.clone();
    for (operator_name, operand) in update_spec.iter() {
        let operator = match UpdateOperator::from_name(&operator_name) {
            Some(operator) => operator,
            None => {
                log::debug!("unknown update operator {}, skipping", operator_name);
                continue;
            }
        };

        let fields = match operand.as_document() {
            Some(fields) => fields,
            None => {
                log::error!(
                    "Update operator {} has non-mapping operand {}",
                    operator_name,
                    operand
                );
                return Err(KyaniteError::new(
                    &format!(
                        "Update operator {} requires a document of fields",
                        operator_name
                    ),
                    ErrorKind::InvalidOperation,
                ));
            }
        };

        updated = operator.apply(&updated, fields)?;
    }
    Ok(updated)
}
