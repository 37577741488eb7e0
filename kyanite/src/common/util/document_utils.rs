use std::collections::BTreeMap;

use crate::{document::Document, errors::KyaniteResult, Value};

/// Creates an empty document.
pub fn empty_document() -> Document {
    Document::new()
}

/// Creates a document from a [BTreeMap].
pub fn document_from_map(map: &BTreeMap<String, Value>) -> KyaniteResult<Document> {
    // recursively create document from map
    // and validate the key as well
    let mut doc = Document::new();
    for (key, value) in map.iter() {
        match value {
            Value::Document(obj) => {
                // recursively create document from nested map
                doc.put(key, Value::Document(obj.clone()))?;
            }
            Value::Array(arr) => {
                // Preallocate with exact capacity to avoid reallocation
                let mut nested_arr = Vec::with_capacity(arr.len());
                for v in arr.iter() {
                    // if array contains nested object, then recursively create document
                    match v {
                        Value::Document(obj) => {
                            nested_arr.push(Value::Document(obj.clone()));
                        }
                        _ => {
                            nested_arr.push(v.clone());
                        }
                    }
                }
                // put the array in the document
                doc.put(key, Value::Array(nested_arr))?;
            }
            _ => {
                // for all other types, just put the value in the document
                doc.put(key, value.clone())?;
            }
        }
    }
    Ok(doc)
}

/// Creates a document with a single key-value pair.
pub fn create_document(key: &str, value: Value) -> KyaniteResult<Document> {
    let mut doc = Document::new();
    doc.put(key, value)?;
    Ok(doc)
}
