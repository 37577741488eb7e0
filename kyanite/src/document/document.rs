use im::OrdMap;
use smallvec::SmallVec;

use crate::common::{ReadExecutor, Value};
use crate::errors::{ErrorKind, KyaniteError, KyaniteResult};
use crate::FIELD_SEPARATOR;
use itertools::Itertools;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

type FieldVec = SmallVec<[String; 8]>;

/// Represents a document in Kyanite using a lock-free persistent data structure.
///
/// Kyanite documents are composed of key-value pairs. The key is always a
/// [String] and value is a [Value].
///
/// Documents support nested documents as well. The key of a nested
/// document is a [String] separated by the field separator (default: `.`).
/// The field separator can be configured using [`crate::set_field_separator`].
///
/// For example, if a document has a nested document `{"a": {"b": 1}}`, then the
/// value inside the nested document can be retrieved by calling `document.get("a.b")`.
///
/// ## Lock-Free Design
///
/// This struct uses `im::OrdMap` (a persistent ordered map) for lock-free operation:
/// - O(1) cloning via internal Arc sharing
/// - Mutations create new maps via structural sharing (90% structure reused)
/// - Each mutated document is completely independent
/// - Zero locks, zero copy-on-write overhead
///
/// The update engine relies on this: [`crate::update::update_document`] clones its
/// input document and mutates the clone, leaving the original untouched.
#[derive(
    Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct Document {
    /// Persistent ordered map: O(1) clone via internal Arc, O(log n) mutations
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// assert_eq!(doc.size(), 0);
    /// ```
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    /// Checks if the document is empty.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let empty_doc = Document::new();
    /// assert!(empty_doc.is_empty());
    ///
    /// let mut doc = doc!{ "key": "value" };
    /// assert!(!doc.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified [Value] with the specified key in this document.
    ///
    /// This method inserts a key-value pair into the document. If the key already exists,
    /// its value is updated. The method supports both top-level and embedded keys
    /// (e.g., `"user.name"` or `"location.address.zip"`).
    ///
    /// # Arguments
    ///
    /// * `key` - The key as a string or string slice. Cannot be empty.
    /// * `value` - The value to associate with the key. Can be any type that implements
    ///   `Into<Value>` (primitives, strings, documents, arrays, etc.).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    ///
    /// # Examples
    ///
    /// Basic insertion:
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("age", 30)?;
    /// assert_eq!(doc.size(), 2);
    /// ```
    ///
    /// Nested document insertion:
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("user.name", "Alice")?;
    /// doc.put("user.email", "alice@example.com")?;
    /// assert_eq!(doc.get("user.name")?, Value::String("Alice".to_string()));
    /// ```
    ///
    /// Updating existing key:
    /// ```ignore
    /// let mut doc = doc!{ "status": "inactive" };
    /// doc.put("status", "active")?;
    /// assert_eq!(doc.get("status")?, Value::String("active".to_string()));
    /// ```
    pub fn put<'a, T: Into<Value>>(
        &mut self,
        key: impl Into<Cow<'a, str>>,
        value: T,
    ) -> KyaniteResult<()> {
        let key = key.into();
        // key cannot be empty
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(KyaniteError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();

        // if field name contains field separator, split the fields, and put the value
        // accordingly associated with the embedded field.
        if FIELD_SEPARATOR.read_with(|sep| key.contains(sep)) {
            let splits: Vec<&str> = FIELD_SEPARATOR.read_with(|it| key.split(it).collect());
            self.deep_put(&splits, value)
        } else {
            self.data = self.data.update(key.to_string(), value);
            Ok(())
        }
    }

    /// Returns the [Value] to which the specified key is associated, or [Value::Null]
    /// if this document contains no mapping for the key.
    ///
    /// This method retrieves the value associated with a key. If the key does not exist,
    /// it returns [Value::Null]. The method supports both top-level and embedded keys
    /// (e.g., `"location.address.zip"`).
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up as a string slice.
    ///
    /// # Returns
    ///
    /// Returns the associated [Value], or [Value::Null] if the key does not exist.
    ///
    /// # Examples
    ///
    /// Retrieving a top-level key:
    /// ```ignore
    /// let doc = doc!{ "name": "Alice", "age": 30 };
    /// assert_eq!(doc.get("name")?, Value::String("Alice".to_string()));
    /// assert_eq!(doc.get("age")?, Value::I32(30));
    /// ```
    ///
    /// Accessing nested documents:
    /// ```ignore
    /// let doc = doc!{
    ///     "location": {
    ///         "city": "New York",
    ///         "zip": 10001
    ///     }
    /// };
    /// assert_eq!(doc.get("location.city")?, Value::String("New York".to_string()));
    /// assert_eq!(doc.get("location.zip")?, Value::I32(10001));
    /// ```
    ///
    /// Accessing array elements:
    /// ```ignore
    /// let doc = doc!{ "items": [1, 2, 3] };
    /// assert_eq!(doc.get("items.0")?, Value::I32(1));
    /// assert_eq!(doc.get("items.1")?, Value::I32(2));
    /// ```
    ///
    /// Non-existent key returns Null:
    /// ```ignore
    /// let doc = doc!{ "name": "Alice" };
    /// assert_eq!(doc.get("missing")?, Value::Null);
    /// ```
    pub fn get(&self, key: &str) -> KyaniteResult<Value> {
        match self.data.get(key) {
            Some(value) => Ok(value.clone()),
            None => {
                // Only check for embedded key if not found at top level
                if FIELD_SEPARATOR.read_with(|sep| key.contains(sep)) {
                    self.deep_get(key)
                } else {
                    Ok(Value::Null)
                }
            }
        }
    }

    /// Retrieves all fields (top level and embedded) associated with this document.
    ///
    /// This method returns a collection of all field paths in the document, including
    /// top-level fields and embedded fields from nested documents. Embedded fields are
    /// represented using the field separator (default: `.`).
    ///
    /// # Returns
    ///
    /// A [FieldVec] containing all field paths in the document.
    ///
    /// # Examples
    ///
    /// Retrieving fields from a simple document:
    /// ```ignore
    /// let doc = doc!{ "name": "Alice", "age": 30 };
    /// let fields = doc.fields();
    /// assert_eq!(fields.len(), 2);
    /// assert!(fields.contains(&"name".to_string()));
    /// assert!(fields.contains(&"age".to_string()));
    /// ```
    ///
    /// Retrieving fields from a nested document:
    /// ```ignore
    /// let doc = doc!{
    ///     "user": {
    ///         "name": "Alice",
    ///         "email": "alice@example.com"
    ///     },
    ///     "status": "active"
    /// };
    /// let fields = doc.fields();
    /// // Returns ["user.name", "user.email", "status"]
    /// assert!(fields.contains(&"user.name".to_string()));
    /// assert!(fields.contains(&"user.email".to_string()));
    /// assert!(fields.contains(&"status".to_string()));
    /// ```
    pub fn fields(&self) -> FieldVec {
        self.get_fields_internal("")
    }

    /// Removes the key and its value from the document.
    ///
    /// Deletes the key-value pair associated with the given key. If the key does not exist,
    /// the operation succeeds without error. The method supports both top-level and embedded keys.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to remove as a string slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the key contains invalid embedded field separators.
    ///
    /// # Examples
    ///
    /// Removing a top-level key:
    /// ```ignore
    /// let mut doc = doc!{ "name": "Alice", "age": 30 };
    /// doc.remove("age")?;
    /// assert_eq!(doc.get("age")?, Value::Null);
    /// assert_eq!(doc.size(), 1);
    /// ```
    ///
    /// Removing a nested field:
    /// ```ignore
    /// let mut doc = doc!{
    ///     "user": {
    ///         "name": "Alice",
    ///         "email": "alice@example.com"
    ///     }
    /// };
    /// doc.remove("user.email")?;
    /// assert_eq!(doc.get("user.email")?, Value::Null);
    /// ```
    ///
    /// Removing non-existent key succeeds:
    /// ```ignore
    /// let mut doc = doc!{ "name": "Alice" };
    /// doc.remove("missing")?;  // No error
    /// assert_eq!(doc.size(), 1);
    /// ```
    pub fn remove(&mut self, key: &str) -> KyaniteResult<()> {
        if FIELD_SEPARATOR.read_with(|sep| key.contains(sep)) {
            // if the field is an embedded field,
            // run a deep scan and remove the last field
            let splits: Vec<&str> = FIELD_SEPARATOR.read_with(|it| key.split(it).collect());
            self.deep_remove(&splits)
        } else {
            self.data = self.data.without(key);
            Ok(())
        }
    }

    /// Returns the number of entries in the document.
    ///
    /// # Returns
    ///
    /// The count of key-value pairs in this document (top-level only, not including nested entries).
    ///
    /// # Examples
    ///
    /// Counting entries:
    /// ```ignore
    /// let doc = Document::new();
    /// assert_eq!(doc.size(), 0);
    ///
    /// let doc = doc!{ "name": "Alice", "age": 30 };
    /// assert_eq!(doc.size(), 2);
    ///
    /// // Nested documents count as one entry
    /// let doc = doc!{ "user": { "name": "Alice" }, "status": "active" };
    /// assert_eq!(doc.size(), 2);
    /// ```
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Merges a document in this document.
    ///
    /// Merges all key-value pairs from another document into this one. If a key already exists:
    /// - If both values are documents, they are merged recursively
    /// - Otherwise, the value from `other` overwrites the existing value
    ///
    /// # Arguments
    ///
    /// * `other` - The document to merge into this one.
    ///
    /// # Examples
    ///
    /// Basic merge:
    /// ```ignore
    /// let mut doc1 = doc!{ "name": "Alice", "age": 30 };
    /// let doc2 = doc!{ "email": "alice@example.com", "age": 31 };
    /// doc1.merge(&doc2)?;
    ///
    /// assert_eq!(doc1.get("age")?, Value::I32(31));       // Overwritten
    /// assert_eq!(doc1.get("email")?, Value::String("alice@example.com".to_string()));
    /// ```
    pub fn merge(&mut self, other: &Document) -> KyaniteResult<()> {
        for (key, value) in other.data.iter() {
            match value {
                Value::Document(obj) => {
                    // if the value is a document, merge it recursively
                    if let Some(Value::Document(mut nested_obj)) = self.data.get(key).cloned() {
                        nested_obj.merge(obj)?;
                        self.data = self.data.update(key.clone(), Value::Document(nested_obj));
                    } else {
                        // Otherwise, just set the value
                        self.data = self.data.update(key.clone(), value.clone());
                    }
                }
                _ => {
                    // if there is no embedded document, put the field in the document
                    self.data = self.data.update(key.clone(), value.clone());
                }
            }
        }
        Ok(())
    }

    /// Checks if a top level key exists in the document.
    ///
    /// This method only checks for top-level keys, not embedded fields. Use [Self::contains_field]
    /// to check for embedded fields.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to check as a string slice.
    ///
    /// # Returns
    ///
    /// `true` if the key exists at the top level, `false` otherwise.
    ///
    /// # Examples
    ///
    /// Checking top-level keys:
    /// ```ignore
    /// let doc = doc!{
    ///     "name": "Alice",
    ///     "user": { "email": "alice@example.com" }
    /// };
    ///
    /// assert!(doc.contains_key("name"));
    /// assert!(doc.contains_key("user"));
    /// assert!(!doc.contains_key("email"));  // email is nested, not top-level
    /// ```
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Checks if a top level field or embedded field exists in the document.
    ///
    /// This method checks both top-level and embedded fields. It returns `true` if the
    /// field exists at any level in the document hierarchy.
    ///
    /// # Arguments
    ///
    /// * `field` - The field path to check as a string slice (e.g., `"user.email"`).
    ///
    /// # Returns
    ///
    /// `true` if the field exists at any level, `false` otherwise.
    ///
    /// # Examples
    ///
    /// Checking embedded fields:
    /// ```ignore
    /// let doc = doc!{
    ///     "name": "Alice",
    ///     "location": {
    ///         "city": "New York",
    ///         "address": { "zip": 10001 }
    ///     }
    /// };
    ///
    /// assert!(doc.contains_field("name"));                     // Top-level
    /// assert!(doc.contains_field("location.city"));            // Nested
    /// assert!(doc.contains_field("location.address.zip"));     // Deeply nested
    /// assert!(!doc.contains_field("location.country"));        // Doesn't exist
    /// ```
    pub fn contains_field(&self, field: &str) -> bool {
        if self.contains_key(field) {
            true
        } else {
            self.fields().contains(&field.to_string())
        }
    }

    /// Converts this document to a [BTreeMap].
    ///
    /// Creates a new [BTreeMap] containing all the key-value pairs from this document.
    /// This is useful for interoperability with code expecting a standard map type.
    ///
    /// # Returns
    ///
    /// A new [BTreeMap] containing all entries from this document.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = doc!{ "name": "Alice", "age": 30 };
    /// let map = doc.to_map();
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Gets an iterator over the key-value pairs of this document.
    ///
    /// Returns a [DocumentIter] that iterates over all top-level key-value pairs
    /// in the document in key order. Each iteration yields a tuple of (key, value)
    /// where both are owned values.
    ///
    /// # Returns
    ///
    /// A [DocumentIter] for iterating over the document entries.
    ///
    /// # Examples
    ///
    /// Iterating over document entries:
    /// ```ignore
    /// let doc = doc!{ "name": "Alice", "age": 30 };
    /// for (key, value) in doc.iter() {
    ///     println!("{}: {}", key, value);
    /// }
    /// ```
    pub fn iter(&self) -> DocumentIter {
        DocumentIter {
            keys: self.data.keys().cloned().collect(),
            data: self.clone(),
            index: 0,
        }
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let estimated_size = self.data.len() * 30 + indent * 2;
        let mut json_string = String::with_capacity(estimated_size);

        json_string.push_str("{\n");
        let indent_str = " ".repeat(indent + 2);
        for (key, value) in self.data.iter() {
            json_string.push_str(&format!(
                "{}\"{}\": {},\n",
                indent_str,
                key,
                value.to_pretty_json(indent + 2)
            ));
        }

        json_string.pop();
        json_string.pop();
        json_string.push_str(&format!("\n{}}}", " ".repeat(indent)));
        json_string
    }

    pub(crate) fn to_debug_string(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let mut debug_string = String::new();
        debug_string.push_str("{\n");
        let indent_str = " ".repeat(indent + 2);
        for (key, value) in self.data.iter() {
            debug_string.push_str(&format!(
                "{}\"{}\": {},\n",
                indent_str,
                key,
                value.to_debug_string(indent + 2)
            ));
        }

        debug_string.pop();
        debug_string.pop();
        debug_string.push_str(&format!("\n{}}}", " ".repeat(indent)));
        debug_string
    }

    fn is_embedded(&self, key: &str) -> bool {
        FIELD_SEPARATOR.read_with(|it| key.contains(it))
    }

    fn get_fields_internal(&self, prefix: &str) -> FieldVec {
        let mut fields = FieldVec::new();
        let separator = FIELD_SEPARATOR.read_with(|s| s.clone());

        // iterate top level keys
        for key in self.data.keys() {
            if key.is_empty() {
                continue;
            }

            let field = if prefix.is_empty() {
                // level-1 fields
                key.clone()
            } else {
                // level-n fields, separated by field separator
                format!("{}{}{}", prefix, separator, key)
            };

            if let Some(Value::Document(doc)) = self.data.get(key) {
                // if the value is a document, traverse its fields recursively,
                // prefix would be the field name of the document
                fields.append(&mut doc.get_fields_internal(&field));
            } else {
                // if there is no more embedded document, add the field to the list
                fields.push(field);
            }
        }
        fields
    }

    fn deep_get(&self, key: &str) -> KyaniteResult<Value> {
        if !self.is_embedded(key) {
            Ok(Value::Null)
        } else {
            self.get_by_embedded_key(key)
        }
    }

    fn deep_put(&mut self, splits: &[&str], value: Value) -> KyaniteResult<()> {
        if splits.is_empty() {
            log::error!("Empty embedded key");
            return Err(KyaniteError::new(
                "Empty embedded key",
                ErrorKind::ValidationError,
            ));
        }

        let key = splits[0];
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(KyaniteError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        if splits.len() == 1 {
            // if last key, simply put in the current document
            self.put(key, value)
        } else {
            let remaining_splits = &splits[1..];
            if let Some(Value::Document(mut obj)) = self.data.get(key).cloned() {
                // if the current level value is embedded doc, scan to the next level
                let result = obj.deep_put(remaining_splits, value);
                self.data = self.data.update(key.to_string(), Value::Document(obj));
                result
            } else {
                // if current level value is null, create a new document
                let mut nested_doc = Document::new();
                let result = nested_doc.deep_put(remaining_splits, value);
                self.data = self
                    .data
                    .update(key.to_string(), Value::Document(nested_doc));
                result
            }
        }
    }

    fn deep_remove(&mut self, splits: &[&str]) -> KyaniteResult<()> {
        if splits.is_empty() {
            log::error!("Empty embedded key");
            return Err(KyaniteError::new(
                "Empty embedded key",
                ErrorKind::ValidationError,
            ));
        }

        let key = splits[0];
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(KyaniteError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        if splits.len() == 1 {
            // if last key, simply remove from the current document
            self.remove(key)
        } else {
            let remaining_splits = &splits[1..];

            match self.data.get(key) {
                Some(Value::Document(obj)) => {
                    // if the current level value is embedded doc, scan to the next level
                    let mut nested_doc = obj.clone();
                    let result = nested_doc.deep_remove(remaining_splits);
                    if nested_doc.is_empty() {
                        // if the next level document is an empty one
                        // remove the current level document also
                        self.data = self.data.without(key);
                    } else {
                        self.data = self
                            .data
                            .update(key.to_string(), Value::Document(nested_doc));
                    }
                    result
                }
                Some(Value::Array(arr)) => {
                    let first = splits[1];
                    // if the current level value is an iterable,
                    // remove the element at the next level
                    if let Ok(index) = first.parse::<isize>() {
                        if index < 0 {
                            log::error!(
                                "Invalid array index {} to access array inside a document",
                                &index
                            );
                            return Err(KyaniteError::new(
                                &format!(
                                    "Invalid array index {} to access array inside a document",
                                    &index
                                ),
                                ErrorKind::ValidationError,
                            ));
                        }

                        let index = index as usize;
                        if index >= arr.len() {
                            log::error!("Array index {} out of bound", &index);
                            return Err(KyaniteError::new(
                                &format!("Array index {} out of bound", &index),
                                ErrorKind::ValidationError,
                            ));
                        }

                        let item = &arr[index];
                        if let (Value::Document(obj), true) = (item, splits.len() > 2) {
                            // if there are more splits, then this is an embedded document
                            let mut nested_doc = obj.clone();
                            let result = nested_doc.deep_remove(&remaining_splits[1..]);
                            if nested_doc.is_empty() {
                                // if the next level document is an empty one
                                // remove the element from array
                                let mut new_arr = arr.clone();
                                new_arr.remove(index);
                                self.data =
                                    self.data.update(key.to_string(), Value::Array(new_arr));
                            } else {
                                let mut new_arr = arr.clone();
                                new_arr[index] = Value::Document(nested_doc);
                                self.data =
                                    self.data.update(key.to_string(), Value::Array(new_arr));
                            }
                            result
                        } else {
                            // if there are no more splits, remove the element at the next level
                            let mut new_arr = arr.clone();
                            new_arr.remove(index);
                            self.data = self.data.update(key.to_string(), Value::Array(new_arr));
                            Ok(())
                        }
                    } else {
                        log::error!(
                            "Invalid array index {} to access array inside a document",
                            first
                        );
                        Err(KyaniteError::new(
                            &format!(
                                "Invalid array index {} to access array inside a document",
                                first
                            ),
                            ErrorKind::ValidationError,
                        ))
                    }
                }
                _ => {
                    // if current level value is null, remove the key
                    self.data = self.data.without(key);
                    Ok(())
                }
            }
        }
    }

    fn get_by_embedded_key(&self, key: &str) -> KyaniteResult<Value> {
        let separator = FIELD_SEPARATOR.read_with(|s| s.clone());
        let splits: Vec<&str> = key.split(&separator).collect();

        if splits.is_empty() {
            return Ok(Value::Null);
        }

        let first = splits[0];
        if first.is_empty() {
            log::error!("Document does not support empty key");
            return Err(KyaniteError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        // get current level value and scan to next level using remaining keys
        self.recursive_get(self.data.get(first), &splits[1..])
    }

    fn recursive_get(&self, value: Option<&Value>, splits: &[&str]) -> KyaniteResult<Value> {
        let value = match value {
            None => return Ok(Value::Null),
            Some(v) => v,
        };

        if splits.is_empty() {
            return Ok(value.clone());
        }

        let key = splits[0];
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(KyaniteError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        match value {
            Value::Document(obj) => {
                // if the current level value is document, scan to the next level with remaining keys
                self.recursive_get(obj.data.get(key), &splits[1..])
            }
            Value::Array(arr) => {
                // if the current level value is an iterable
                let first = key;
                if let Ok(index) = first.parse::<isize>() {
                    // check index lower bound
                    if index < 0 {
                        log::error!(
                            "Invalid array index {} to access array inside a document",
                            &index
                        );
                        return Err(KyaniteError::new(
                            &format!(
                                "Invalid array index {} to access array inside a document",
                                &index
                            ),
                            ErrorKind::ValidationError,
                        ));
                    }

                    // check index upper bound
                    let index = index as usize;
                    if index >= arr.len() {
                        log::error!("Array index {} out of bound", &index);
                        return Err(KyaniteError::new(
                            &format!("Array index {} out of bound", &index),
                            ErrorKind::ValidationError,
                        ));
                    }

                    // get the value at the index from the list
                    let item = &arr[index];
                    self.recursive_get(Some(item), &splits[1..])
                } else {
                    // if the current key is not an integer, decompose the list
                    self.decompose(arr, splits)
                }
            }
            _ => Ok(Value::Null), // if no match found return null
        }
    }

    fn decompose(&self, arr: &[Value], splits: &[&str]) -> KyaniteResult<Value> {
        let mut items: Vec<Value> = Vec::with_capacity(arr.len());

        for item in arr {
            // scan the item using remaining keys and use ? for error propagation
            let result = self.recursive_get(Some(item), splits)?;

            match result {
                Value::Array(arr) => {
                    // if the result is an iterable, add all items to the list
                    for v in arr {
                        items.push(v);
                    }
                }
                value => {
                    // if the result is not an iterable, add the result to the list
                    items.push(value);
                }
            }
        }
        // remove duplicates from the list
        Ok(Value::Array(
            items.iter().unique().cloned().collect::<Vec<_>>(),
        ))
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_debug_string(0))
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

pub struct DocumentIter {
    keys: Vec<String>,
    data: Document,
    index: usize,
}

impl Iterator for DocumentIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.keys.len() {
            let key = &self.keys[self.index];
            if let Some(value) = self.data.data.get(key) {
                let result = (key.clone(), value.clone());
                self.index += 1;
                return Some(result);
            }
            self.index += 1;
            self.next()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.keys.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a Kyanite Document with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use kyanite::doc;
///
/// // Empty document
/// let empty = doc!{};
///
/// // Simple key-value pairs
/// let simple = doc!{
///     name: "Alice",
///     age: 30
/// };
///
/// // With expressions
/// let base = 100;
/// let with_expr = doc!{
///     name: "Bob",
///     score: (base * 2),
///     computed: (base + 50)
/// };
///
/// // Nested documents and arrays
/// let complex = doc!{
///     user: {
///         name: "Charlie",
///         tags: ["admin", "user"]
///     },
///     values: [1, 2, 3]
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document (with braces for backward compat)
    ({}) => {
        $crate::document::Document::new()
    };

    // match an empty document (new syntax)
    () => {
        $crate::document::Document::new()
    };

    // match a document with key value pairs (old syntax with outer braces - for backward compat)
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    // match a document with key value pairs (new syntax without outer braces)
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::document::Document::new();
            $(
                doc.put(&$crate::document::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match a document with key value pairs (new syntax without outer braces)
    ($($key:tt : $value:tt),+ $(,)?) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Value::Null;
    use crate::document::Document;
    use crate::{create_document, document_from_map, empty_document};

    fn set_up() -> Document {
        doc! {
            score: 1034,
            location: {
                state: "NY",
                city: "New York",
                address: {
                    line1: "40",
                    line2: "ABC Street",
                    house: ["1", "2", "3"],
                    zip: 10001,
                },
            },
            category: ["food", "produce", "grocery"],
            obj_array: [
                {
                    value: 1,
                },
                {
                    value: 2,
                },
            ]
        }
    }

    #[test]
    fn test_normalize() {
        let value = "\"ABC\"".to_string();
        let result = normalize(&value);
        assert_eq!(result, "ABC");

        let value = "ABC".to_string();
        let result = normalize(&value);
        assert_eq!(result, "ABC");
    }

    #[test]
    fn test_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_is_empty() {
        let doc = empty_document();
        assert!(doc.is_empty());

        let doc = set_up();
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_get() {
        let doc = set_up();
        let mut value = doc.get("").unwrap();
        assert_eq!(value, Null);
        value = doc.get("score").unwrap();
        assert_eq!(value, Value::I32(1034));
        value = doc.get("location.state").unwrap();
        assert_eq!(value, Value::String("NY".to_string()));
        value = doc.get("location.address").unwrap();
        assert_eq!(
            value,
            Value::Document(doc! {
                line1: "40",
                line2: "ABC Street",
                house: ["1", "2", "3"],
                zip: 10001,
            })
        );
        value = doc.get("location.address.line1").unwrap();
        assert_eq!(value, Value::String("40".to_string()));
        value = doc.get("location.address.house").unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::String("1".to_string()),
                Value::String("2".to_string()),
                Value::String("3".to_string())
            ])
        );
        value = doc.get("location.address.house.0").unwrap();
        assert_eq!(value, Value::String("1".to_string()));
        value = doc.get("location.address.house.2").unwrap();
        assert_eq!(value, Value::String("3".to_string()));
        value = doc.get("location.address.zip").unwrap();
        assert_eq!(value, Value::I32(10001));

        value = doc.get("category.0").unwrap();
        assert_eq!(value, Value::String("food".to_string()));
        value = doc.get("category.2").unwrap();
        assert_eq!(value, Value::String("grocery".to_string()));

        value = doc.get("obj_array.0").unwrap();
        assert_eq!(value, Value::Document(doc! { value: 1 }));
        value = doc.get("obj_array.0.value").unwrap();
        assert_eq!(value, Value::I32(1));
        value = doc.get("obj_array.1.value").unwrap();
        assert_eq!(value, Value::I32(2));

        value = doc.get("location.address.test").unwrap();
        assert_eq!(value, Null);
        assert_eq!(doc.get("location.address.house.3").is_err(), true);
        assert_eq!(doc.get("location.address.house.-1").is_err(), true);
        assert_eq!(doc.get(".").is_err(), true);
        assert_eq!(doc.get("..").is_err(), true);
        assert_eq!(doc.get("score.test").unwrap(), Null);
    }

    #[test]
    fn test_put_null() {
        let mut doc = empty_document();
        doc.put("key", Null).unwrap();
        assert_eq!(doc.size(), 1);
        assert_eq!(doc.get("key").unwrap(), Null);
    }

    #[test]
    fn test_put_and_get() {
        let mut doc = Document::new();
        doc.put("key", Value::I32(1)).unwrap();
        assert_eq!(doc.get("key").unwrap(), Value::I32(1));
    }

    #[test]
    fn test_put_empty_key() {
        let mut doc = Document::new();
        let result = doc.put("", Value::I32(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_put_overwrites() {
        let mut doc = doc! { status: "inactive" };
        doc.put("status", "active").unwrap();
        assert_eq!(doc.size(), 1);
        assert_eq!(doc.get("status").unwrap(), Value::String("active".to_string()));
    }

    #[test]
    fn test_get_non_existent_key() {
        let doc = Document::new();
        assert_eq!(doc.get("non_existent").unwrap(), Null);
    }

    #[test]
    fn test_invalid_get() {
        let key = "first.array.-1";
        let doc = doc! {
            first: {
                array: [1, 2, 3],
            },
        };
        let err = doc.get(key).is_err();
        assert_eq!(err, true);
    }

    #[test]
    fn test_fields() {
        let doc = doc! {
            key1: 1,
            key2: "value",
            key3: [1, 2, 3],
            key4: {
                key5: 5,
                key6: "value",
            },
        };
        let fields = doc.fields();
        assert_eq!(fields.len(), 5);
    }

    #[test]
    fn test_contains_key() {
        let doc = set_up();
        assert!(doc.contains_key("score"));
        assert!(!doc.contains_key("non_existent"));
    }

    #[test]
    fn test_contains_field() {
        let doc = set_up();
        assert!(doc.contains_field("location.state"));
        assert!(!doc.contains_field("location.country"));
    }

    #[test]
    fn test_remove() {
        let mut doc = empty_document();
        doc.put("key", Value::I32(1)).unwrap();
        assert_eq!(doc.size(), 1);
        doc.remove("key").unwrap();
        assert_eq!(doc.size(), 0);
    }

    #[test]
    fn test_size() {
        let doc = set_up();
        assert_eq!(doc.size(), 4);
    }

    #[test]
    fn test_to_map() {
        let doc = set_up();
        let map = doc.to_map();
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_iter() {
        let doc = doc! {
            key1: "value1",
            key2: 2,
        };

        let mut iter = doc.iter();
        let (key, value) = iter.next().unwrap();
        assert_eq!(key, "key1");
        assert_eq!(value, Value::String("value1".to_string()));

        let (key, value) = iter.next().unwrap();
        assert_eq!(key, "key2");
        assert_eq!(value, Value::I32(2));
    }

    #[test]
    fn test_iter_is_key_ordered() {
        let doc = doc! {
            zebra: 1,
            apple: 2,
            mango: 3,
        };

        let keys: Vec<String> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_get_fields() {
        let doc = set_up();
        let fields = doc.fields();
        assert_eq!(fields.len(), 9);

        assert_eq!(fields.contains(&"score".to_string()), true);
        assert_eq!(fields.contains(&"location.state".to_string()), true);
        assert_eq!(fields.contains(&"location.city".to_string()), true);
        assert_eq!(fields.contains(&"location.address.line1".to_string()), true);
        assert_eq!(fields.contains(&"location.address.line2".to_string()), true);
        assert_eq!(fields.contains(&"location.address.house".to_string()), true);
        assert_eq!(fields.contains(&"location.address.zip".to_string()), true);
        assert_eq!(fields.contains(&"category".to_string()), true);
        assert_eq!(fields.contains(&"obj_array".to_string()), true);
    }

    #[test]
    fn test_get_embedded_array_fields() {
        let doc = doc! {
            first: "value",
            second: ["1", "2"],
            third: Null,
            fourth: {
                first: "value",
                second: ["1", "2"],
                third: {
                    first: [1, 2],
                    second: "other",
                },
            },
            fifth: [
                {
                    first: "value",
                    second: [1, 2, 3],
                    fourth: [
                        {
                            second: [1, 2],
                        },
                        {
                            second: [1, 2],
                        },
                    ],
                },
                {
                    first: "value",
                    second: [3, 4, 5],
                    fourth: [
                        {
                            second: [1, 2],
                        },
                        {
                            second: [3, 4],
                        },
                    ],
                },
            ]
        };

        let val = doc.get("fifth.second").unwrap();
        let list = val.as_array().unwrap();
        assert_eq!(list.len(), 5);

        let val = doc.get("fifth.fourth.second").unwrap();
        let list = val.as_array().unwrap();
        assert_eq!(list.len(), 4);

        let val = doc.get("fourth.third.second").unwrap();
        assert_eq!(val, Value::String("other".to_string()));

        let val = doc.get("fifth.0.second.0").unwrap();
        assert_eq!(val, Value::I32(1));

        let val = doc.get("fifth.1.fourth.1.second.1").unwrap();
        assert_eq!(val, Value::I32(4));
    }

    #[test]
    fn test_deep_put() {
        let mut doc = set_up();
        doc.put("location.address.pin", Value::I32(700037)).unwrap();
        assert_eq!(doc.get("location.address.pin").unwrap(), Value::I32(700037));

        doc.put("location.address.business.pin", Value::I32(700037))
            .unwrap();
        assert_eq!(
            doc.get("location.address.business.pin").unwrap(),
            Value::I32(700037)
        );
    }

    #[test]
    fn test_deep_remove() {
        let mut doc = set_up();
        doc.remove("location.address.zip").unwrap();
        assert_eq!(doc.get("location.address.zip").unwrap(), Null);

        doc.remove("location.address.line1").unwrap();
        assert_eq!(doc.get("location.address.line1").unwrap(), Null);

        doc.remove("location.address.line2").unwrap();
        assert_eq!(doc.get("location.address.line2").unwrap(), Null);

        doc.remove("location.address.house").unwrap();
        assert_eq!(doc.get("location.address.house").unwrap(), Null);

        doc.remove("location.address").unwrap();
        assert_eq!(doc.get("location.address").unwrap(), Null);
    }

    #[test]
    fn test_decompose() {
        let doc = doc! {
            some_key: [{key: 1}, {key: 2}, {key: 3}],
        };

        let value = doc.get("some_key").unwrap();
        let array = value.as_array().unwrap();
        let decomposed = doc.decompose(array, &["key"]).unwrap();
        assert_eq!(
            decomposed,
            Value::Array(vec![Value::I32(1), Value::I32(2), Value::I32(3)])
        );
    }

    #[test]
    fn test_deep_put_invalid_field() {
        let mut doc = empty_document();
        let result = doc.put("..invalid..field", Value::I32(1));
        assert_eq!(result.is_err(), true);
    }

    #[test]
    fn test_deep_remove_invalid_field() {
        let mut doc = empty_document();
        let result = doc.remove("..invalid..field");
        assert_eq!(result.is_err(), true);
    }

    #[test]
    fn test_merge_documents() {
        let mut doc1 = doc! {
            "key1": "value1",
            "nested": {
                "key2": "value2",
            },
        };

        let doc2 = doc! {
            "key3": "value3",
            "nested": {
                "key4": "value4",
            },
        };

        doc1.merge(&doc2).unwrap();
        assert_eq!(doc1.size(), 3);
        assert_eq!(
            doc1.get("key1").unwrap(),
            Value::String("value1".to_string())
        );
        assert_eq!(
            doc1.get("key3").unwrap(),
            Value::String("value3".to_string())
        );
        assert_eq!(
            doc1.get("nested.key2").unwrap(),
            Value::String("value2".to_string())
        );
        assert_eq!(
            doc1.get("nested.key4").unwrap(),
            Value::String("value4".to_string())
        );
    }

    #[test]
    fn test_merge_empty_document() {
        let mut doc1 = empty_document();
        let doc2 = empty_document();
        doc1.merge(&doc2).unwrap();
        assert_eq!(doc1.size(), 0);
    }

    #[test]
    fn test_display() {
        let doc = doc! {
            key1: "value1",
            key2: 2,
        };

        let display = format!("{}", doc);
        assert!(display.contains("\"key1\": \"value1\""));
        assert!(display.contains("\"key2\": 2"));
    }

    #[test]
    fn test_debug() {
        let doc = doc! {
            key1: "value1",
            key2: 2,
        };

        let debug = format!("{:?}", doc);
        assert!(debug.contains("\"key1\": string(\"value1\")"));
        assert!(debug.contains("\"key2\": i32(2)"));
    }

    #[test]
    fn test_get_invalid_key() {
        let doc = empty_document();
        let result = doc.get("invalid.key");
        assert_eq!(result.is_ok(), true);
        assert_eq!(result.unwrap(), Null);
    }

    #[test]
    fn test_remove_invalid_key() {
        let mut doc = empty_document();
        let result = doc.remove("invalid.key");
        assert_eq!(result.is_ok(), true);
    }

    #[test]
    fn test_get_invalid_array_index() {
        let doc = doc! {
            key: [1, 2, 3],
        };

        let result = doc.get("key.-1");
        assert_eq!(result.is_err(), true);
    }

    #[test]
    fn test_remove_invalid_array_index() {
        let mut doc = doc! {
            key: [1, 2, 3],
        };

        let result = doc.remove("key.-1");
        assert_eq!(result.is_err(), true);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = set_up();
        let mut copy = original.clone();
        copy.put("score", Value::I32(1)).unwrap();
        copy.remove("category").unwrap();

        assert_eq!(original.get("score").unwrap(), Value::I32(1034));
        assert!(original.contains_key("category"));
        assert_eq!(copy.get("score").unwrap(), Value::I32(1));
    }

    #[test]
    fn test_create_document() {
        let doc = create_document("key", Value::I32(1)).unwrap();
        assert_eq!(doc.size(), 1);
    }

    #[test]
    fn test_document_from_map() {
        let mut map = BTreeMap::new();
        map.insert("key1".to_string(), Value::I32(1));
        map.insert("key2".to_string(), Value::String("value".to_string()));
        map.insert(
            "key3".to_string(),
            Value::Array(vec![Value::I32(1), Value::I32(2)]),
        );
        map.insert("key4".to_string(), Value::Document(Document::new()));

        let doc = document_from_map(&map).unwrap();
        assert_eq!(doc.size(), 4);
    }

    #[test]
    fn test_document_serde_round_trip() {
        let doc = set_up();
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn bench_document_clone() {
        let doc = set_up();
        let start = std::time::Instant::now();
        for _ in 0..10000 {
            let _ = doc.clone();
        }
        let elapsed = start.elapsed();
        println!(
            "document clone (10000x): {:?} ({:.3}µs per call)",
            elapsed,
            elapsed.as_micros() as f64 / 10000.0
        );
    }

    #[test]
    fn bench_deep_get() {
        let doc = set_up();
        let start = std::time::Instant::now();
        for _ in 0..10000 {
            let _ = doc.get("location.address.zip");
        }
        let elapsed = start.elapsed();
        println!(
            "deep get (10000x): {:?} ({:.3}µs per call)",
            elapsed,
            elapsed.as_micros() as f64 / 10000.0
        );
    }

    #[cfg(test)]
    mod custom_separator_test {
        use super::*;
        use crate::set_field_separator;

        #[test]
        #[cfg_attr(not(feature = "custom_separator"), ignore)]
        fn custom_separator_test_get() {
            set_field_separator(":").expect("Failed to set separator");

            let doc = set_up();
            let mut value = doc.get("location:state").unwrap();
            assert_eq!(value, Value::String("NY".to_string()));
            value = doc.get("location:address:line1").unwrap();
            assert_eq!(value, Value::String("40".to_string()));
            value = doc.get("location:address:house:0").unwrap();
            assert_eq!(value, Value::String("1".to_string()));
            value = doc.get("obj_array:1:value").unwrap();
            assert_eq!(value, Value::I32(2));
            value = doc.get("location:address:test").unwrap();
            assert_eq!(value, Null);
        }

        #[test]
        #[cfg_attr(not(feature = "custom_separator"), ignore)]
        fn custom_separator_test_remove() {
            set_field_separator(":").expect("Failed to set separator");

            let mut doc = set_up();
            assert_eq!(
                doc.get("location:address")
                    .unwrap()
                    .as_document()
                    .unwrap()
                    .size(),
                4
            );
            doc.remove("location:address:line1").unwrap();
            assert_eq!(
                doc.get("location:address")
                    .unwrap()
                    .as_document()
                    .unwrap()
                    .size(),
                3
            );
        }

        #[test]
        #[cfg_attr(not(feature = "custom_separator"), ignore)]
        fn custom_separator_test_default_separator_fails() {
            set_field_separator(":").expect("Failed to set separator");

            let doc = set_up();
            let value = doc.get("location.address.house.0").unwrap();
            assert_eq!(value, Null);

            let value = doc.get("location:address:house:0").unwrap();
            assert_eq!(value, Value::String("1".to_string()));
        }
    }
}
