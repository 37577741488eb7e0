use crate::common::SortOrder;
use crate::errors::{ErrorKind, KyaniteError, KyaniteResult};

/// An ordered list of field names, each paired with a [SortOrder], describing
/// how a result set should be sorted.
///
/// Fields are applied in insertion order: the first field is the primary sort
/// key, the second breaks ties on the first, and so on.
///
/// # Example
///
/// ```ignore
/// let fields = SortableFields::new()
///     .add_field("last_name".to_string())
///     .add_sorted_field("age".to_string(), SortOrder::Descending);
/// ```
pub struct SortableFields {
    field_names: Vec<String>,
    sorting_order: Vec<(String, SortOrder)>,
}

impl Default for SortableFields {
    fn default() -> Self {
        Self::new()
    }
}

impl SortableFields {
    pub fn new() -> SortableFields {
        SortableFields {
            field_names: Vec::new(),
            sorting_order: Vec::new(),
        }
    }

    pub fn with_names(field_names: Vec<String>) -> KyaniteResult<SortableFields> {
        if field_names.is_empty() {
            log::error!("Field names cannot be empty");
            return Err(KyaniteError::new(
                "Field names cannot be empty",
                ErrorKind::ValidationError,
            ));
        }

        let sorting_order = field_names
            .iter()
            .map(|field_name| (field_name.clone(), SortOrder::Ascending))
            .collect();

        Ok(SortableFields {
            field_names,
            sorting_order,
        })
    }

    pub fn with_names_and_order(
        field_names: Vec<String>,
        sorting_order: Vec<(String, SortOrder)>,
    ) -> KyaniteResult<SortableFields> {
        if field_names.is_empty() {
            log::error!("Field names cannot be empty");
            return Err(KyaniteError::new(
                "Field names cannot be empty",
                ErrorKind::ValidationError,
            ));
        }

        Ok(SortableFields {
            field_names,
            sorting_order,
        })
    }

    pub fn field_names(&self) -> Vec<String> {
        self.field_names.clone()
    }

    #[inline]
    pub fn add_field(self, field_name: String) -> SortableFields {
        self.add_sorted_field(field_name, SortOrder::Ascending)
    }

    #[inline]
    pub fn add_sorted_field(mut self, field_name: String, sort_order: SortOrder) -> SortableFields {
        self.field_names.push(field_name.clone());
        self.sorting_order.push((field_name, sort_order));
        self
    }

    #[inline]
    pub fn sorting_order(&self) -> Vec<(String, SortOrder)> {
        // Pre-allocate with known capacity
        let mut sorting_order = Vec::with_capacity(self.sorting_order.len());
        for (field_name, sort_order) in &self.sorting_order {
            sorting_order.push((field_name.clone(), *sort_order));
        }
        sorting_order
    }
}
