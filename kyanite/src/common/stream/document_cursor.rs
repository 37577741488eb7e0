use crate::document::Document;
use crate::errors::KyaniteResult;

/// A lazy, replayable cursor over the documents produced by a query.
///
/// The cursor pulls documents from its underlying stream on demand and caches
/// everything it has seen, so it can be iterated multiple times via [reset](DocumentCursor::reset)
/// without re-running the pipeline.
pub struct DocumentCursor {
    underlying: Option<Box<dyn Iterator<Item = KyaniteResult<Document>>>>,
    cache: Vec<KyaniteResult<Document>>,
    current_index: usize,
}

impl DocumentCursor {
    pub fn new(iter: Box<dyn Iterator<Item = KyaniteResult<Document>>>) -> Self {
        DocumentCursor {
            underlying: Some(iter),
            cache: Vec::new(),
            current_index: 0,
        }
    }

    /// Resets the cursor so that it can be iterated from the beginning.
    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    pub fn size(&mut self) -> usize {
        // If the underlying iterator is already exhausted,
        // then no need to iterate again.
        if self.underlying.is_none() {
            self.reset();
            return self.cache.len();
        }
        // Otherwise, iterate through the remaining items.
        for _ in self.by_ref() {}
        self.reset();
        self.cache.len()
    }

    pub fn first(&mut self) -> Option<KyaniteResult<Document>> {
        self.reset();
        self.next()
    }

    /// Drains the cursor into a vector, failing on the first stream error.
    pub fn to_vec(&mut self) -> KyaniteResult<Vec<Document>> {
        self.reset();
        let mut documents = Vec::new();
        for item in self.by_ref() {
            documents.push(item?);
        }
        self.reset();
        Ok(documents)
    }
}

impl Iterator for DocumentCursor {
    type Item = KyaniteResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        // If we have cached items, return the next one.
        if self.current_index < self.cache.len() {
            let result = self.cache[self.current_index].clone();
            self.current_index += 1;
            return Some(result);
        }

        // Otherwise, try to pull from the underlying iterator.
        if let Some(ref mut iter) = self.underlying {
            if let Some(item) = iter.next() {
                self.cache.push(item.clone());
                self.current_index += 1;
                return Some(item);
            }
            // Once exhausted, drop the underlying iterator.
            self.underlying = None;
        }
        None
    }
}
