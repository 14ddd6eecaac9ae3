//! Per-type field accessor cache

use crate::error::{QueryMatrixError, Result};
use crate::record::schema::{FieldAccessor, Record};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Case-insensitive name lookup plus registration order for one record type
pub struct FieldMap<R> {
    record: &'static str,
    by_name: AHashMap<String, Arc<FieldAccessor<R>>>,
    ordered: Vec<Arc<FieldAccessor<R>>>,
}

impl<R: Record> FieldMap<R> {
    fn build() -> Self {
        let schema = R::schema();
        let record = schema.record_name();
        let fields = schema.into_fields();

        let mut by_name = AHashMap::with_capacity(fields.len());
        let mut ordered = Vec::with_capacity(fields.len());

        for accessor in fields {
            let key = accessor.name().to_lowercase();
            // First registration wins on case-insensitive duplicates
            if by_name.contains_key(&key) {
                continue;
            }
            let accessor = Arc::new(accessor);
            by_name.insert(key, Arc::clone(&accessor));
            ordered.push(accessor);
        }

        tracing::trace!(record, fields = ordered.len(), "built field accessor map");

        Self {
            record,
            by_name,
            ordered,
        }
    }
}

impl<R> FieldMap<R> {
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    /// Accessor by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&Arc<FieldAccessor<R>>> {
        self.by_name.get(&name.to_lowercase())
    }

    /// Accessor by name, failing with `UnknownField`
    pub fn accessor(&self, name: &str) -> Result<Arc<FieldAccessor<R>>> {
        self.get(name)
            .cloned()
            .ok_or_else(|| QueryMatrixError::UnknownField {
                field: name.to_string(),
                record: self.record,
            })
    }

    /// Accessors in registration order
    pub fn fields(&self) -> &[Arc<FieldAccessor<R>>] {
        &self.ordered
    }
}

type CachedMap = Arc<dyn Any + Send + Sync>;

/// Global accessor cache keyed by record type
static ACCESSOR_CACHE: Lazy<RwLock<AHashMap<TypeId, CachedMap>>> =
    Lazy::new(|| RwLock::new(AHashMap::with_capacity(16)));

/// Get the field map for `R`, building it on first access
pub fn field_map<R: Record>() -> Arc<FieldMap<R>> {
    let type_id = TypeId::of::<R>();

    // Fast path: check read lock first
    {
        let cache = ACCESSOR_CACHE.read();
        if let Some(map) = cache
            .get(&type_id)
            .and_then(|entry| Arc::clone(entry).downcast::<FieldMap<R>>().ok())
        {
            return map;
        }
    }

    // Slow path: build outside the lock, first writer wins
    let built = Arc::new(FieldMap::<R>::build());

    let mut cache = ACCESSOR_CACHE.write();
    let entry = cache
        .entry(type_id)
        .or_insert_with(|| Arc::clone(&built) as CachedMap);
    Arc::clone(entry).downcast::<FieldMap<R>>().unwrap_or(built)
}

/// Resolve a field accessor by name (case-insensitive)
pub fn accessor_for<R: Record>(field: &str) -> Result<Arc<FieldAccessor<R>>> {
    field_map::<R>().accessor(field)
}

/// Clear the accessor cache (useful for testing)
pub fn clear_cache() {
    let mut cache = ACCESSOR_CACHE.write();
    cache.clear();
}

/// Number of record types currently cached
pub fn cache_size() -> usize {
    let cache = ACCESSOR_CACHE.read();
    cache.len()
}
