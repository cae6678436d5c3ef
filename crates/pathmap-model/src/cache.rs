//! Process-wide descriptor cache
//!
//! Provides [`DescriptorCache`], memoizing [`TypeDescriptor`]s and the
//! `supports` decision per type. Descriptors are built outside any map lock and
//! published insert-if-absent, so a racing builder's result is discarded and no
//! partially built descriptor is ever visible.

use crate::descriptor::{PathMapped, TypeDescriptor};
use crate::error::DescriptorError;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::sync::Arc;

static GLOBAL: Lazy<DescriptorCache> = Lazy::new(DescriptorCache::new);

/// Concurrent per-type descriptor cache
///
/// Entries are keyed by [`TypeId`] and stored type-erased; lookups downcast
/// back to `TypeDescriptor<T>`.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    /// TypeId -> Arc<TypeDescriptor<T>>
    descriptors: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,

    /// TypeId -> has projected fields
    supports: DashMap<TypeId, bool>,
}

impl DescriptorCache {
    /// Create empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptors: DashMap::new(),
            supports: DashMap::new(),
        }
    }

    /// Shared process-wide cache
    #[inline]
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Get the descriptor for `T`, building it on first use
    ///
    /// # Errors
    /// Returns [`DescriptorError`] if `T::describe` fails. Failures are not cached.
    pub fn describe<T: PathMapped>(&self) -> Result<Arc<TypeDescriptor<T>>, DescriptorError> {
        let key = TypeId::of::<T>();

        if let Some(cached) = self.lookup::<T>(key) {
            return Ok(cached);
        }

        let built = Arc::new(T::describe()?);
        tracing::debug!(
            "Built descriptor for {} ({} fields)",
            built.type_name(),
            built.fields().len()
        );

        let published = self
            .descriptors
            .entry(key)
            .or_insert_with(|| {
                let erased: Arc<dyn Any + Send + Sync> = built.clone();
                erased
            })
            .value()
            .clone();

        // Keyed by TypeId, so the published entry always downcasts
        Ok(published.downcast::<TypeDescriptor<T>>().unwrap_or(built))
    }

    /// Check if `T` has at least one projected field
    ///
    /// Memoized per type. A type whose descriptor fails to build reports `true`
    /// so the pipeline surfaces the descriptor error.
    pub fn supports<T: PathMapped>(&self) -> bool {
        let key = TypeId::of::<T>();

        if let Some(cached) = self.supports.get(&key) {
            return *cached;
        }

        let supported = match self.describe::<T>() {
            Ok(descriptor) => descriptor.has_projected_fields(),
            Err(err) => {
                tracing::warn!("Descriptor for {} failed: {}", std::any::type_name::<T>(), err);
                true
            }
        };

        *self.supports.entry(key).or_insert(supported)
    }

    /// Number of cached descriptors
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if no descriptor is cached
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Drop all cached entries
    pub fn clear(&self) {
        self.descriptors.clear();
        self.supports.clear();
    }

    fn lookup<T: PathMapped>(&self, key: TypeId) -> Option<Arc<TypeDescriptor<T>>> {
        let erased = self.descriptors.get(&key).map(|entry| entry.value().clone())?;
        erased.downcast::<TypeDescriptor<T>>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDescriptor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Counted {
        value: i32,
    }

    impl PathMapped for Counted {
        fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            TypeDescriptor::builder(Counted::default)
                .field(
                    FieldDescriptor::new("value", |s: &Counted| &s.value, |s: &mut Counted| {
                        &mut s.value
                    })
                    .with_query("a.b")?,
                )
                .build()
        }
    }

    #[derive(Default)]
    struct Projected {
        value: i32,
    }

    impl PathMapped for Projected {
        fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
            TypeDescriptor::builder(Projected::default)
                .field(
                    FieldDescriptor::new("value", |s: &Projected| &s.value, |s: &mut Projected| {
                        &mut s.value
                    })
                    .with_query("$")?,
                )
                .build()
        }
    }

    #[derive(Default)]
    struct Plain {
        value: i32,
    }

    impl PathMapped for Plain {
        fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
            TypeDescriptor::builder(Plain::default)
                .field(FieldDescriptor::new(
                    "value",
                    |s: &Plain| &s.value,
                    |s: &mut Plain| &mut s.value,
                ))
                .build()
        }
    }

    #[derive(Default)]
    struct Broken {
        value: i32,
    }

    impl PathMapped for Broken {
        fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
            TypeDescriptor::builder(Broken::default)
                .field(
                    FieldDescriptor::new("value", |s: &Broken| &s.value, |s: &mut Broken| {
                        &mut s.value
                    })
                    .with_query("values[?")?,
                )
                .build()
        }
    }

    #[test]
    fn describe_is_memoized() {
        let cache = DescriptorCache::new();
        let before = BUILDS.load(Ordering::SeqCst);

        let first = cache.describe::<Counted>().unwrap();
        let second = cache.describe::<Counted>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(BUILDS.load(Ordering::SeqCst) - before, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn supports_requires_projected_field() {
        let cache = DescriptorCache::new();
        assert!(cache.supports::<Projected>());
        assert!(!cache.supports::<Plain>());
        // Repeated lookups hit the memo
        assert!(!cache.supports::<Plain>());
    }

    #[test]
    fn failed_describe_is_surfaced() {
        let cache = DescriptorCache::new();
        assert!(matches!(
            cache.describe::<Broken>(),
            Err(DescriptorError::Query(_))
        ));
        assert!(cache.supports::<Broken>());
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_first_use_publishes_one_descriptor() {
        let cache = DescriptorCache::new();
        let descriptors: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.describe::<Plain>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let published = cache.describe::<Plain>().unwrap();
        assert!(descriptors.iter().all(|d| Arc::ptr_eq(d, &published)));
    }

    #[test]
    fn clear_resets() {
        let cache = DescriptorCache::new();
        cache.describe::<Plain>().unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn global_is_shared() {
        assert!(std::ptr::eq(DescriptorCache::global(), DescriptorCache::global()));
    }
}
