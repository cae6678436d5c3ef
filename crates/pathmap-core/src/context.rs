//! Active mapper configuration for the current thread
//!
//! Pipelines push their configuration for the duration of one call so nested
//! mapped types (serialized or deserialized through the generic serde path)
//! pick up the same settings.

use crate::config::MapperConfig;
use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
    static ACTIVE: RefCell<Vec<Arc<MapperConfig>>> = const { RefCell::new(Vec::new()) };
}

/// Pops the configuration pushed by [`enter`] when dropped
#[must_use]
pub(crate) struct ContextGuard {
    _private: (),
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        ACTIVE.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Make `config` the active configuration until the guard drops
pub(crate) fn enter(config: Arc<MapperConfig>) -> ContextGuard {
    ACTIVE.with(|stack| stack.borrow_mut().push(config));
    ContextGuard { _private: () }
}

/// Innermost active configuration, if any
pub(crate) fn active() -> Option<Arc<MapperConfig>> {
    ACTIVE.with(|stack| stack.borrow().last().cloned())
}
