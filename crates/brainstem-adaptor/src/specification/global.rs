//! Process-wide default specification.
//!
//! [`Response::new`](crate::Response::new) captures whatever is registered
//! here at construction time. Responses built with an explicit specification
//! never look at it.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use tracing::debug;

use super::Specification;

static DEFAULT: LazyLock<RwLock<Option<Arc<Specification>>>> =
    LazyLock::new(|| RwLock::new(None));

/// Register the default specification, replacing any previous one.
pub fn set_default(specification: Specification) {
    debug!(
        collections = specification.len(),
        "registering default specification"
    );
    let mut slot = DEFAULT.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(Arc::new(specification));
}

/// Returns the registered default specification, if any.
pub fn default_specification() -> Option<Arc<Specification>> {
    DEFAULT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Remove the default specification.
pub fn clear_default() {
    debug!("clearing default specification");
    let mut slot = DEFAULT.write().unwrap_or_else(PoisonError::into_inner);
    *slot = None;
}
