//! Application-wide services and the registry that provides them.
//!
//! Services are constructed once at startup and registered in an
//! [`AppContext`]. Consumers pull what they need with
//! [`AppContext::require`], which fails with [`AppError::MissingProvider`]
//! when the service was never provided.

mod bookmarks;
mod persistent;
mod theme;

pub use bookmarks::*;
pub use persistent::*;
pub use theme::*;

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;

/// Typed registry of shared services.
#[derive(Clone, Default)]
pub struct AppContext {
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service`, replacing any previous provider of the same type.
    pub fn provide<T: Send + Sync + 'static>(mut self, service: Arc<T>) -> Self {
        self.services.insert(TypeId::of::<T>(), service);
        self
    }

    /// Fetch the provider of `T`.
    pub fn require<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, AppError> {
        self.services
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|service| service.downcast::<T>().ok())
            .ok_or_else(|| AppError::MissingProvider(short_type_name::<T>()))
    }

    pub fn provides<T: Send + Sync + 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }
}

static MODULE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[A-Za-z_][A-Za-z0-9_]*::)+").expect("valid module path pattern"));

/// Type name without module paths, generic arguments included.
fn short_type_name<T>() -> String {
    MODULE_PATH.replace_all(type_name::<T>(), "").into_owned()
}
