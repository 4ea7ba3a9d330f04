//! # Controller Registry
//!
//! Ordered list of named initializers run once at startup. Each initializer may
//! hand back a long-running controller task for the watch loop to drive.

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use std::fmt;

/// A controller's run loop
pub type ControllerTask = BoxFuture<'static, ()>;

type Initializer<C> = Box<dyn FnOnce(&C) -> Result<Option<ControllerTask>> + Send>;

/// Initializers in registration order
pub struct ControllerRegistry<C> {
    entries: Vec<(&'static str, Initializer<C>)>,
}

impl<C> Default for ControllerRegistry<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C> fmt::Debug for ControllerRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("entries", &self.names())
            .finish()
    }
}

impl<C> ControllerRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an initializer
    #[must_use]
    pub fn register<F>(mut self, name: &'static str, initializer: F) -> Self
    where
        F: FnOnce(&C) -> Result<Option<ControllerTask>> + Send + 'static,
    {
        self.entries.push((name, Box::new(initializer)));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    /// Run every initializer in order, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the first initializer error, naming the initializer.
    pub fn setup_all(self, ctx: &C) -> Result<Vec<ControllerTask>> {
        let mut tasks = Vec::new();
        for (name, initializer) in self.entries {
            if let Some(task) =
                initializer(ctx).with_context(|| format!("failed to set up {name}"))?
            {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }
}
