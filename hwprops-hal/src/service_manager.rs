//! Service lookup for thermal HAL handles
//!
//! Services are registered by name at startup and looked up by the bridge.
//! A missing service is not an error: it simply means the HAL is unavailable.

use crate::thermal::Thermal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registry of named thermal services
#[derive(Default)]
pub struct ServiceManager {
    services: HashMap<String, Arc<dyn Thermal>>,
}

impl ServiceManager {
    /// Create an empty service manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service under `name`, replacing any previous registration
    pub fn register(&mut self, name: impl Into<String>, service: Arc<dyn Thermal>) {
        let name = name.into();
        if self.services.insert(name.clone(), service).is_some() {
            warn!("Replaced thermal service registered as '{}'", name);
        } else {
            info!("Registered thermal service '{}'", name);
        }
    }

    /// Look up a service by name
    pub fn get_service(&self, name: &str) -> Option<Arc<dyn Thermal>> {
        let service = self.services.get(name).cloned();
        if service.is_none() {
            debug!("No thermal service registered as '{}'", name);
        }
        service
    }

    /// Registered service names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ServiceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceManager")
            .field("services", &self.names())
            .finish()
    }
}
