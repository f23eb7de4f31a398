//! # Module Registry
//!
//! Resolves every required module before anything is wired. Resolution is read-only and stops
//! at the first module that cannot be found.

use crate::address::Address;
use crate::error::WiringError;
use crate::module::ModuleName;
use crate::ports::{DeployedModule, ModuleResolver, Resolution};
use std::sync::Arc;
use tracing::{error, info};

/// Resolved modules, in the order they were requested.
pub struct ModuleRegistry {
    entries: Vec<(ModuleName, Arc<dyn DeployedModule>)>,
}

impl ModuleRegistry {
    /// Resolves `modules` in order.
    ///
    /// # Errors
    ///
    /// [`WiringError::MissingModule`] for the first module that is not found or that resolves to
    /// the zero address. Later modules are not queried.
    pub async fn resolve_all(
        resolver: &dyn ModuleResolver,
        modules: &[ModuleName],
    ) -> Result<Self, WiringError> {
        let mut entries = Vec::with_capacity(modules.len());
        for &module in modules {
            match resolver.resolve(module).await {
                Resolution::Found(handle) if handle.address().is_zero() => {
                    error!(%module, "Module resolved to the zero address");
                    return Err(WiringError::MissingModule {
                        module,
                        reason: "resolved to the zero address".to_string(),
                    });
                }
                Resolution::Found(handle) => {
                    info!(%module, address = %handle.address(), "Module resolved");
                    entries.push((module, handle));
                }
                Resolution::Missing { reason } => {
                    error!(%module, %reason, "Module missing");
                    return Err(WiringError::MissingModule { module, reason });
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, module: ModuleName) -> Option<&Arc<dyn DeployedModule>> {
        self.entries
            .iter()
            .find(|(name, _)| *name == module)
            .map(|(_, handle)| handle)
    }

    pub fn address(&self, module: ModuleName) -> Option<Address> {
        self.get(module).map(|handle| handle.address())
    }

    pub fn modules(&self) -> impl Iterator<Item = ModuleName> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Call, CallLog, MockModule, MockResolver};

    #[tokio::test]
    async fn test_resolves_in_order() {
        let log = CallLog::default();
        let resolver = MockResolver::with_all_modules(log.clone());

        let registry = ModuleRegistry::resolve_all(&resolver, &ModuleName::ALL)
            .await
            .unwrap();

        assert_eq!(registry.len(), 6);
        assert_eq!(registry.modules().collect::<Vec<_>>(), ModuleName::ALL.to_vec());
        assert_eq!(
            registry.address(ModuleName::Treasury),
            Some(Address::from_index(2))
        );
    }

    #[tokio::test]
    async fn test_stops_at_first_missing() {
        let log = CallLog::default();
        let resolver = MockResolver::with_all_modules(log.clone());
        resolver.remove(ModuleName::Treasury);

        let err = ModuleRegistry::resolve_all(&resolver, &ModuleName::ALL)
            .await
            .err()
            .unwrap();

        assert!(matches!(
            err,
            WiringError::MissingModule {
                module: ModuleName::Treasury,
                ..
            }
        ));
        assert_eq!(
            log.entries(),
            vec![
                Call::Resolve(ModuleName::RoleManagement),
                Call::Resolve(ModuleName::Treasury)
            ]
        );
    }

    #[tokio::test]
    async fn test_zero_address_counts_as_missing() {
        let log = CallLog::default();
        let resolver = MockResolver::new(log.clone());
        resolver.insert(Arc::new(MockModule::new(
            ModuleName::RoleManagement,
            Address::ZERO,
            log.clone(),
        )));

        let err = ModuleRegistry::resolve_all(&resolver, &[ModuleName::RoleManagement])
            .await
            .err()
            .unwrap();
        assert_eq!(
            err,
            WiringError::MissingModule {
                module: ModuleName::RoleManagement,
                reason: "resolved to the zero address".to_string()
            }
        );
    }
}
