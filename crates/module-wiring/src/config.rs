//! # Wiring Configuration
//!
//! Layered the usual way: defaults, then an optional YAML file, then `WIRING_*` environment
//! variables. The CLI applies its flags last.
//!
//! ```yaml
//! modules: [RoleManagement, Treasury, WarehouseInventory, SupplierOrders, StoreInventory, CustomerOrders]
//! operator: "0x0000000000000000000000000000000000000001"
//! bootstrap:
//!   enabled: true
//!   holder: "0x0000000000000000000000000000000000000002"
//!   role: FINANCE_DIRECTOR_ROLE
//! ```

use crate::address::{Address, RoleId};
use crate::bootstrap::BootstrapTarget;
use crate::error::WiringError;
use crate::module::ModuleName;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_target_module")]
    pub module: ModuleName,
    #[serde(default = "default_role_module")]
    pub role_module: ModuleName,
    #[serde(default)]
    pub role: RoleId,
    /// Designated holder. Without one the bootstrap step is not run.
    #[serde(default)]
    pub holder: Option<Address>,
}

fn default_enabled() -> bool {
    true
}

fn default_target_module() -> ModuleName {
    ModuleName::Treasury
}

fn default_role_module() -> ModuleName {
    ModuleName::RoleManagement
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            module: default_target_module(),
            role_module: default_role_module(),
            role: RoleId::default(),
            holder: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiringConfig {
    /// Modules to resolve, in resolution order.
    #[serde(default = "default_modules")]
    pub modules: Vec<ModuleName>,
    /// Account the setters are attributed to. Usually the deployer.
    #[serde(default)]
    pub operator: Option<Address>,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

fn default_modules() -> Vec<ModuleName> {
    ModuleName::ALL.to_vec()
}

impl Default for WiringConfig {
    fn default() -> Self {
        Self {
            modules: default_modules(),
            operator: None,
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl WiringConfig {
    pub fn from_yaml(data: &str) -> Result<Self, WiringError> {
        serde_yaml::from_str(data).map_err(|e| WiringError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, WiringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| WiringError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&data)
    }

    /// Overlays `WIRING_*` variables read from the process environment.
    pub fn with_env(self) -> Result<Self, WiringError> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Overlays `WIRING_OPERATOR`, `WIRING_BOOTSTRAP_HOLDER`, `WIRING_BOOTSTRAP_ROLE` and
    /// `WIRING_MODULES` (comma separated) as returned by `lookup`.
    pub fn with_vars(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, WiringError> {
        if let Some(value) = lookup("WIRING_OPERATOR") {
            self.operator = Some(parse_address("WIRING_OPERATOR", &value)?);
        }
        if let Some(value) = lookup("WIRING_BOOTSTRAP_HOLDER") {
            self.bootstrap.holder = Some(parse_address("WIRING_BOOTSTRAP_HOLDER", &value)?);
        }
        if let Some(value) = lookup("WIRING_BOOTSTRAP_ROLE") {
            self.bootstrap.role = RoleId::new(value.trim());
        }
        if let Some(value) = lookup("WIRING_MODULES") {
            self.modules = value
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| {
                    part.parse()
                        .map_err(|e| WiringError::Config(format!("WIRING_MODULES: {}", e)))
                })
                .collect::<Result<_, _>>()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), WiringError> {
        if self.modules.is_empty() {
            return Err(WiringError::Config("no modules configured".to_string()));
        }
        let mut seen = HashSet::new();
        for module in &self.modules {
            if !seen.insert(module) {
                return Err(WiringError::Config(format!("{} listed twice", module)));
            }
        }
        if self.bootstrap.enabled {
            for module in [self.bootstrap.module, self.bootstrap.role_module] {
                if !seen.contains(&module) {
                    return Err(WiringError::Config(format!(
                        "bootstrap uses {} which is not a required module",
                        module
                    )));
                }
            }
        }
        Ok(())
    }

    /// The bootstrap target, if enabled and a holder is known.
    pub fn bootstrap_target(&self) -> Option<BootstrapTarget> {
        let bootstrap = &self.bootstrap;
        if !bootstrap.enabled {
            return None;
        }
        bootstrap.holder.map(|holder| BootstrapTarget {
            module: bootstrap.module,
            role_module: bootstrap.role_module,
            role: bootstrap.role.clone(),
            holder,
        })
    }
}

fn parse_address(key: &str, value: &str) -> Result<Address, WiringError> {
    value
        .trim()
        .parse()
        .map_err(|e| WiringError::Config(format!("{}: {}", key, e)))
}
