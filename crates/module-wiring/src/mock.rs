//! # Test Doubles
//!
//! In-memory modules and a resolver that record every call into a shared [`CallLog`].
//!
//! ```rust
//! use module_wiring::mock::{CallLog, MockResolver};
//! use module_wiring::ModuleName;
//!
//! let log = CallLog::default();
//! let resolver = MockResolver::with_all_modules(log.clone());
//! resolver.remove(ModuleName::Treasury);
//! assert!(resolver.module(ModuleName::Treasury).is_none());
//! assert_eq!(log.setter_calls(), 0);
//! ```

use crate::address::{Address, RoleId};
use crate::module::ModuleName;
use crate::ports::{
    DeployedModule, ModuleResolver, PrivilegedSlot, Rejection, Resolution, RoleDirectory,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One recorded interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Resolve(ModuleName),
    SetPeer {
        module: ModuleName,
        peer: ModuleName,
        address: Address,
        operator: Address,
    },
    HasRole {
        role: RoleId,
        account: Address,
    },
    PrivilegedReference,
    SetPrivilegedReference {
        operator: Address,
        account: Address,
    },
}

/// Shared, ordered record of calls across all mocks of a test.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn record(&self, call: Call) {
        lock(&self.0).push(call);
    }

    pub fn entries(&self) -> Vec<Call> {
        lock(&self.0).clone()
    }

    pub fn clear(&self) {
        lock(&self.0).clear();
    }

    /// `(source, target)` of every peer setter call, in order.
    pub fn peer_setters(&self) -> Vec<(ModuleName, ModuleName)> {
        lock(&self.0)
            .iter()
            .filter_map(|call| match call {
                Call::SetPeer { module, peer, .. } => Some((*module, *peer)),
                _ => None,
            })
            .collect()
    }

    /// Number of state-changing calls of any kind.
    pub fn setter_calls(&self) -> usize {
        lock(&self.0)
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::SetPeer { .. } | Call::SetPrivilegedReference { .. }
                )
            })
            .count()
    }

    pub fn privileged_setter_calls(&self) -> usize {
        lock(&self.0)
            .iter()
            .filter(|call| matches!(call, Call::SetPrivilegedReference { .. }))
            .count()
    }
}

/// A scriptable module.
pub struct MockModule {
    name: ModuleName,
    address: Address,
    log: CallLog,
    peers: Mutex<HashMap<ModuleName, Address>>,
    rejections: Mutex<HashMap<ModuleName, String>>,
    roles: Option<Mutex<HashSet<(RoleId, Address)>>>,
    slot: Option<Mutex<Option<Address>>>,
    slot_rejection: Mutex<Option<String>>,
}

impl MockModule {
    pub fn new(name: ModuleName, address: Address, log: CallLog) -> Self {
        Self {
            name,
            address,
            log,
            peers: Mutex::new(HashMap::new()),
            rejections: Mutex::new(HashMap::new()),
            roles: None,
            slot: None,
            slot_rejection: Mutex::new(None),
        }
    }

    /// Exposes [`RoleDirectory`] with no roles granted.
    pub fn with_role_directory(mut self) -> Self {
        self.roles = Some(Mutex::new(HashSet::new()));
        self
    }

    /// Exposes [`PrivilegedSlot`] holding `current`.
    pub fn with_privileged_slot(mut self, current: Option<Address>) -> Self {
        self.slot = Some(Mutex::new(current));
        self
    }

    /// Rejects `set_peer_address` for `peer` with `reason` until [`MockModule::accept_peer`].
    pub fn reject_peer(&self, peer: ModuleName, reason: impl Into<String>) {
        lock(&self.rejections).insert(peer, reason.into());
    }

    pub fn accept_peer(&self, peer: ModuleName) {
        lock(&self.rejections).remove(&peer);
    }

    /// Rejects the privileged setter with `reason`.
    pub fn reject_privileged_reference(&self, reason: impl Into<String>) {
        *lock(&self.slot_rejection) = Some(reason.into());
    }

    /// Simulates a grant made outside the orchestrator.
    pub fn grant_role(&self, role: &RoleId, account: Address) {
        if let Some(roles) = &self.roles {
            lock(roles).insert((role.clone(), account));
        }
    }

    pub fn peer(&self, peer: ModuleName) -> Option<Address> {
        lock(&self.peers).get(&peer).copied()
    }

    pub fn current_privileged_reference(&self) -> Option<Address> {
        self.slot.as_ref().and_then(|slot| *lock(slot))
    }
}

#[async_trait]
impl DeployedModule for MockModule {
    fn name(&self) -> ModuleName {
        self.name
    }

    fn address(&self) -> Address {
        self.address
    }

    async fn set_peer_address(
        &self,
        operator: Address,
        peer: ModuleName,
        address: Address,
    ) -> Result<(), Rejection> {
        self.log.record(Call::SetPeer {
            module: self.name,
            peer,
            address,
            operator,
        });
        if let Some(reason) = lock(&self.rejections).get(&peer) {
            return Err(Rejection::new(reason.clone()));
        }
        lock(&self.peers).insert(peer, address);
        Ok(())
    }

    fn role_directory(&self) -> Option<&dyn RoleDirectory> {
        self.roles.as_ref().map(|_| self as &dyn RoleDirectory)
    }

    fn privileged_slot(&self) -> Option<&dyn PrivilegedSlot> {
        self.slot.as_ref().map(|_| self as &dyn PrivilegedSlot)
    }
}

#[async_trait]
impl RoleDirectory for MockModule {
    async fn has_role(&self, role: &RoleId, account: Address) -> Result<bool, Rejection> {
        self.log.record(Call::HasRole {
            role: role.clone(),
            account,
        });
        let roles = self
            .roles
            .as_ref()
            .ok_or_else(|| Rejection::new("not a role directory"))?;
        Ok(lock(roles).contains(&(role.clone(), account)))
    }
}

#[async_trait]
impl PrivilegedSlot for MockModule {
    async fn privileged_reference(&self) -> Result<Option<Address>, Rejection> {
        self.log.record(Call::PrivilegedReference);
        let slot = self
            .slot
            .as_ref()
            .ok_or_else(|| Rejection::new("no privileged slot"))?;
        Ok(*lock(slot))
    }

    async fn set_initial_privileged_reference(
        &self,
        operator: Address,
        account: Address,
    ) -> Result<(), Rejection> {
        self.log
            .record(Call::SetPrivilegedReference { operator, account });
        if let Some(reason) = lock(&self.slot_rejection).clone() {
            return Err(Rejection::new(reason));
        }
        let slot = self
            .slot
            .as_ref()
            .ok_or_else(|| Rejection::new("no privileged slot"))?;
        let mut current = lock(slot);
        if (*current).is_some_and(|holder| !holder.is_zero()) {
            return Err(Rejection::new("already initialized"));
        }
        *current = Some(account);
        Ok(())
    }
}

/// Resolves from an in-memory table of [`MockModule`]s.
pub struct MockResolver {
    log: CallLog,
    modules: Mutex<HashMap<ModuleName, Arc<MockModule>>>,
}

impl MockResolver {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            modules: Mutex::new(HashMap::new()),
        }
    }

    /// All six modules at addresses `1..=6` in deployment order. RoleManagement answers role
    /// queries and Treasury holds an empty privileged slot.
    pub fn with_all_modules(log: CallLog) -> Self {
        let resolver = Self::new(log.clone());
        for (i, name) in ModuleName::ALL.into_iter().enumerate() {
            let mut module = MockModule::new(name, Address::from_index(i as u64 + 1), log.clone());
            if name == ModuleName::RoleManagement {
                module = module.with_role_directory();
            }
            if name == ModuleName::Treasury {
                module = module.with_privileged_slot(None);
            }
            resolver.insert(Arc::new(module));
        }
        resolver
    }

    pub fn insert(&self, module: Arc<MockModule>) {
        lock(&self.modules).insert(module.name(), module);
    }

    pub fn remove(&self, name: ModuleName) -> Option<Arc<MockModule>> {
        lock(&self.modules).remove(&name)
    }

    pub fn module(&self, name: ModuleName) -> Option<Arc<MockModule>> {
        lock(&self.modules).get(&name).cloned()
    }
}

#[async_trait]
impl ModuleResolver for MockResolver {
    async fn resolve(&self, name: ModuleName) -> Resolution {
        self.log.record(Call::Resolve(name));
        match self.module(name) {
            Some(module) => Resolution::Found(module),
            None => Resolution::missing(format!("no deployment recorded for {}", name)),
        }
    }
}
