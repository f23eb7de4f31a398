use crate::adapters::HostResolver;
use crate::clients::{PeerModuleClient, RoleClient, TreasuryClient};
use crate::model::{PeerModule, PeerModuleDeploy};
use crate::{peer_actor, role_actor, treasury_actor};
use module_wiring::{Address, ModuleName, RoleId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Module addresses are allocated from here up, well clear of the local accounts.
const MODULE_ADDRESS_BASE: u64 = 0x1000;

/// Deterministic local accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Accounts {
    /// Deploys and owns every module; the default wiring operator and first board member.
    pub deployer: Address,
    /// Designated holder of the finance director role.
    pub finance_director: Address,
    /// Board member that approves grants proposed by the deployer.
    pub approver: Address,
}

impl Default for Accounts {
    fn default() -> Self {
        Self {
            deployer: Address::from_index(1),
            finance_director: Address::from_index(2),
            approver: Address::from_index(3),
        }
    }
}

/// What a deployment pass produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Deployment {
    pub deployed: BTreeMap<ModuleName, Address>,
    pub skipped: Vec<ModuleName>,
}

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("deploying {module} failed: {reason}")]
    Deploy { module: ModuleName, reason: String },
    #[error("{0} is not deployed")]
    NotDeployed(ModuleName),
    #[error("role grant failed: {0}")]
    Grant(String),
    #[error("Host task failed: {0}")]
    TaskFailed(String),
}

/// All six module hosts, running.
pub struct CompanySystem {
    pub role_client: RoleClient,
    pub treasury_client: TreasuryClient,
    pub peer_clients: HashMap<ModuleName, PeerModuleClient>,
    pub accounts: Accounts,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CompanySystem {
    /// Starts every host. Must be called inside a tokio runtime.
    pub fn start() -> Self {
        // Shared so no two modules, of any kind, ever get the same address
        let counter = Arc::new(AtomicU64::new(MODULE_ADDRESS_BASE));
        let next_address = || {
            let counter = counter.clone();
            move || Address::from_index(counter.fetch_add(1, Ordering::SeqCst))
        };

        let (role_actor, role_client) = role_actor::new(next_address());
        let role_handle = tokio::spawn(role_actor.run(()));

        let (treasury_actor, treasury_client) = treasury_actor::new(next_address());
        let treasury_handle = tokio::spawn(treasury_actor.run(role_client.clone()));

        let mut handles = vec![role_handle, treasury_handle];
        let mut peer_clients = HashMap::new();
        for kind in PeerModule::KINDS {
            let (actor, client) = peer_actor::new(next_address());
            handles.push(tokio::spawn(actor.run(())));
            peer_clients.insert(kind, client);
        }

        info!(hosts = handles.len(), "Company system started");
        Self {
            role_client,
            treasury_client,
            peer_clients,
            accounts: Accounts::default(),
            handles,
        }
    }

    /// A resolver over the latest deployment of each host.
    pub fn resolver(&self) -> HostResolver {
        HostResolver::new(
            self.role_client.clone(),
            self.treasury_client.clone(),
            self.peer_clients.clone(),
        )
    }

    /// Deploys all six modules in deployment order.
    pub async fn deploy_all(&self) -> Result<Deployment, SystemError> {
        self.deploy(&[]).await
    }

    /// Deploys every module except `skip`, in deployment order, as the deployer account.
    ///
    /// A module whose constructor dependency was not deployed is skipped as well.
    pub async fn deploy(&self, skip: &[ModuleName]) -> Result<Deployment, SystemError> {
        let deployer = self.accounts.deployer;
        let mut deployment = Deployment::default();

        for module in ModuleName::ALL {
            if skip.contains(&module) {
                info!(%module, "Deployment skipped on request");
                deployment.skipped.push(module);
                continue;
            }
            if let Some(dependency) = module
                .constructor_dependencies()
                .iter()
                .find(|d| !deployment.deployed.contains_key(*d))
            {
                warn!(%module, %dependency, "Constructor dependency missing, not deploying");
                deployment.skipped.push(module);
                continue;
            }

            let address = self
                .deploy_one(module, deployer, &deployment.deployed)
                .await?;
            deployment.deployed.insert(module, address);
        }
        Ok(deployment)
    }

    /// Deploys one more instance of `module` as `deployer`, using the given constructor
    /// addresses. The new instance becomes the one the resolver returns.
    pub async fn deploy_one(
        &self,
        module: ModuleName,
        deployer: Address,
        constructor: &BTreeMap<ModuleName, Address>,
    ) -> Result<Address, SystemError> {
        let role_management = constructor
            .get(&ModuleName::RoleManagement)
            .copied()
            .unwrap_or(Address::ZERO);
        let result = match module {
            ModuleName::RoleManagement => self
                .role_client
                .deploy(deployer)
                .await
                .map_err(|e| e.to_string()),
            ModuleName::Treasury => self
                .treasury_client
                .deploy(deployer, role_management)
                .await
                .map_err(|e| e.to_string()),
            kind => match self.peer_clients.get(&kind) {
                Some(client) => {
                    let params = PeerModuleDeploy {
                        kind,
                        role_management,
                        treasury: constructor.get(&ModuleName::Treasury).copied(),
                    };
                    client
                        .deploy(deployer, params)
                        .await
                        .map_err(|e| e.to_string())
                }
                None => Err(format!("no host for {}", kind)),
            },
        };

        match result {
            Ok(address) => {
                info!(%module, %address, %deployer, "Deployed");
                Ok(address)
            }
            Err(reason) => {
                error!(%module, %reason, "Deployment failed");
                Err(SystemError::Deploy { module, reason })
            }
        }
    }

    /// Grants `role` to `account` through the board: the deployer proposes and the separate
    /// approver account approves. Adds the approver to the board first if needed.
    pub async fn grant_role_with_independent_approver(
        &self,
        role_management: Address,
        role: &RoleId,
        account: Address,
    ) -> Result<(), SystemError> {
        let Accounts {
            deployer, approver, ..
        } = self.accounts;
        let grant_error = |e: crate::role_actor::RoleError| SystemError::Grant(e.to_string());

        if !self
            .role_client
            .is_board_member(role_management, approver)
            .await
            .map_err(grant_error)?
        {
            self.role_client
                .add_board_member(role_management, deployer, approver)
                .await
                .map_err(grant_error)?;
        }
        self.role_client
            .grant_role_by_board(
                role_management,
                deployer,
                role.clone(),
                account,
                vec![approver],
            )
            .await
            .map_err(grant_error)?;
        info!(%role, %account, proposer = %deployer, %approver, "Role granted");
        Ok(())
    }

    /// Drops every client and waits for the hosts to stop. Any other clone of a client
    /// (resolvers, adapters) must be dropped first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down company system");
        drop(self.role_client);
        drop(self.treasury_client);
        drop(self.peer_clients);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Host task failed");
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }
        info!("Company system stopped");
        Ok(())
    }
}
