//! # Module Host
//!
//! `ModuleHost` is the server half of a module kind. It owns every deployed instance of that kind
//! and processes requests one at a time, so each module observes its configuration changes in
//! the exact order they were issued.

use crate::client::HostClient;
use crate::entity::ModuleEntity;
use crate::error::HostError;
use crate::message::HostRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Hosts every deployed instance of one module type.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ModuleHost::new()` returns the host and a cloneable [`HostClient`].
/// 2.  **Wire**: pass the clients of other hosts this module depends on into `run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust,ignore
/// let (host, client) = ModuleHost::<Treasury>::new(32, allocator.next_fn());
/// tokio::spawn(host.run(role_client.clone()));
/// let address = client.deploy(deployer, TreasuryDeploy { role_management }).await?;
/// ```
///
/// Addresses come from the `next_address` closure so several hosts can share one allocator
/// and never hand out the same address twice.
pub struct ModuleHost<T: ModuleEntity> {
    receiver: mpsc::Receiver<HostRequest<T>>,
    store: HashMap<T::Address, T>,
    latest: Option<T::Address>,
    next_address: Box<dyn FnMut() -> T::Address + Send>,
}

impl<T: ModuleEntity> ModuleHost<T> {
    /// Creates a new `ModuleHost` and its associated `HostClient`.
    ///
    /// `buffer_size` is the mailbox capacity. When it is full, client calls wait for space.
    pub fn new(
        buffer_size: usize,
        next_address: impl FnMut() -> T::Address + Send + 'static,
    ) -> (Self, HostClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let host = Self {
            receiver,
            store: HashMap::new(),
            latest: None,
            next_address: Box::new(next_address),
        };
        (host, HostClient::new(sender))
    }

    /// Runs the host's event loop until every client has been dropped.
    ///
    /// `context` is passed to every module hook and typically holds clients of other hosts.
    pub async fn run(mut self, context: T::Context) {
        // "Treasury" instead of "company_backend::model::treasury::Treasury"
        let module_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(module_type, "Host started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                HostRequest::Deploy {
                    deployer,
                    params,
                    respond_to,
                } => {
                    debug!(module_type, %deployer, ?params, "Deploy");
                    let address = (self.next_address)();

                    match T::from_deploy(address.clone(), deployer, params) {
                        Ok(mut module) => {
                            if let Err(e) = module.on_deploy(&context).await {
                                warn!(module_type, error = %e, "on_deploy failed");
                                let _ = respond_to.send(Err(HostError::Reverted(Box::new(e))));
                                continue;
                            }
                            self.store.insert(address.clone(), module);
                            self.latest = Some(address.clone());
                            info!(module_type, %address, deployed = self.store.len(), "Deployed");
                            let _ = respond_to.send(Ok(address));
                        }
                        Err(e) => {
                            warn!(module_type, error = %e, "Deploy failed");
                            let _ = respond_to.send(Err(HostError::Reverted(Box::new(e))));
                        }
                    }
                }
                HostRequest::Deployed { respond_to } => {
                    debug!(module_type, found = self.latest.is_some(), "Deployed lookup");
                    let _ = respond_to.send(Ok(self.latest.clone()));
                }
                HostRequest::Call {
                    address,
                    caller,
                    call,
                    respond_to,
                } => {
                    debug!(module_type, %address, %caller, ?call, "Call");
                    if let Some(module) = self.store.get_mut(&address) {
                        let result = module
                            .handle_call(&caller, call, &context)
                            .await
                            .map_err(|e| HostError::Reverted(Box::new(e)));
                        match &result {
                            Ok(_) => info!(module_type, %address, "Call ok"),
                            Err(e) => warn!(module_type, %address, error = %e, "Call reverted"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(module_type, %address, "Not deployed");
                        let _ = respond_to.send(Err(HostError::NotDeployed(address.to_string())));
                    }
                }
                HostRequest::Query {
                    address,
                    query,
                    respond_to,
                } => {
                    debug!(module_type, %address, ?query, "Query");
                    if let Some(module) = self.store.get(&address) {
                        let result = module
                            .handle_query(query, &context)
                            .await
                            .map_err(|e| HostError::Reverted(Box::new(e)));
                        let _ = respond_to.send(result);
                    } else {
                        warn!(module_type, %address, "Not deployed");
                        let _ = respond_to.send(Err(HostError::NotDeployed(address.to_string())));
                    }
                }
            }
        }

        info!(module_type, deployed = self.store.len(), "Shutdown");
    }
}
