//! # ModuleClient Trait
//!
//! Common interface for module-specific clients: a typed wrapper only has to expose its inner
//! [`HostClient`] and an error mapping to inherit the shared lookups.
use crate::{HostClient, HostError, ModuleEntity};
use async_trait::async_trait;

/// Trait for module-specific clients.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ModuleClient<Treasury> for TreasuryClient {
///     type Error = TreasuryError;
///     fn inner(&self) -> &HostClient<Treasury> { &self.inner }
///     fn map_error(e: HostError) -> Self::Error { TreasuryError::Host(e.reason()) }
/// }
///
/// // deployed() is provided
/// let address = treasury_client.deployed().await?;
/// ```
#[async_trait]
pub trait ModuleClient<T: ModuleEntity>: Send + Sync {
    /// The module-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic `HostClient`.
    fn inner(&self) -> &HostClient<T>;

    /// Map host errors to the module-specific error type.
    fn map_error(e: HostError) -> Self::Error;

    /// Address of the most recent deployment of this module kind.
    #[tracing::instrument(skip(self))]
    async fn deployed(&self) -> Result<Option<T::Address>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().deployed().await.map_err(Self::map_error)
    }
}
