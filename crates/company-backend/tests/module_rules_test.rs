use company_backend::lifecycle::CompanySystem;
use company_backend::model::{PeerBookError, PeerModuleDeploy};
use company_backend::peer_actor::PeerModuleError;
use company_backend::role_actor::RoleError;
use company_backend::treasury_actor::TreasuryError;
use module_wiring::{Address, ModuleName, RoleId};

const STRANGER: Address = Address::new([0xee; 20]);

/// Real hosts, every module deployed by the deployer account.
async fn deployed() -> (CompanySystem, std::collections::BTreeMap<ModuleName, Address>) {
    let system = CompanySystem::start();
    let deployment = system.deploy_all().await.expect("deployment failed");
    (system, deployment.deployed)
}

#[tokio::test]
async fn test_deploy_all_assigns_unique_addresses() {
    let (system, deployed) = deployed().await;

    assert_eq!(deployed.len(), 6);
    let mut addresses: Vec<_> = deployed.values().copied().collect();
    addresses.sort();
    addresses.dedup();
    assert_eq!(addresses.len(), 6);

    // Each peer host holds a module of its own kind
    for (kind, client) in &system.peer_clients {
        assert_eq!(client.kind(deployed[kind]).await.unwrap(), *kind);
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_skipping_treasury_skips_its_dependents() {
    let system = CompanySystem::start();

    let deployment = system.deploy(&[ModuleName::Treasury]).await.unwrap();

    assert_eq!(
        deployment.skipped,
        vec![
            ModuleName::Treasury,
            ModuleName::SupplierOrders,
            ModuleName::CustomerOrders
        ]
    );
    assert!(deployment
        .deployed
        .contains_key(&ModuleName::WarehouseInventory));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_peer_module_requires_constructor_addresses() {
    let system = CompanySystem::start();
    let client = &system.peer_clients[&ModuleName::CustomerOrders];

    let err = client
        .deploy(
            system.accounts.deployer,
            PeerModuleDeploy {
                kind: ModuleName::CustomerOrders,
                role_management: Address::from_index(0x1000),
                treasury: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PeerModuleError::MissingConstructorArgument(ModuleName::Treasury)
    );

    let err = client
        .deploy(
            system.accounts.deployer,
            PeerModuleDeploy {
                kind: ModuleName::Treasury,
                role_management: Address::from_index(0x1000),
                treasury: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, PeerModuleError::UnsupportedKind(ModuleName::Treasury));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_setters_are_owner_only_and_reject_zero() {
    let (system, deployed) = deployed().await;
    let deployer = system.accounts.deployer;
    let warehouse = deployed[&ModuleName::WarehouseInventory];
    let store = deployed[&ModuleName::StoreInventory];
    let client = &system.peer_clients[&ModuleName::WarehouseInventory];

    let err = client
        .set_peer(warehouse, STRANGER, ModuleName::StoreInventory, store)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PeerModuleError::PeerBook(PeerBookError::Unauthorized { caller: STRANGER })
    );
    assert_eq!(err.to_string(), "unauthorized caller");

    let err = client
        .set_peer(warehouse, deployer, ModuleName::StoreInventory, Address::ZERO)
        .await
        .unwrap_err();
    assert_eq!(err, PeerModuleError::PeerBook(PeerBookError::ZeroAddress));

    // Overwriting with the same value succeeds every time
    for _ in 0..2 {
        client
            .set_peer(warehouse, deployer, ModuleName::StoreInventory, store)
            .await
            .unwrap();
    }
    assert_eq!(
        client
            .peer(warehouse, ModuleName::StoreInventory)
            .await
            .unwrap(),
        Some(store)
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_board_grant_rules() {
    let (system, deployed) = deployed().await;
    let accounts = system.accounts;
    let rm = deployed[&ModuleName::RoleManagement];
    let role = RoleId::finance_director();
    let roles = &system.role_client;

    // Self-approval
    let err = roles
        .grant_role_by_board(
            rm,
            accounts.deployer,
            role.clone(),
            accounts.finance_director,
            vec![accounts.deployer],
        )
        .await
        .unwrap_err();
    assert_eq!(err, RoleError::SelfApproval);

    // Approver not on the board yet
    let err = roles
        .grant_role_by_board(
            rm,
            accounts.deployer,
            role.clone(),
            accounts.finance_director,
            vec![accounts.approver],
        )
        .await
        .unwrap_err();
    assert_eq!(err, RoleError::ApproverNotOnBoard(accounts.approver));

    // Proposer not on the board
    let err = roles
        .grant_role_by_board(
            rm,
            STRANGER,
            role.clone(),
            accounts.finance_director,
            vec![accounts.deployer],
        )
        .await
        .unwrap_err();
    assert_eq!(err, RoleError::NotBoardMember(STRANGER));

    // Only the owner can extend the board
    let err = roles
        .add_board_member(rm, STRANGER, STRANGER)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "unauthorized caller");

    assert!(!roles
        .has_role(rm, role.clone(), accounts.finance_director)
        .await
        .unwrap());

    system
        .grant_role_with_independent_approver(rm, &role, accounts.finance_director)
        .await
        .unwrap();
    assert!(roles
        .has_role(rm, role.clone(), accounts.finance_director)
        .await
        .unwrap());
    assert!(roles.is_board_member(rm, accounts.approver).await.unwrap());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_finance_director_is_set_once_and_requires_role() {
    let (system, deployed) = deployed().await;
    let accounts = system.accounts;
    let rm = deployed[&ModuleName::RoleManagement];
    let treasury = deployed[&ModuleName::Treasury];
    let client = &system.treasury_client;

    let err = client
        .set_initial_finance_director(treasury, accounts.deployer, accounts.finance_director)
        .await
        .unwrap_err();
    assert_eq!(err, TreasuryError::MissingRole(accounts.finance_director));

    system
        .grant_role_with_independent_approver(
            rm,
            &RoleId::finance_director(),
            accounts.finance_director,
        )
        .await
        .unwrap();

    let err = client
        .set_initial_finance_director(treasury, STRANGER, accounts.finance_director)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "unauthorized caller");

    client
        .set_initial_finance_director(treasury, accounts.deployer, accounts.finance_director)
        .await
        .unwrap();
    assert_eq!(
        client.finance_director(treasury).await.unwrap(),
        Some(accounts.finance_director)
    );

    let err = client
        .set_initial_finance_director(treasury, accounts.deployer, accounts.approver)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TreasuryError::FinanceDirectorAlreadySet(accounts.finance_director)
    );

    system.shutdown().await.unwrap();
}
