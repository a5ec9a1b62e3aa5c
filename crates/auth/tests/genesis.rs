use ledger_auth::{
    Account, AccountKeeper, AuthError, AuthGenesis, BaseAccount, DelayedVestingAccount,
    ModuleAccount, ModuleAccountRegistry, Permission, StoreAccountKeeper,
};
use ledger_storage::{BlockHeader, Context, MemoryStore};
use ledger_types::Address;
use std::sync::Arc;

fn keeper() -> StoreAccountKeeper {
    StoreAccountKeeper::new(Arc::new(ModuleAccountRegistry::new([(
        "bonded_tokens_pool",
        &[Permission::Burner, Permission::Staking][..],
    )])))
}

#[test]
fn genesis_round_trips_in_address_order() {
    let genesis = AuthGenesis {
        accounts: vec![
            Account::Base(BaseAccount {
                address: Address::new([9; 32]),
                account_number: 4,
                sequence: 2,
            }),
            Account::DelayedVesting(DelayedVestingAccount::new(
                BaseAccount {
                    address: Address::new([3; 32]),
                    account_number: 1,
                    sequence: 0,
                },
                "50stake".parse().unwrap(),
                86_400,
            )),
        ],
    };

    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let keeper = keeper();
    keeper.init_genesis(&mut ctx, &genesis).unwrap();

    let exported = keeper.export_genesis(&ctx).unwrap();
    let mut expected = genesis.accounts.clone();
    expected.sort_by_key(|a| a.address());
    assert_eq!(exported.accounts, expected);

    let fresh = keeper
        .new_account_with_address(&mut ctx, &Address::new([5; 32]))
        .unwrap();
    assert_eq!(fresh.account_number(), 5);
}

#[test]
fn duplicate_accounts_are_rejected() {
    let account = Account::new_base(Address::new([1; 32]));
    let genesis = AuthGenesis {
        accounts: vec![account.clone(), account],
    };
    assert!(matches!(
        genesis.validate(),
        Err(AuthError::DuplicateAccount(_))
    ));
}

#[test]
fn plain_account_at_module_address_is_rejected() {
    let keeper = keeper();
    let genesis = AuthGenesis {
        accounts: vec![Account::new_base(Address::for_module("bonded_tokens_pool"))],
    };

    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    assert!(matches!(
        keeper.init_genesis(&mut ctx, &genesis),
        Err(AuthError::InvalidGenesis(_))
    ));
    assert!(keeper.get_all_accounts(&ctx).unwrap().is_empty());
}

#[test]
fn module_account_must_match_registration() {
    let keeper = keeper();
    let module = |name: &str, permissions: Vec<Permission>| {
        Account::Module(ModuleAccount {
            base: BaseAccount::new(Address::for_module(name)),
            name: name.to_string(),
            permissions,
        })
    };

    let wrong_permissions = AuthGenesis {
        accounts: vec![module("bonded_tokens_pool", vec![Permission::Minter])],
    };
    assert!(matches!(
        wrong_permissions.validate_modules(keeper.registry()),
        Err(AuthError::InvalidGenesis(_))
    ));

    let unregistered = AuthGenesis {
        accounts: vec![module("token", vec![Permission::Minter])],
    };
    assert!(matches!(
        unregistered.validate_modules(keeper.registry()),
        Err(AuthError::InvalidGenesis(_))
    ));

    let registered = AuthGenesis {
        accounts: vec![module(
            "bonded_tokens_pool",
            vec![Permission::Staking, Permission::Burner],
        )],
    };
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    keeper.init_genesis(&mut ctx, &registered).unwrap();
    let account = keeper
        .get_module_account(&mut ctx, "bonded_tokens_pool")
        .unwrap()
        .unwrap();
    assert!(account.has_permission(Permission::Staking));
}
