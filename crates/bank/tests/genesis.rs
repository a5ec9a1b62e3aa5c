mod common;

use common::*;
use ledger_bank::{Balance, BankError, BankGenesis, BankParams};
use ledger_storage::{BlockHeader, Context, MemoryStore, SledStore};
use ledger_types::{DenomUnit, Metadata};

fn sample() -> BankGenesis {
    let mut btc = Metadata::new_token("btc", &addr(1).to_string(), 8);
    btc.denom_units = vec![
        DenomUnit::new("btc", 0),
        DenomUnit::new("mbtc", 3),
        DenomUnit::new("kbtc", 6),
    ];
    btc.display = "kbtc".into();
    BankGenesis {
        params: BankParams {
            default_send_enabled: false,
        },
        balances: vec![
            Balance {
                address: addr(1),
                coins: coins("10btc,5stake"),
            },
            Balance {
                address: addr(2),
                coins: coins("7stake"),
            },
        ],
        supply: coins("10btc,12stake"),
        denom_metadata: vec![btc, Metadata::default_native("stake")],
    }
}

#[test]
fn export_reproduces_imported_state() {
    let genesis = sample();
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    bank.init_genesis(&mut ctx, &genesis).unwrap();

    let exported = bank.export_genesis(&ctx).unwrap();
    assert_eq!(exported, genesis);
    assert_eq!(
        serde_json::to_vec(&exported).unwrap(),
        serde_json::to_vec(&genesis).unwrap()
    );
}

#[test]
fn empty_supply_is_derived_from_balances() {
    let mut genesis = sample();
    genesis.supply = ledger_types::Coins::empty();
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    bank.init_genesis(&mut ctx, &genesis).unwrap();
    assert_eq!(bank.get_supplies(&ctx).unwrap().total, coins("10btc,12stake"));
}

#[test]
fn mismatched_supply_is_rejected() {
    let mut genesis = sample();
    genesis.supply = coins("10btc,13stake");
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let err = keeper().init_genesis(&mut ctx, &genesis).unwrap_err();
    assert!(matches!(err, BankError::InvalidGenesis(_)));
}

#[test]
fn genesis_survives_a_sled_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let genesis = sample();
    {
        let mut store = SledStore::open(dir.path(), true).unwrap();
        let mut ctx = Context::new(&mut store, BlockHeader::default());
        keeper().init_genesis(&mut ctx, &genesis).unwrap();
    }
    let mut store = SledStore::open(dir.path(), true).unwrap();
    let ctx = Context::new(&mut store, BlockHeader::default());
    assert_eq!(keeper().export_genesis(&ctx).unwrap(), genesis);
}
