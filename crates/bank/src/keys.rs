//! Store layout of the bank module.

use ledger_storage::{prefixed, StorageError};
use ledger_types::{Address, ADDRESS_BYTES};

pub const BALANCES_PREFIX: &[u8] = b"bank/balances/";
pub const SUPPLY_PREFIX: &[u8] = b"bank/supply/";
pub const DENOM_METADATA_PREFIX: &[u8] = b"bank/denom_metadata/";

pub fn account_balances_prefix(address: &Address) -> Vec<u8> {
    prefixed(BALANCES_PREFIX, address.as_bytes())
}

/// `balances prefix | address | denom`
pub fn balance_key(address: &Address, denom: &str) -> Vec<u8> {
    prefixed(&account_balances_prefix(address), denom.as_bytes())
}

pub fn supply_key(denom: &str) -> Vec<u8> {
    prefixed(SUPPLY_PREFIX, denom.as_bytes())
}

pub fn denom_metadata_key(denom: &str) -> Vec<u8> {
    prefixed(DENOM_METADATA_PREFIX, denom.as_bytes())
}

/// Recover the address and denom from a full balance key.
pub fn split_balance_key(key: &[u8]) -> Result<(Address, String), StorageError> {
    let corrupt = |reason: &str| StorageError::Corrupt {
        key: String::from_utf8_lossy(key).into_owned(),
        reason: reason.to_string(),
    };
    let rest = key
        .strip_prefix(BALANCES_PREFIX)
        .ok_or_else(|| corrupt("missing balances prefix"))?;
    if rest.len() <= ADDRESS_BYTES {
        return Err(corrupt("balance key too short"));
    }
    let (addr, denom) = rest.split_at(ADDRESS_BYTES);
    let mut bytes = [0u8; ADDRESS_BYTES];
    bytes.copy_from_slice(addr);
    let denom = std::str::from_utf8(denom).map_err(|_| corrupt("denom is not utf-8"))?;
    Ok((Address::new(bytes), denom.to_string()))
}
