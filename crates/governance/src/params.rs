//! Parameter subspaces.
//!
//! A subspace owns one namespace of module parameters. Each parameter lives
//! under its own store key and every write, whether a whole set at genesis or
//! a single key from a proposal, goes through the key's validator first.

use crate::errors::{GovernanceError, Result};
use crate::proposal::ParameterChangeProposal;
use ledger_storage::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Check a candidate value, returning a human readable reason on rejection.
pub type ParamValidator = fn(&Value) -> std::result::Result<(), String>;

/// The keys a subspace accepts and their validators.
#[derive(Clone, Default)]
pub struct KeyTable {
    validators: BTreeMap<&'static str, ParamValidator>,
}

impl fmt::Debug for KeyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.validators.keys()).finish()
    }
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, validator: ParamValidator) -> Self {
        self.validators.insert(key, validator);
        self
    }

    pub fn validator(&self, key: &str) -> Option<ParamValidator> {
        self.validators.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.validators.keys().copied()
    }
}

/// A parameter struct whose serde field names are its parameter keys.
pub trait ParamSet: Serialize + DeserializeOwned {
    fn key_table() -> KeyTable;
}

#[derive(Debug, Clone)]
pub struct ParamSubspace {
    name: String,
    table: KeyTable,
}

impl ParamSubspace {
    pub fn new(name: impl Into<String>, table: KeyTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    pub fn for_set<P: ParamSet>(name: impl Into<String>) -> Self {
        Self::new(name, P::key_table())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn store_key(&self, key: &str) -> Vec<u8> {
        format!("params/{}/{}", self.name, key).into_bytes()
    }

    fn check(&self, key: &str, value: &Value) -> Result<()> {
        let validator = self
            .table
            .validator(key)
            .ok_or_else(|| GovernanceError::UnknownParam {
                subspace: self.name.clone(),
                key: key.to_string(),
            })?;
        validator(value).map_err(|reason| GovernanceError::InvalidParam {
            key: key.to_string(),
            reason,
        })
    }

    pub fn get(&self, ctx: &Context<'_>, key: &str) -> Result<Option<Value>> {
        Ok(ctx.get_json(&self.store_key(key))?)
    }

    pub fn has(&self, ctx: &Context<'_>, key: &str) -> Result<bool> {
        Ok(ctx.store().has(&self.store_key(key))?)
    }

    /// Validate and store a single value.
    pub fn set(&self, ctx: &mut Context<'_>, key: &str, value: &Value) -> Result<()> {
        self.check(key, value)?;
        ctx.set_json(&self.store_key(key), value)?;
        Ok(())
    }

    /// Apply a JSON-encoded value, as carried by parameter-change proposals.
    pub fn update(&self, ctx: &mut Context<'_>, key: &str, raw: &str) -> Result<()> {
        let value: Value = serde_json::from_str(raw).map_err(|e| GovernanceError::InvalidParam {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.set(ctx, key, &value)
    }

    /// Validate every field of `params`, then store them all.
    pub fn set_param_set<P: ParamSet>(&self, ctx: &mut Context<'_>, params: &P) -> Result<()> {
        let fields = match serde_json::to_value(params)? {
            Value::Object(fields) => fields,
            _ => {
                return Err(GovernanceError::InvalidParam {
                    key: self.name.clone(),
                    reason: "parameter set must serialize to an object".to_string(),
                })
            }
        };
        for key in self.table.keys() {
            let value = fields.get(key).ok_or_else(|| GovernanceError::InvalidParam {
                key: key.to_string(),
                reason: "missing from parameter set".to_string(),
            })?;
            self.check(key, value)?;
        }
        for key in self.table.keys() {
            if let Some(value) = fields.get(key) {
                ctx.set_json(&self.store_key(key), value)?;
            }
        }
        Ok(())
    }

    /// Reassemble the typed parameter set from its stored keys.
    pub fn get_param_set<P: ParamSet>(&self, ctx: &Context<'_>) -> Result<P> {
        let mut fields = Map::new();
        for key in self.table.keys() {
            if let Some(value) = self.get(ctx, key)? {
                fields.insert(key.to_string(), value);
            }
        }
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// Registry of the subspaces parameter-change proposals may touch.
#[derive(Debug, Clone, Default)]
pub struct ParamsKeeper {
    subspaces: BTreeMap<String, ParamSubspace>,
}

impl ParamsKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, subspace: ParamSubspace) -> ParamSubspace {
        self.subspaces
            .insert(subspace.name().to_string(), subspace.clone());
        subspace
    }

    pub fn subspace(&self, name: &str) -> Option<&ParamSubspace> {
        self.subspaces.get(name)
    }

    /// Apply every change of an approved proposal, or none of them.
    pub fn handle_parameter_change_proposal(
        &self,
        ctx: &mut Context<'_>,
        proposal: &ParameterChangeProposal,
    ) -> Result<()> {
        ctx.atomic(|ctx| -> Result<()> {
            for change in &proposal.changes {
                let subspace = self
                    .subspace(&change.subspace)
                    .ok_or_else(|| GovernanceError::UnknownSubspace(change.subspace.clone()))?;
                info!(
                    target: "governance",
                    subspace = %change.subspace,
                    key = %change.key,
                    value = %change.value,
                    "attempt to set new parameter value"
                );
                subspace.update(ctx, &change.key, &change.value)?;
            }
            Ok(())
        })
    }
}

/// Validator for non-negative integer parameters.
pub fn validate_u64(value: &Value) -> std::result::Result<(), String> {
    value
        .as_u64()
        .map(|_| ())
        .ok_or_else(|| format!("expected a non-negative integer, got {value}"))
}

/// Validator for boolean parameters.
pub fn validate_bool(value: &Value) -> std::result::Result<(), String> {
    value
        .as_bool()
        .map(|_| ())
        .ok_or_else(|| format!("expected a boolean, got {value}"))
}
