//! TurboSwift AST Types - contracts, fields and methods
//!
//! All AST types are immutable after parsing and derive
//! Debug, Clone, PartialEq, Eq, Serialize, Deserialize.
//! Maps are BTreeMaps so JSON output and fingerprints are deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::tokenizer::Token;
use crate::{Error, Result, RunConfig};

/// Type label recorded when a `var` has no `: Type` annotation
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Return label recorded when a `func` has no `-> Type` clause
pub const VOID_TYPE: &str = "Void";

/// Field visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Private,
}

impl Access {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Access::Public),
            "private" => Some(Access::Private),
            _ => None,
        }
    }
}

/// A declared field; `value` is always `None` after parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDecl {
    pub access: Access,
    #[serde(rename = "type")]
    pub type_label: String,
    pub value: Option<String>,
}

/// A method: signature plus the raw, brace-balanced body tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Func {
    pub name: String,
    pub access: Access,
    pub params: Vec<String>,
    pub return_type: String,
    pub body: Vec<Token>,
}

/// A named declaration unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub name: String,
    pub vars: BTreeMap<String, VarDecl>,
    pub methods: BTreeMap<String, Func>,
    /// alias → module name
    pub imports: BTreeMap<String, String>,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Contract {
            name: name.into(),
            vars: BTreeMap::new(),
            methods: BTreeMap::new(),
            imports: BTreeMap::new(),
        }
    }

    pub fn method(&self, name: &str) -> Option<&Func> {
        self.methods.get(name)
    }
}

/// Every contract of one loaded program, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub contracts: BTreeMap<String, Contract>,
}

impl Program {
    pub fn contract(&self, name: &str) -> Option<&Contract> {
        self.contracts.get(name)
    }

    /// Resolve the configured entry contract and method
    pub fn entry(&self, config: &RunConfig) -> Result<(&Contract, &Func)> {
        let contract = self
            .contract(&config.entry_contract)
            .ok_or_else(|| Error::MissingEntryContract(config.entry_contract.clone()))?;
        let func = contract
            .method(&config.entry_method)
            .ok_or_else(|| Error::MissingEntryMethod {
                contract: contract.name.clone(),
                method: config.entry_method.clone(),
            })?;
        Ok((contract, func))
    }

    /// SHA-256 of the canonical JSON form of the AST
    pub fn fingerprint(&self) -> String {
        // BTreeMap ordering makes the serialized form canonical
        let canonical = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
