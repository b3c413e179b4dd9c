use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vest_contract::ContractConfig;
use vest_protocol::{DeployPayload, ProtocolError};
use vest_schedule::{Schedule, ScheduleError, ScheduleParams};
use vest_types::{Amount, Principal, Timestamp, TypeError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read deployment file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse deployment file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field}: {source}")]
    InvalidPrincipal {
        field: &'static str,
        #[source]
        source: TypeError,
    },

    #[error("invalid schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),

    #[error("schedule does not fit the wire format: {0}")]
    Encoding(#[from] ProtocolError),
}

/// A deployment file: contract settings plus the `[deployment]` table.
///
/// TOML integers are 64-bit, so amounts are read as `u64` and widened.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeploymentFile {
    /// Falls back to [`ContractConfig::default`] when absent.
    pub min_fee: Option<u64>,
    pub deployment: DeploymentSection,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeploymentSection {
    pub admin: String,
    pub claimer: String,
    pub asset_handle: String,
    pub initial_allocation: u64,
    pub cliff_end: u64,
    pub cliff_numerator: u16,
    pub cliff_denominator: u16,
    pub vesting_period: u64,
    pub distribution_frequency: u64,
}

/// A deployment file with every field parsed and checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub contract: ContractConfig,
    pub admin: Principal,
    pub claimer: Principal,
    pub asset_handle: Principal,
    pub initial_allocation: Amount,
    pub params: ScheduleParams,
}

impl DeploymentFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn resolve(&self) -> Result<Deployment, ConfigError> {
        let d = &self.deployment;
        let contract = match self.min_fee {
            Some(min_fee) => ContractConfig::with_min_fee(Amount::from(min_fee)),
            None => ContractConfig::default(),
        };
        Ok(Deployment {
            contract,
            admin: principal("admin", &d.admin)?,
            claimer: principal("claimer", &d.claimer)?,
            asset_handle: principal("asset_handle", &d.asset_handle)?,
            initial_allocation: Amount::from(d.initial_allocation),
            params: ScheduleParams::new(
                Timestamp::from_secs(d.cliff_end),
                d.cliff_numerator,
                d.cliff_denominator,
                d.vesting_period,
                d.distribution_frequency,
            )?,
        })
    }
}

impl Deployment {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        DeploymentFile::load(path)?.resolve()
    }

    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.params, self.initial_allocation)
    }

    pub fn deploy_payload(&self) -> Result<DeployPayload, ConfigError> {
        Ok(DeployPayload::from_schedule(
            self.initial_allocation,
            self.asset_handle,
            &self.params,
        )?)
    }
}

fn principal(field: &'static str, text: &str) -> Result<Principal, ConfigError> {
    text.parse()
        .map_err(|source| ConfigError::InvalidPrincipal { field, source })
}
