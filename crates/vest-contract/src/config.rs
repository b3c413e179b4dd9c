use serde::{Deserialize, Serialize};
use vest_types::Amount;

/// Minimum attached value for both operations, in smallest native units.
pub const DEFAULT_MIN_FEE: Amount = 50_000_000;

/// Configuration for a lockup contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Value an inbound Claim or ServiceMessage must carry to be processed.
    pub min_fee: Amount,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            min_fee: DEFAULT_MIN_FEE,
        }
    }
}

impl ContractConfig {
    pub fn with_min_fee(min_fee: Amount) -> Self {
        Self { min_fee }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_min_fee() {
        assert_eq!(ContractConfig::default().min_fee, 50_000_000);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: ContractConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ContractConfig::default());
        let config: ContractConfig = serde_json::from_str(r#"{"min_fee": 7}"#).unwrap();
        assert_eq!(config.min_fee, 7);
    }
}
