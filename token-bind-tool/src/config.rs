use alloy::primitives::{Address, Bytes};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{fs, path::Path};

/// Bind config file as written by the operator.
#[derive(Debug, Clone, Deserialize)]
struct BindConfigFile {
    contract_data: String,
    #[serde(default)]
    symbol: String,
    bep2_symbol: String,
    ledger_account: String,
}

/// Validated bind configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindConfig {
    /// Creation bytecode of the BEP20 contract
    pub contract_data: Bytes,
    /// BEP20 symbol, used for display only
    pub symbol: String,
    /// Symbol of the BEP2 token on the native chain
    pub bep2_symbol: String,
    /// Custodial owner of the token supply and the contract
    pub ledger_account: Address,
}

impl BindConfig {
    /// Load and validate a bind configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&s).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let file: BindConfigFile = serde_json::from_str(s)?;
        file.validate()
    }
}

impl BindConfigFile {
    fn validate(self) -> Result<BindConfig> {
        let code = self
            .contract_data
            .strip_prefix("0x")
            .unwrap_or(&self.contract_data);
        let contract_data = hex::decode(code).context("invalid contract byte code")?;
        if contract_data.is_empty() {
            bail!("invalid contract byte code: empty");
        }
        if self.bep2_symbol.is_empty() {
            bail!("missing bep2 token symbol");
        }
        let ledger_account = parse_bsc_address(&self.ledger_account)
            .context("invalid ledger account")?;

        Ok(BindConfig {
            contract_data: contract_data.into(),
            symbol: self.symbol,
            bep2_symbol: self.bep2_symbol,
            ledger_account,
        })
    }
}

/// Parse an address that must be written as `0x` followed by 40 hex characters.
pub fn parse_bsc_address(value: &str) -> Result<Address> {
    let well_formed = value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if !well_formed {
        bail!(
            "'{value}' is not a bsc address, expected 0x followed by 40 hex characters, like 0x4E656459ed25bF986Eea1196Bc1B00665401645d"
        );
    }
    Ok(value.parse::<Address>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LEDGER: &str = "0x4E656459ed25bF986Eea1196Bc1B00665401645d";

    fn config_json(contract_data: &str, bep2_symbol: Option<&str>, ledger_account: &str) -> String {
        let mut value = serde_json::json!({
            "contract_data": contract_data,
            "symbol": "ABC",
            "ledger_account": ledger_account,
        });
        if let Some(symbol) = bep2_symbol {
            value["bep2_symbol"] = symbol.into();
        }
        value.to_string()
    }

    #[test]
    fn test_valid_config() {
        let config = BindConfig::from_json(&config_json("6080604052", Some("ABC-123"), LEDGER))
            .unwrap();
        assert_eq!(config.contract_data.to_vec(), vec![0x60u8, 0x80, 0x60, 0x40, 0x52]);
        assert_eq!(config.symbol, "ABC");
        assert_eq!(config.bep2_symbol, "ABC-123");
        assert_eq!(config.ledger_account, LEDGER.parse::<Address>().unwrap());
    }

    #[test]
    fn test_prefixed_bytecode_accepted() {
        let config = BindConfig::from_json(&config_json("0x6080", Some("ABC-123"), LEDGER))
            .unwrap();
        assert_eq!(config.contract_data.to_vec(), vec![0x60u8, 0x80]);
    }

    #[test]
    fn test_non_hex_bytecode_rejected() {
        let err = BindConfig::from_json(&config_json("60zz6040", Some("ABC-123"), LEDGER))
            .unwrap_err();
        assert!(err.to_string().contains("invalid contract byte code"));
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        assert!(BindConfig::from_json(&config_json("", Some("ABC-123"), LEDGER)).is_err());
    }

    #[test]
    fn test_missing_bep2_symbol_rejected() {
        let err = BindConfig::from_json(&config_json("6080", None, LEDGER)).unwrap_err();
        assert!(err.to_string().contains("bep2_symbol"));
    }

    #[test]
    fn test_empty_bep2_symbol_rejected() {
        let err = BindConfig::from_json(&config_json("6080", Some(""), LEDGER)).unwrap_err();
        assert!(err.to_string().contains("missing bep2 token symbol"));
    }

    #[test]
    fn test_bad_ledger_account_rejected() {
        for bad in [
            "4E656459ed25bF986Eea1196Bc1B00665401645d",
            "0x4E656459ed25bF986Eea1196Bc1B00665401645",
            "0x4E656459ed25bF986Eea1196Bc1B00665401645d00",
            "0xZZ656459ed25bF986Eea1196Bc1B00665401645d",
            "",
        ] {
            let err = BindConfig::from_json(&config_json("6080", Some("ABC-123"), bad)).unwrap_err();
            assert!(
                err.to_string().contains("invalid ledger account"),
                "expected rejection of {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_bsc_address() {
        let address = parse_bsc_address(LEDGER).unwrap();
        assert_eq!(address, LEDGER.parse::<Address>().unwrap());
        assert!(parse_bsc_address(&LEDGER.to_lowercase()).is_ok());
        assert!(parse_bsc_address("0X4E656459ed25bF986Eea1196Bc1B00665401645d").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config_json("6080", Some("ABC-123"), LEDGER).as_bytes())
            .unwrap();

        let config = BindConfig::load(file.path()).unwrap();
        assert_eq!(config.bep2_symbol, "ABC-123");
    }

    #[test]
    fn test_load_missing_file() {
        let err = BindConfig::load("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
