//! Defaults for CLI flags and on-disk artifacts.

/// Keystore directory holding the temporary signing account
pub const DEFAULT_KEYSTORE_PATH: &str = "bind_keystore";

/// Passphrase protecting the temporary account's key file
pub const DEFAULT_KEYSTORE_PASSWORD: &str = "12345678";

/// Shell script receiving the derived Ledger addresses
pub const DEFAULT_LEDGER_ACCOUNTS_FILE: &str = "ledger_accounts.sh";

/// Variable name of the exported Ledger address array
pub const LEDGER_ACCOUNTS_VAR: &str = "LEDGER_ACCOUNTS";
