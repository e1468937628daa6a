use crate::error::UnitsError;
use cosmwasm_schema::cw_serde;

/// Account holding the unissued part of the units supply.
pub const GUILD: &str = "0x000000000000000000000000000000000000dEaD";
/// Account whose balance is the whole units supply.
pub const TOTAL: &str = "0x000000000000000000000000000000000000bAbe";
/// Token id of the governance units inside the bank extension.
pub const UNITS: &str = "0x00000000000000000000000000000000000FF1CE";
/// Extension id the registry maps to the bank extension.
pub const BANK_EXTENSION_ID: &str = "bank";

/// Where the direct read path finds the units balances.
#[cw_serde]
pub struct UnitsConfig {
    /// reserved account excluded from issued units.
    pub guild_account: String,
    /// reserved account carrying the total supply.
    pub total_account: String,
    /// token id of the units.
    pub units_token: String,
    /// id passed to the registry to resolve the bank extension.
    pub bank_extension_id: String,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        UnitsConfig {
            guild_account: GUILD.to_string(),
            total_account: TOTAL.to_string(),
            units_token: UNITS.to_string(),
            bank_extension_id: BANK_EXTENSION_ID.to_string(),
        }
    }
}

impl UnitsConfig {
    pub fn validate(&self) -> Result<(), UnitsError> {
        for (field, value) in [
            ("guild_account", &self.guild_account),
            ("total_account", &self.total_account),
            ("units_token", &self.units_token),
            ("bank_extension_id", &self.bank_extension_id),
        ] {
            if value.trim().is_empty() {
                return Err(UnitsError::EmptyConfigValue {
                    field: field.to_string(),
                });
            }
        }

        if self.guild_account.eq_ignore_ascii_case(&self.total_account) {
            return Err(UnitsError::SameGuildAndTotal {});
        }

        Ok(())
    }
}
