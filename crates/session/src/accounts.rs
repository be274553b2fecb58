use bip39::{Language, Mnemonic};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// A signing identity kept in the session: a display label, the seed phrase
/// used to derive keys, and whether this account is preselected for signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub label: String,
    pub seed: String,
    pub default: bool,
}

/// Ordered account registry. At most one account carries the default flag
/// after any `set_default` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsStore {
    pub accounts: Vec<Account>,
}

impl AccountsStore {
    /// Registry seeded for a fresh session: one generated default account.
    pub fn stock() -> Result<Self> {
        Ok(Self {
            accounts: vec![Account {
                label: "Account 1".to_string(),
                seed: generate_seed_phrase()?,
                default: true,
            }],
        })
    }

    pub fn add(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Reassigns every account's default flag in one pass; only the account
    /// at `index` ends up marked.
    pub fn set_default(&mut self, index: usize) {
        for (i, account) in self.accounts.iter_mut().enumerate() {
            account.default = i == index;
        }
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.accounts.len() {
            return false;
        }
        self.accounts.remove(index);
        true
    }

    pub fn set_label(&mut self, index: usize, label: &str) -> bool {
        let Some(account) = self.accounts.get_mut(index) else {
            return false;
        };
        account.label = label.to_string();
        true
    }

    pub fn set_seed(&mut self, index: usize, seed: &str) -> bool {
        let Some(account) = self.accounts.get_mut(index) else {
            return false;
        };
        account.seed = seed.to_string();
        true
    }

    #[must_use]
    pub fn default_account(&self) -> Option<&Account> {
        self.accounts.iter().find(|account| account.default)
    }

    #[must_use]
    pub fn default_account_index(&self) -> Option<usize> {
        self.accounts.iter().position(|account| account.default)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Account> {
        self.accounts.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Builds a non-default account with a freshly generated seed phrase.
pub fn generate_account(label: &str) -> Result<Account> {
    Ok(Account {
        label: label.to_string(),
        seed: generate_seed_phrase()?,
        default: false,
    })
}

/// Generates a 12-word BIP-39 seed phrase from 128 bits of entropy.
pub fn generate_seed_phrase() -> Result<String> {
    let entropy: [u8; 16] = rand::random();
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|err| SessionError::SeedGeneration(err.to_string()))?;
    Ok(mnemonic.to_string())
}
