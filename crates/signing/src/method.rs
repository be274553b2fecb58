/// How the form produces a signature: the typed seed phrase, a stored
/// session account, or the external browser-extension signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignMethod {
    Seed,
    Account(usize),
    Keeper,
}

impl SignMethod {
    /// Sentinel the account selector uses for "sign with the typed seed".
    pub const SEED_SENTINEL: i64 = -1;

    /// Maps the account selector value to a method: negative values mean
    /// the typed seed, anything else picks the account at that position.
    #[must_use]
    pub const fn from_account_selector(value: i64) -> Self {
        if value < 0 {
            Self::Seed
        } else {
            Self::Account(value as usize)
        }
    }

    /// Inverse of [`Self::from_account_selector`]. `Keeper` has no selector
    /// entry and maps to the seed sentinel.
    #[must_use]
    pub const fn account_selector(self) -> i64 {
        match self {
            Self::Account(index) => index as i64,
            Self::Seed | Self::Keeper => Self::SEED_SENTINEL,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Account(_) => "account",
            Self::Keeper => "wavesKeeper",
        }
    }
}
