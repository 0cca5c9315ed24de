use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque version marker for a stored item.
///
/// A writer must present the token it last observed for an item in order to
/// update it. The store issues a new token on every successful write; tokens
/// from one store are strictly increasing and never repeat.
///
/// [`CasToken::ZERO`] is never issued by a store. Clients conventionally send
/// it when writing a key they expect to be new (the token is ignored for
/// absent keys).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CasToken(u64);

impl CasToken {
    /// The zero token. Never issued for a stored item.
    pub const ZERO: CasToken = CasToken(0);

    /// Wrap a raw token value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw token value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns `true` for [`CasToken::ZERO`].
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for CasToken {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<CasToken> for u64 {
    fn from(token: CasToken) -> Self {
        token.0
    }
}

impl FromStr for CasToken {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| TypeError::InvalidCas(format!("{s:?}: {e}")))
    }
}

impl fmt::Display for CasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CasToken({})", self.0)
    }
}
