//! Ledger identifiers and amounts.
//!
//! `ActorAddress` is the player's on-ledger identity, `Lamports` is the
//! ledger's base unit, and `TransactionSignature` identifies a submitted
//! transaction while its confirmation is awaited.

use crate::errors::{FrontierError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of lamports in one whole coin.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

fn is_base58(text: &str) -> bool {
    text.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// Public address of an actor on the ledger (base58 text of a 32-byte key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActorAddress(String);

impl ActorAddress {
    /// Shortest base58 encoding of a 32-byte key.
    pub const MIN_LEN: usize = 32;
    /// Longest base58 encoding of a 32-byte key.
    pub const MAX_LEN: usize = 44;

    /// Parse and validate an address.
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        let len = address.len();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(FrontierError::invalid(format!(
                "address must be {}..={} characters, got {len}",
                Self::MIN_LEN,
                Self::MAX_LEN
            )));
        }
        if !is_base58(&address) {
            return Err(FrontierError::invalid(format!(
                "address is not base58: {address}"
            )));
        }
        Ok(Self(address))
    }

    /// Get the address string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ActorAddress {
    type Err = FrontierError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ActorAddress {
    type Error = FrontierError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ActorAddress> for String {
    fn from(address: ActorAddress) -> Self {
        address.0
    }
}

/// Amount in the ledger's base unit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Lamports(u64);

impl Lamports {
    /// Zero lamports.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw lamport count.
    pub const fn new(lamports: u64) -> Self {
        Self(lamports)
    }

    /// Convert a whole-coin amount (e.g. `0.25`) to lamports, rounding to
    /// the nearest lamport.
    pub fn from_sol(sol: f64) -> Result<Self> {
        if !sol.is_finite() || sol < 0.0 {
            return Err(FrontierError::invalid(format!(
                "coin amount must be finite and non-negative, got {sol}"
            )));
        }
        let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
        if lamports > u64::MAX as f64 {
            return Err(FrontierError::invalid(format!(
                "coin amount {sol} overflows lamports"
            )));
        }
        Ok(Self(lamports as u64))
    }

    /// Raw lamport count.
    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Lamports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / LAMPORTS_PER_SOL;
        let frac = self.0 % LAMPORTS_PER_SOL;
        if frac == 0 {
            return write!(f, "{whole} SOL");
        }
        let frac = format!("{frac:09}");
        write!(f, "{whole}.{} SOL", frac.trim_end_matches('0'))
    }
}

impl From<u64> for Lamports {
    fn from(lamports: u64) -> Self {
        Self(lamports)
    }
}

/// Signature identifying a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionSignature(String);

impl TransactionSignature {
    /// Wrap a signature returned by the ledger.
    pub fn new(signature: impl Into<String>) -> Self {
        Self(signature.into())
    }

    /// Get the signature string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger commitment level a read or confirmation waits for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    /// Wire name of the commitment level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }

    /// Parse a wire-level confirmation status.
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            "processed" => Some(Self::Processed),
            "confirmed" => Some(Self::Confirmed),
            "finalized" => Some(Self::Finalized),
            _ => None,
        }
    }

    /// Whether a reported confirmation status meets this commitment.
    pub fn is_satisfied_by(self, status: &str) -> bool {
        Self::from_status(status).is_some_and(|reached| reached >= self)
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ADDRESS: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

    #[test]
    fn address_accepts_base58_key() {
        let address = ActorAddress::new(ADDRESS).unwrap();
        assert_eq!(address.as_str(), ADDRESS);
        assert_eq!(address.to_string(), ADDRESS);
    }

    #[test]
    fn address_rejects_bad_alphabet_and_length() {
        assert_matches!(
            ActorAddress::new("0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl"),
            Err(FrontierError::Invalid { .. })
        );
        assert_matches!(ActorAddress::new("abc"), Err(FrontierError::Invalid { .. }));
    }

    #[test]
    fn address_deserializes_with_validation() {
        let ok: ActorAddress = serde_json::from_str(&format!("\"{ADDRESS}\"")).unwrap();
        assert_eq!(ok.as_str(), ADDRESS);
        assert!(serde_json::from_str::<ActorAddress>("\"short\"").is_err());
    }

    #[test]
    fn lamports_convert_from_sol() {
        assert_eq!(Lamports::from_sol(0.25).unwrap(), Lamports::new(250_000_000));
        assert_eq!(Lamports::from_sol(0.1).unwrap(), Lamports::new(100_000_000));
        assert!(Lamports::from_sol(-1.0).is_err());
        assert!(Lamports::from_sol(f64::NAN).is_err());
    }

    #[test]
    fn lamports_display_trims_fraction() {
        assert_eq!(Lamports::new(250_000_000).to_string(), "0.25 SOL");
        assert_eq!(Lamports::new(2 * LAMPORTS_PER_SOL).to_string(), "2 SOL");
        assert_eq!(Lamports::new(1).to_string(), "0.000000001 SOL");
    }

    #[test]
    fn commitment_ordering_matches_finality() {
        assert!(Commitment::Confirmed.is_satisfied_by("finalized"));
        assert!(Commitment::Confirmed.is_satisfied_by("confirmed"));
        assert!(!Commitment::Confirmed.is_satisfied_by("processed"));
        assert!(!Commitment::Finalized.is_satisfied_by("bogus"));
    }
}
