//! Tracked asset symbols.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tracked asset symbol.
///
/// The simulator runs over a closed set of symbols; quotes for anything
/// else are ignored at the feed boundary. Serializes to the bare symbol
/// string so it can key JSON maps in the snapshot schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    Btc,
    Eth,
    Sol,
    Bnb,
    Doge,
    Xrp,
}

impl Asset {
    /// All tracked assets, in the feed's canonical order.
    pub const ALL: [Asset; 6] = [
        Asset::Btc,
        Asset::Eth,
        Asset::Sol,
        Asset::Bnb,
        Asset::Doge,
        Asset::Xrp,
    ];

    /// The symbol string used in snapshots and persisted rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
            Asset::Sol => "SOL",
            Asset::Bnb => "BNB",
            Asset::Doge => "DOGE",
            Asset::Xrp => "XRP",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Asset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BTC" => Ok(Asset::Btc),
            "ETH" => Ok(Asset::Eth),
            "SOL" => Ok(Asset::Sol),
            "BNB" => Ok(Asset::Bnb),
            "DOGE" => Ok(Asset::Doge),
            "XRP" => Ok(Asset::Xrp),
            other => Err(format!("unknown asset symbol: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip() {
        for asset in Asset::ALL {
            assert_eq!(asset.as_str().parse::<Asset>().unwrap(), asset);
        }
    }

    #[test]
    fn test_serde_uses_symbol() {
        let json = serde_json::to_string(&Asset::Btc).unwrap();
        assert_eq!(json, "\"BTC\"");

        let asset: Asset = serde_json::from_str("\"DOGE\"").unwrap();
        assert_eq!(asset, Asset::Doge);
    }

    #[test]
    fn test_unknown_symbol() {
        assert!("LUNA".parse::<Asset>().is_err());
    }
}
