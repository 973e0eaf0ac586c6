//! Asset amounts and their two binary encodings.
//!
//! An asset travels as text, `"<decimal> <SYMBOL>"`, and is encoded as a
//! fixed-point 64-bit amount. The precision is implied by the symbol: 6
//! for `VESTS`, 3 for everything else.
//!
//! # Legacy encoding (default)
//!
//! | Field     | Size                                   |
//! |-----------|----------------------------------------|
//! | amount    | 8 bytes (LE, signed)                   |
//! | precision | 1 byte                                 |
//! | symbol    | 7 bytes, NUL-padded, `HIVE`->`STEEM`, `HBD`->`SBD` |
//!
//! # NAI encoding
//!
//! | Field     | Size                                   |
//! |-----------|----------------------------------------|
//! | amount    | 8 bytes (LE, signed)                   |
//! | asset num | 4 bytes (LE), `((99999999 + k) << 5) \| precision` |

use std::fmt;
use std::str::FromStr;

use hive_primitives::util::HiveWriter;

use crate::TransactionError;

/// Width of the legacy symbol field.
const LEGACY_SYMBOL_LEN: usize = 7;

/// Precision of the vesting token.
const VESTS_PRECISION: u8 = 6;

/// Precision of the liquid and stable tokens.
const DEFAULT_PRECISION: u8 = 3;

/// Asset number of HBD in the NAI encoding.
pub const NAI_HBD: u32 = 3_200_000_003;

/// Asset number of HIVE in the NAI encoding.
pub const NAI_HIVE: u32 = 3_200_000_035;

/// Asset number of VESTS in the NAI encoding.
pub const NAI_VESTS: u32 = 3_200_000_070;

/// Which binary layout assets are written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetEncoding {
    /// 7-byte legacy symbol with the `STEEM`/`SBD` remap.
    #[default]
    Legacy,
    /// 4-byte numeric asset identifier.
    Nai,
}

/// A parsed asset amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    /// Amount in the smallest unit, e.g. `1000` for `"1.000 HIVE"`.
    pub amount: i64,
    /// Digits after the decimal point.
    pub precision: u8,
    /// Symbol as written, before any legacy remap.
    pub symbol: String,
}

impl Asset {
    /// Parse `"<decimal> <SYMBOL>"`.
    ///
    /// The fractional part is right-padded with zeros or truncated to the
    /// symbol's precision. Fails with `InvalidAsset` unless the input is
    /// exactly two space-separated parts with a numeric amount containing
    /// at most one `.`.
    pub fn parse(s: &str) -> Result<Self, TransactionError> {
        let parts: Vec<&str> = s.split(' ').collect();
        let (amount_str, symbol) = match parts.as_slice() {
            [amount, symbol] if !amount.is_empty() && !symbol.is_empty() => (*amount, *symbol),
            _ => {
                return Err(TransactionError::InvalidAsset(format!(
                    "{:?}: expected \"<amount> <SYMBOL>\"",
                    s
                )))
            }
        };

        if !amount_str.is_ascii() {
            return Err(TransactionError::InvalidAsset(format!(
                "{:?}: amount is not numeric",
                s
            )));
        }

        let precision = precision_for(symbol);
        let digits: Vec<&str> = amount_str.split('.').collect();
        if digits.len() > 2 {
            return Err(TransactionError::InvalidAsset(format!(
                "{:?}: amount has more than one decimal point",
                s
            )));
        }

        let mut fraction = digits.get(1).copied().unwrap_or("").to_string();
        fraction.truncate(precision as usize);
        while fraction.len() < precision as usize {
            fraction.push('0');
        }
        let combined = format!("{}{}", digits[0], fraction);
        let amount = combined.parse::<i64>().map_err(|e| {
            TransactionError::InvalidAsset(format!("{:?}: amount {:?}: {}", s, amount_str, e))
        })?;

        Ok(Asset {
            amount,
            precision,
            symbol: symbol.to_string(),
        })
    }

    /// Append the asset in the requested encoding.
    pub fn write_to(
        &self,
        writer: &mut HiveWriter,
        encoding: AssetEncoding,
    ) -> Result<(), TransactionError> {
        match encoding {
            AssetEncoding::Legacy => {
                let symbol = legacy_symbol(&self.symbol);
                if symbol.len() > LEGACY_SYMBOL_LEN {
                    return Err(TransactionError::InvalidAsset(format!(
                        "symbol {:?} is longer than {} bytes",
                        self.symbol, LEGACY_SYMBOL_LEN
                    )));
                }
                let mut field = [0u8; LEGACY_SYMBOL_LEN];
                field[..symbol.len()].copy_from_slice(symbol.as_bytes());
                writer.write_i64_le(self.amount);
                writer.write_u8(self.precision);
                writer.write_bytes(&field);
            }
            AssetEncoding::Nai => {
                let nai = nai_for(&self.symbol).ok_or_else(|| {
                    TransactionError::InvalidAsset(format!(
                        "symbol {:?} has no numeric asset identifier",
                        self.symbol
                    ))
                })?;
                writer.write_i64_le(self.amount);
                writer.write_u32_le(nai);
            }
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self, encoding: AssetEncoding) -> Result<Vec<u8>, TransactionError> {
        let mut w = HiveWriter::with_capacity(16);
        self.write_to(&mut w, encoding)?;
        Ok(w.into_bytes())
    }
}

impl FromStr for Asset {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = 10u64.pow(u32::from(self.precision));
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        if self.precision == 0 {
            write!(f, "{}{} {}", sign, abs, self.symbol)
        } else {
            write!(
                f,
                "{}{}.{:0width$} {}",
                sign,
                abs / scale,
                abs % scale,
                self.symbol,
                width = self.precision as usize
            )
        }
    }
}

/// Parse and encode an asset string in one step.
pub fn write_asset(
    writer: &mut HiveWriter,
    asset: &str,
    encoding: AssetEncoding,
) -> Result<(), TransactionError> {
    Asset::parse(asset)?.write_to(writer, encoding)
}

fn precision_for(symbol: &str) -> u8 {
    if symbol == "VESTS" {
        VESTS_PRECISION
    } else {
        DEFAULT_PRECISION
    }
}

fn legacy_symbol(symbol: &str) -> &str {
    match symbol {
        "HIVE" => "STEEM",
        "HBD" => "SBD",
        other => other,
    }
}

fn nai_for(symbol: &str) -> Option<u32> {
    match symbol {
        "HBD" => Some(NAI_HBD),
        "HIVE" => Some(NAI_HIVE),
        "VESTS" => Some(NAI_VESTS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_hive_remaps_to_steem() {
        let bytes = Asset::parse("1.000 HIVE").unwrap().to_bytes(AssetEncoding::Legacy).unwrap();
        assert_eq!(
            bytes,
            vec![232, 3, 0, 0, 0, 0, 0, 0, 3, 83, 84, 69, 69, 77, 0, 0]
        );
    }

    #[test]
    fn test_legacy_zero_amount() {
        let asset = Asset::parse("0.000 HIVE").unwrap();
        assert_eq!(asset.amount, 0);
        assert_eq!(&asset.to_bytes(AssetEncoding::Legacy).unwrap()[..8], &[0u8; 8]);
    }

    #[test]
    fn test_legacy_hbd_and_vests() {
        assert_eq!(
            Asset::parse("0.001 HBD").unwrap().to_bytes(AssetEncoding::Legacy).unwrap(),
            vec![1, 0, 0, 0, 0, 0, 0, 0, 3, 83, 66, 68, 0, 0, 0, 0]
        );
        assert_eq!(
            Asset::parse("12.5 VESTS").unwrap().to_bytes(AssetEncoding::Legacy).unwrap(),
            vec![32, 188, 190, 0, 0, 0, 0, 0, 6, 86, 69, 83, 84, 83, 0, 0]
        );
    }

    #[test]
    fn test_fraction_is_padded_or_truncated() {
        assert_eq!(Asset::parse("1.23456 HIVE").unwrap().amount, 1234);
        assert_eq!(Asset::parse("1.2 HIVE").unwrap().amount, 1200);
        assert_eq!(Asset::parse("7 HBD").unwrap().amount, 7000);
        assert_eq!(Asset::parse("1. HIVE").unwrap().amount, 1000);
        assert_eq!(Asset::parse("-1.500 HIVE").unwrap().amount, -1500);
    }

    #[test]
    fn test_nai_encoding() {
        let asset = Asset::parse("1.000 HIVE").unwrap();
        assert_eq!(
            asset.to_bytes(AssetEncoding::Nai).unwrap(),
            vec![232, 3, 0, 0, 0, 0, 0, 0, 35, 32, 188, 190]
        );
        let vests = Asset::parse("1.000000 VESTS").unwrap().to_bytes(AssetEncoding::Nai).unwrap();
        assert_eq!(&vests[8..], &NAI_VESTS.to_le_bytes());
        assert!(matches!(
            Asset::parse("1.000 FOO").unwrap().to_bytes(AssetEncoding::Nai),
            Err(TransactionError::InvalidAsset(_))
        ));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["1.000", "1.000  HIVE", "1.000 HIVE extra", "1.0.0 HIVE", "abc HIVE", " HIVE", "1.ééé HIVE", "1.000 ", ""] {
            assert!(
                matches!(Asset::parse(bad), Err(TransactionError::InvalidAsset(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_long_legacy_symbol() {
        let asset = Asset::parse("1.000 TOOLONGSYM").unwrap();
        assert!(asset.to_bytes(AssetEncoding::Legacy).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Asset::parse("1.23456 HIVE").unwrap().to_string(), "1.234 HIVE");
        assert_eq!(Asset::parse("3 VESTS").unwrap().to_string(), "3.000000 VESTS");
        assert_eq!(Asset::parse("-0.5 HBD").unwrap().to_string(), "-0.500 HBD");
    }
}
