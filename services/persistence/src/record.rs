//! Record Codec — One checksummed JSON record per line
//!
//! # Line Format
//! ```text
//! <crc32c: 8 hex digits> <json payload>
//! ```
//!
//! The CRC32C covers the JSON payload bytes exactly as written, so a torn
//! or hand-edited line is reported instead of silently loaded.

use crc32c::crc32c;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a record as a single line (no trailing newline).
pub fn encode_line<T: Serialize>(record: &T) -> Result<String, String> {
    let payload = serde_json::to_string(record).map_err(|e| e.to_string())?;
    let checksum = crc32c(payload.as_bytes());
    Ok(format!("{:08x} {}", checksum, payload))
}

/// Decode a line produced by [`encode_line`], verifying its checksum.
pub fn decode_line<T: DeserializeOwned>(line: &str) -> Result<T, String> {
    let (checksum_hex, payload) = line
        .split_once(' ')
        .ok_or_else(|| "missing checksum separator".to_string())?;

    let expected = u32::from_str_radix(checksum_hex, 16)
        .map_err(|_| format!("invalid checksum field {:?}", checksum_hex))?;
    let actual = crc32c(payload.as_bytes());
    if expected != actual {
        return Err(format!(
            "checksum mismatch: expected {:08x}, got {:08x}",
            expected, actual
        ));
    }

    serde_json::from_str(payload).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use types::ids::OrderId;
    use types::numeric::Quantity;
    use types::order::Order;

    fn sample_order() -> Order {
        Order::bid(
            OrderId::new(5),
            "190.65".parse().unwrap(),
            Quantity::try_new(25).unwrap(),
        )
    }

    #[test]
    fn test_line_roundtrip() {
        let line = encode_line(&sample_order()).unwrap();
        assert!(!line.contains('\n'));

        let decoded: Order = decode_line(&line).unwrap();
        assert_eq!(decoded, sample_order());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let line = encode_line(&sample_order()).unwrap();
        let tampered = line.replace("190.65", "190.66");

        let err = decode_line::<Order>(&tampered).unwrap_err();
        assert!(err.contains("checksum mismatch"));
    }

    #[test]
    fn test_missing_separator_rejected() {
        assert!(decode_line::<Order>("deadbeef").is_err());
        assert!(decode_line::<Order>("zzzz {}").is_err());
    }

    proptest! {
        #[test]
        fn prop_truncated_line_rejected(cut in 1usize..20) {
            let line = encode_line(&sample_order()).unwrap();
            let truncated = &line[..line.len() - cut];
            prop_assert!(decode_line::<Order>(truncated).is_err());
        }
    }
}
