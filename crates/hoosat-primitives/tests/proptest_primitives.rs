//! Property-based tests for the primitives crate.

use proptest::prelude::*;

use hoosat_primitives::hash::{blake3_keyed, sha256d, tagged_sha256};
use hoosat_primitives::hexutil::{decode_hex, encode_hex};
use hoosat_primitives::util::{HtnReader, HtnWriter, VarInt};

proptest! {
    /// Hex encode/decode round-trips for arbitrary byte sequences.
    #[test]
    fn hex_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let encoded = encode_hex(&data);
        prop_assert_eq!(decode_hex(&encoded).unwrap(), data);
    }

    /// Hex encoding is always lowercase and twice the input length.
    #[test]
    fn hex_encoding_shape(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let encoded = encode_hex(&data);
        prop_assert_eq!(encoded.len(), data.len() * 2);
        prop_assert!(encoded.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// Odd-length hex strings always fail to decode.
    #[test]
    fn hex_odd_length_fails(data in proptest::collection::vec(any::<u8>(), 1..128)) {
        let mut encoded = encode_hex(&data);
        encoded.pop();
        prop_assert!(decode_hex(&encoded).is_err());
    }

    /// VarInt encode/decode round-trips through the reader.
    #[test]
    fn varint_roundtrip(value in any::<u64>()) {
        let bytes = VarInt(value).to_bytes();
        let mut reader = HtnReader::new(&bytes);
        prop_assert_eq!(reader.read_varint().unwrap(), VarInt(value));
        prop_assert_eq!(reader.remaining(), 0);
    }

    /// Var-bytes write/read round-trips.
    #[test]
    fn var_bytes_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let mut writer = HtnWriter::new();
        writer.write_var_bytes(&data);
        let buf = writer.into_bytes();
        let mut reader = HtnReader::new(&buf);
        prop_assert_eq!(reader.read_var_bytes().unwrap(), &data[..]);
    }

    /// Hashes are stable across invocations.
    #[test]
    fn hashes_deterministic(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(sha256d(&data), sha256d(&data));
        prop_assert_eq!(
            blake3_keyed("TransactionID", &data),
            blake3_keyed("TransactionID", &data)
        );
        prop_assert_eq!(
            tagged_sha256("TransactionSigningHash", &data),
            tagged_sha256("TransactionSigningHash", &data)
        );
    }
}
