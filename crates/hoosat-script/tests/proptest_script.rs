//! Property-based tests for the script and address codecs.

use proptest::prelude::*;

use hoosat_script::script::push_data_prefix;
use hoosat_script::{Address, AddressType, Prefix, Script};

fn address_type_strategy() -> impl Strategy<Value = AddressType> {
    prop_oneof![
        Just(AddressType::Schnorr),
        Just(AddressType::Ecdsa),
        Just(AddressType::ScriptHash),
    ]
}

proptest! {
    /// Address encode/decode round-trips for every type and valid payload.
    #[test]
    fn address_roundtrip(
        address_type in address_type_strategy(),
        seed in proptest::collection::vec(any::<u8>(), 33),
        testnet in any::<bool>(),
    ) {
        let prefix = if testnet { Prefix::Testnet } else { Prefix::Mainnet };
        let payload = seed[..address_type.payload_len()].to_vec();
        let addr = Address::new(prefix, address_type, payload).unwrap();
        let decoded = Address::decode(&addr.encode(), None).unwrap();
        prop_assert_eq!(decoded, addr);
    }

    /// Flipping one payload byte always changes the encoded string.
    #[test]
    fn address_encoding_injective(
        seed in proptest::collection::vec(any::<u8>(), 32),
        position in 0usize..32,
    ) {
        let addr =
            Address::new(Prefix::Mainnet, AddressType::Schnorr, seed.clone()).unwrap();
        let mut altered = seed;
        altered[position] ^= 0x01;
        let other = Address::new(Prefix::Mainnet, AddressType::Schnorr, altered).unwrap();
        prop_assert_ne!(addr.encode(), other.encode());
    }

    /// Pushed data always round-trips out of the script bytes.
    #[test]
    fn push_data_roundtrip(data in proptest::collection::vec(any::<u8>(), 1..2048)) {
        let mut script = Script::new();
        script.append_push_data(&data).unwrap();
        let bytes = script.to_bytes();
        let prefix = push_data_prefix(data.len()).unwrap();
        prop_assert_eq!(&bytes[..prefix.len()], &prefix[..]);
        prop_assert_eq!(&bytes[prefix.len()..], &data[..]);
    }
}
