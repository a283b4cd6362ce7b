use proptest::prelude::*;

use segwit_primitives::chainhash::Hash;
use segwit_primitives::ec::private_key::PrivateKey;
use segwit_primitives::hash::sha256;
use segwit_primitives::util::{int_from_le, int_to_le, VarInt, WireReader, WireWriter};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn int_to_le_roundtrip(value in any::<u64>(), extra in 0usize..4) {
        let length = 8 + extra;
        let encoded = int_to_le(value, length).unwrap();
        prop_assert_eq!(encoded.len(), length);
        prop_assert_eq!(int_from_le(&encoded).unwrap(), value);
    }

    #[test]
    fn varint_roundtrip(value in any::<u64>()) {
        let encoded = VarInt(value).to_bytes();
        let (decoded, consumed) = VarInt::from_bytes(&encoded).unwrap();
        prop_assert_eq!(decoded.value(), value);
        prop_assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn varint_size_classes(value in any::<u64>()) {
        let expected = if value < 0xfd {
            1
        } else if value <= 0xffff {
            3
        } else if value <= 0xffff_ffff {
            5
        } else {
            9
        };
        prop_assert_eq!(VarInt(value).to_bytes().len(), expected);
    }

    #[test]
    fn wire_reader_writer_roundtrip(
        byte in any::<u8>(),
        word in any::<u32>(),
        satoshis in any::<u64>(),
        count in any::<u64>(),
        payload in prop::collection::vec(any::<u8>(), 0..128)
    ) {
        let mut writer = WireWriter::new();
        writer.write_u8(byte);
        writer.write_u32_le(word);
        writer.write_u64_le(satoshis);
        writer.write_varint(VarInt(count));
        writer.write_varint(VarInt::from(payload.len()));
        writer.write_bytes(&payload);

        let data = writer.into_bytes();
        let mut reader = WireReader::new(&data);
        prop_assert_eq!(reader.read_u8().unwrap(), byte);
        prop_assert_eq!(reader.read_u32_le().unwrap(), word);
        prop_assert_eq!(reader.read_u64_le().unwrap(), satoshis);
        prop_assert_eq!(reader.read_varint().unwrap(), VarInt(count));
        let len = reader.read_varint().unwrap().value() as usize;
        prop_assert_eq!(reader.read_bytes(len).unwrap(), payload.as_slice());
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn hash_hex_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = Hash::new(bytes);
        let hash2 = Hash::from_hex(&hash.to_string()).unwrap();
        prop_assert_eq!(hash.as_bytes(), hash2.as_bytes());
    }

    #[test]
    fn sign_is_deterministic_and_low_s(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let digest = sha256(&msg);
            let sig1 = pk.sign(&digest).unwrap();
            let sig2 = pk.sign(&digest).unwrap();
            prop_assert_eq!(sig1.to_der(), sig2.to_der());
            prop_assert!(sig1.has_low_s());
            prop_assert!(pk.pub_key().verify(&digest, &sig1));
        }
    }
}
