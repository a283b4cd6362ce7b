use proptest::prelude::*;

use segwit_transaction::{Script, Transaction, TransactionInput, TransactionOutput, Witness};

/// Strategy to generate a valid random transaction, with or without
/// witness data.
fn arb_transaction() -> impl Strategy<Value = Transaction> {
    let arb_witness = prop::collection::vec(
        prop::collection::vec(any::<u8>(), 0..40),
        0..3,
    )
    .prop_map(Witness::from_items);

    let arb_input = (
        prop::array::uniform32(any::<u8>()),       // prev tx hash
        any::<u32>(),                              // prev tx index
        prop::collection::vec(any::<u8>(), 0..64), // script bytes
        any::<u32>(),                              // sequence
        arb_witness,
    )
        .prop_map(|(hash, idx, script_bytes, seq, witness)| {
            let mut input = TransactionInput::new();
            input.source_txid = hash;
            input.source_tx_out_index = idx;
            input.unlocking_script = if script_bytes.is_empty() {
                None
            } else {
                Some(Script::from_bytes(&script_bytes))
            };
            input.sequence_number = seq;
            input.witness = witness;
            input
        });

    let arb_output = (any::<u64>(), prop::collection::vec(any::<u8>(), 0..64)).prop_map(
        |(satoshis, script_bytes)| {
            TransactionOutput::with_script(satoshis, Script::from_bytes(&script_bytes))
        },
    );

    (
        any::<u32>(), // version
        prop::collection::vec(arb_input, 1..4),
        prop::collection::vec(arb_output, 1..4),
        any::<u32>(), // locktime
    )
        .prop_map(|(version, inputs, outputs, locktime)| {
            let mut tx = Transaction::new();
            tx.version = version;
            tx.lock_time = locktime;
            for i in inputs {
                tx.add_input(i);
            }
            for o in outputs {
                tx.add_output(o);
            }
            tx
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_serialize_deserialize_roundtrip(tx in arb_transaction()) {
        let bytes = tx.to_bytes();
        let tx2 = Transaction::from_bytes(&bytes).unwrap();
        let bytes2 = tx2.to_bytes();
        prop_assert_eq!(bytes, bytes2);
    }

    #[test]
    fn transaction_hex_roundtrip(tx in arb_transaction()) {
        let hex_str = tx.to_hex();
        let tx2 = Transaction::from_hex(&hex_str).unwrap();
        prop_assert_eq!(tx.to_hex(), tx2.to_hex());
    }

    #[test]
    fn txid_is_witness_independent(tx in arb_transaction()) {
        let mut stripped = tx.clone();
        for input in &mut stripped.inputs {
            input.witness = Witness::new();
        }
        prop_assert_eq!(tx.tx_id(), stripped.tx_id());
        prop_assert_eq!(tx.tx_id_hex(), stripped.tx_id_hex());
    }

    #[test]
    fn legacy_serialization_never_carries_marker(tx in arb_transaction()) {
        let bytes = tx.to_bytes_legacy();
        // The byte after the version is an input count of at least one.
        prop_assert!(bytes[4] != 0x00);
        let tx2 = Transaction::from_bytes(&bytes).unwrap();
        prop_assert!(!tx2.has_witness());
    }
}
