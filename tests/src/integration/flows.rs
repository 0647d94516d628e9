//! # Integration Test Flows
//!
//! Full contract lifecycles through the public API:
//!
//! 1. **Registry**: addresses appended slot by slot up to capacity
//! 2. **Nullifiers**: one consumption per identity, whatever the call path
//! 3. **Submissions**: canonicalized messages stored under fresh slots
//! 4. **Canonicalization**: literal inputs through `get_valid_message`

#[cfg(test)]
mod tests {
    use crate::fixtures::ContractHarness;
    use secrets_contract::{
        AdminAuthorization, AdminOperation, ContractConfig, ContractError, ContractState,
        SecretsContractApi,
    };
    use shared_crypto::{Field, KeyPair, Nullifier};
    use shared_merkle::{MerkleMap, MerkleTree};

    // =============================================================================
    // REGISTRY
    // =============================================================================

    #[test]
    fn test_add_eligible_addresses() {
        let mut harness = ContractHarness::new();

        for expected in 1..=3u64 {
            let identity = KeyPair::generate().identity();
            let update = harness.register(&identity).unwrap();
            assert_eq!(update.count, expected);
            assert_eq!(update.root, harness.tree.get_root());
        }

        let state = harness.service.state();
        assert_eq!(state.eligible_addresses_count, 3);
        assert_eq!(state.eligible_addresses_root, harness.tree.get_root());
    }

    #[test]
    fn test_same_identity_registered_repeatedly() {
        let mut harness = ContractHarness::new();
        let sender = KeyPair::from_seed([7u8; 32]);

        for _ in 0..5 {
            harness.register(&sender.identity()).unwrap();
        }
        assert_eq!(harness.service.state().eligible_addresses_count, 5);
    }

    #[test]
    fn test_capacity_boundary_by_registration() {
        let mut harness = ContractHarness::new();
        let sender = KeyPair::generate();

        for _ in 0..99 {
            harness.register(&sender.identity()).unwrap();
        }
        assert_eq!(harness.service.state().eligible_addresses_count, 99);

        let update = harness.register(&sender.identity()).unwrap();
        assert_eq!(update.count, 100);

        let before = harness.service.state();
        assert_eq!(
            harness.register(&sender.identity()),
            Err(ContractError::CapacityExceeded { max: 100 })
        );
        assert_eq!(harness.service.state(), before);
    }

    #[test]
    fn test_capacity_boundary_after_admin_bootstrap() {
        let admin = KeyPair::generate();
        let config = ContractConfig::default().with_admin(admin.identity());
        let mut harness = ContractHarness::with_config(config);

        // Bootstrap a registry of 99 entries off-contract
        let filler = KeyPair::generate().identity();
        let mut tree = MerkleTree::new(8).unwrap();
        for slot in 0..99 {
            tree.set_leaf(slot, secrets_contract::identity_leaf(&filler))
                .unwrap();
        }

        let set_root = AdminOperation::SetEligibleAddressesRoot(tree.get_root());
        harness
            .service
            .set_eligible_addresses_root(
                tree.get_root(),
                &AdminAuthorization::sign(&admin, &set_root, 0),
            )
            .unwrap();
        let set_count = AdminOperation::SetAddressesCounter(99);
        harness
            .service
            .set_addresses_counter(99, &AdminAuthorization::sign(&admin, &set_count, 1))
            .unwrap();

        let newcomer = KeyPair::generate().identity();
        let witness = tree.get_witness(99).unwrap();
        let update = harness
            .service
            .add_eligible_address(&newcomer, &witness)
            .unwrap();
        assert_eq!(update.count, 100);

        tree.set_leaf(99, secrets_contract::identity_leaf(&newcomer))
            .unwrap();
        assert_eq!(
            harness
                .service
                .add_eligible_address(&newcomer, &tree.get_witness(100).unwrap()),
            Err(ContractError::CapacityExceeded { max: 100 })
        );
    }

    // =============================================================================
    // NULLIFIERS
    // =============================================================================

    #[test]
    fn test_execute_nullifier_once_per_identity() {
        let harness = ContractHarness::new();
        let sender = KeyPair::generate();
        let identity = sender.identity();

        let first = Nullifier::create(&sender, &identity.to_fields());
        harness.service.execute_nullifier(&identity, &first).unwrap();

        // A freshly signed nullifier still maps to the same key
        let second = Nullifier::create(&sender, &identity.to_fields());
        assert_eq!(
            harness.service.execute_nullifier(&identity, &second),
            Err(ContractError::NullifierReuse)
        );
    }

    #[test]
    fn test_nullifier_json_round_trip_accepted() {
        let harness = ContractHarness::new();
        let sender = KeyPair::generate();
        let identity = sender.identity();

        let json = serde_json::to_string(&Nullifier::create(&sender, &identity.to_fields()))
            .unwrap();
        let nullifier: Nullifier = serde_json::from_str(&json).unwrap();

        assert!(harness.service.execute_nullifier(&identity, &nullifier).is_ok());
    }

    #[test]
    fn test_distinct_identities_have_independent_nullifiers() {
        let harness = ContractHarness::new();
        for _ in 0..4 {
            let sender = KeyPair::generate();
            let identity = sender.identity();
            let nullifier = Nullifier::create(&sender, &identity.to_fields());
            assert!(harness.service.execute_nullifier(&identity, &nullifier).is_ok());
        }
    }

    // =============================================================================
    // SUBMISSIONS
    // =============================================================================

    #[test]
    fn test_save_valid_secret_message() {
        let mut harness = ContractHarness::new();
        let sender = KeyPair::generate();
        harness.register(&sender.identity()).unwrap();

        let receipt = harness.send(&sender, 0b111000).unwrap();
        assert_eq!(receipt.message_count, 1);
        assert_eq!(receipt.canonical_message, Field::from_u64(0b001000));
        assert_eq!(receipt.message_root, harness.messages.get_root());

        let state = harness.service.state();
        assert_eq!(state.message_root, harness.messages.get_root());
        assert_eq!(state.message_count, 1);
    }

    #[test]
    fn test_many_senders_each_submit_once() {
        let mut harness = ContractHarness::new();
        let senders: Vec<KeyPair> = (0..5).map(|_| KeyPair::generate()).collect();
        for sender in &senders {
            harness.register(&sender.identity()).unwrap();
        }

        for (i, sender) in senders.iter().enumerate() {
            let receipt = harness.send(sender, i as u64).unwrap();
            assert_eq!(receipt.message_count, i as u64 + 1);
        }

        for sender in &senders {
            assert_eq!(
                harness.send(sender, 0b000100),
                Err(ContractError::NullifierReuse)
            );
        }
        assert_eq!(harness.service.state().message_count, 5);
    }

    #[test]
    fn test_submission_after_execute_nullifier_is_reuse() {
        let mut harness = ContractHarness::new();
        let sender = KeyPair::generate();
        let identity = sender.identity();
        harness.register(&identity).unwrap();

        harness
            .service
            .execute_nullifier(&identity, &Nullifier::create(&sender, &identity.to_fields()))
            .unwrap();

        assert_eq!(
            harness.send(&sender, 0b000001),
            Err(ContractError::NullifierReuse)
        );
    }

    #[test]
    fn test_ineligible_sender_rejected() {
        let mut harness = ContractHarness::new();
        harness.register(&KeyPair::generate().identity()).unwrap();
        let before = harness.service.state();

        // Valid signature, unused nullifier, but never registered
        let outsider = KeyPair::generate();
        assert_eq!(
            harness.send(&outsider, 0b000100),
            Err(ContractError::NotEligible)
        );
        assert_eq!(harness.service.state(), before);
    }

    #[test]
    fn test_init_starts_over() {
        let mut harness = ContractHarness::new();
        let sender = KeyPair::generate();
        harness.register(&sender.identity()).unwrap();
        harness.send(&sender, 0b000010).unwrap();

        let state = harness.service.init().unwrap();
        assert_eq!(state, ContractState::initial(&ContractConfig::default()).unwrap());
        assert_eq!(state.message_root, MerkleMap::empty_root());
    }

    // =============================================================================
    // CANONICALIZATION
    // =============================================================================

    #[test]
    fn test_canonicalization_literals() {
        let harness = ContractHarness::new();
        let cases = [
            (0b100001, 0b000001),
            (0b100000, 0b100000),
            (0b010010, 0b010110),
            (0b111000, 0b001000),
            // flag1 has priority, so the flag2 and flag4 rules never fire
            (0b111011, 0b000001),
        ];

        for (input, expected) in cases {
            let canonical = harness.service.get_valid_message(&Field::from_u64(input));
            assert_eq!(
                canonical.bits(),
                expected,
                "canonicalize({:#08b})",
                input
            );
        }
    }
}
