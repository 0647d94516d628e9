//! # Privileged Setter Abuse
//!
//! The root and counter setters can rewrite the registry wholesale, so
//! they only accept a nonce-bound signature from the configured admin.

#[cfg(test)]
mod tests {
    use crate::fixtures::ContractHarness;
    use secrets_contract::{
        identity_leaf, AdminAuthorization, AdminOperation, ContractConfig, ContractError,
        SecretsContractApi,
    };
    use shared_crypto::{Field, KeyPair};
    use shared_merkle::MerkleTree;

    fn harness_with_admin() -> (ContractHarness, KeyPair) {
        let admin = KeyPair::generate();
        let config = ContractConfig::default().with_admin(admin.identity());
        (ContractHarness::with_config(config), admin)
    }

    #[test]
    fn test_setters_disabled_without_admin() {
        let harness = ContractHarness::new();
        let anyone = KeyPair::generate();
        let op = AdminOperation::SetAddressesCounter(0);

        assert_eq!(
            harness
                .service
                .set_addresses_counter(0, &AdminAuthorization::sign(&anyone, &op, 0)),
            Err(ContractError::Unauthorized)
        );
    }

    #[test]
    fn test_attacker_injects_own_registry_root() {
        let (mut harness, _admin) = harness_with_admin();
        harness.register(&KeyPair::generate().identity()).unwrap();
        let before = harness.service.state();

        let attacker = KeyPair::generate();
        let mut private = MerkleTree::new(8).unwrap();
        private
            .set_leaf(0, identity_leaf(&attacker.identity()))
            .unwrap();

        let op = AdminOperation::SetEligibleAddressesRoot(private.get_root());
        assert_eq!(
            harness.service.set_eligible_addresses_root(
                private.get_root(),
                &AdminAuthorization::sign(&attacker, &op, before.admin_nonce)
            ),
            Err(ContractError::Unauthorized)
        );
        assert_eq!(harness.service.state(), before);
    }

    #[test]
    fn test_authorization_replay() {
        let (harness, admin) = harness_with_admin();
        let op = AdminOperation::SetAddressesCounter(10);
        let auth = AdminAuthorization::sign(&admin, &op, 0);

        harness.service.set_addresses_counter(10, &auth).unwrap();
        harness
            .service
            .set_addresses_counter(
                3,
                &AdminAuthorization::sign(&admin, &AdminOperation::SetAddressesCounter(3), 1),
            )
            .unwrap();

        // Replaying the nonce-0 authorization to restore the old counter
        assert_eq!(
            harness.service.set_addresses_counter(10, &auth),
            Err(ContractError::Unauthorized)
        );
        assert_eq!(harness.service.state().eligible_addresses_count, 3);
    }

    #[test]
    fn test_authorization_bound_to_operation() {
        let (harness, admin) = harness_with_admin();

        // Signed for a counter of 1, presented for a counter of 2
        let auth = AdminAuthorization::sign(&admin, &AdminOperation::SetAddressesCounter(1), 0);
        assert_eq!(
            harness.service.set_addresses_counter(2, &auth),
            Err(ContractError::Unauthorized)
        );

        // Signed for a counter, presented for a root with the same value
        assert_eq!(
            harness
                .service
                .set_eligible_addresses_root(Field::from_u64(1), &auth),
            Err(ContractError::Unauthorized)
        );
    }

    #[test]
    fn test_counter_beyond_capacity() {
        let (harness, admin) = harness_with_admin();
        let op = AdminOperation::SetAddressesCounter(101);

        assert_eq!(
            harness
                .service
                .set_addresses_counter(101, &AdminAuthorization::sign(&admin, &op, 0)),
            Err(ContractError::CapacityExceeded { max: 100 })
        );
        assert_eq!(harness.service.state().admin_nonce, 0);
    }
}
