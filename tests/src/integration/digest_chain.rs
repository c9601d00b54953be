//! End-to-end digest chain scenarios.

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;
    use wl_01_digest_chain::{
        aggregate, compute_digest, is_within_policy, Chain, LedgerInput, PolicyWindow,
        DEFAULT_TAMPER_DELTA, DEFAULT_TOLERANCE, GENESIS_DIGEST,
    };

    #[test]
    fn test_end_to_end_block_from_enabled_inputs() {
        crate::init_tracing();

        // Genesis digest 0.50; inputs A and C enabled, B disabled.
        let inputs = vec![
            LedgerInput {
                value: 0.22,
                enabled: true,
            },
            LedgerInput {
                value: 0.30,
                enabled: false,
            },
            LedgerInput {
                value: 0.45,
                enabled: true,
            },
        ];
        let root_value = aggregate(&inputs);
        assert_eq!(root_value, 0.22 + 0.45);

        let policy = PolicyWindow::new(0.5, 0.3);
        let mut chain = Chain::new();
        assert_eq!(chain.head().digest, GENESIS_DIGEST);

        let block = *chain.append(root_value, 1, &policy);

        // mix = 0.3*0.50 + 0.25*0.67 + 0.10*0.01 + 0.35*0.5 = 0.4935
        let mix: f64 = 0.3 * 0.50 + 0.25 * root_value + 0.10 * 0.01 + 0.35 * 0.5;
        let expected =
            (0.5 + 0.4 * (mix * TAU).sin() + 0.1 * (mix * 2.0 * TAU).cos()).clamp(0.0, 1.0);

        assert!((block.digest - expected).abs() <= f64::EPSILON);
        assert_eq!(block.is_valid, is_within_policy(expected, &policy));
    }

    #[test]
    fn test_tamper_flips_validity_on_reverify() {
        let policy = PolicyWindow::new(0.5, 0.3);
        let mut chain = Chain::new();
        chain.append(0.35, 0, &policy);

        // Untouched, re-verification accepts the block.
        chain.reverify(policy.center);
        assert!(chain.get(2).unwrap().is_valid);

        // Confirm numerically that a +0.1 root shift moves the digest by
        // more than the tolerance for these inputs.
        let original = compute_digest(GENESIS_DIGEST, 0.35, 0, policy.center);
        let shifted = compute_digest(GENESIS_DIGEST, 0.45, 0, policy.center);
        assert!((shifted - original).abs() >= DEFAULT_TOLERANCE);

        chain.tamper(2, DEFAULT_TAMPER_DELTA).unwrap();
        chain.reverify(policy.center);
        assert!(!chain.get(2).unwrap().is_valid);
    }

    #[test]
    fn test_reverify_tracks_policy_center_changes() {
        let policy = PolicyWindow::new(0.5, 0.3);
        let mut chain = Chain::new();
        chain.append(0.67, 1, &policy);

        // Against the center the block was built with, it verifies.
        chain.reverify(0.5);
        assert!(chain.get(2).unwrap().is_valid);

        // A far-away center changes the expected digest beyond tolerance.
        chain.reverify(0.9);
        assert!(!chain.get(2).unwrap().is_valid);

        // And moving back restores it: validity is derived, never cached.
        chain.reverify(0.5);
        assert!(chain.get(2).unwrap().is_valid);
    }
}
