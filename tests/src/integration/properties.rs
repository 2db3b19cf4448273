//! # Executor Properties
//!
//! Invariants that must hold for every input, checked with proptest against
//! the deterministic test genesis.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use qc_11_stake_execution::prelude::*;
    use qc_11_stake_execution::testkit::TestData;
    use shared_types::{Address, PayloadKind, Transaction};

    fn arb_mode() -> impl Strategy<Value = ExecutionMode> {
        prop_oneof![Just(ExecutionMode::Strict), Just(ExecutionMode::Lenient)]
    }

    /// One transaction of each validator-lifecycle kind signed with `sequence`.
    fn signed_with(td: &mut TestData, sequence: u64) -> Vec<Transaction> {
        let stamp = td.stamp();
        let sender = td.accounts[0];
        let validator = td.validator_keys[0].address();
        let pk = td.random_key();
        vec![
            Transaction::new_transfer(stamp, sequence, sender, td.accounts[1], 5_000, 10, ""),
            Transaction::new_bond(stamp, sequence, sender, pk.address(), Some(pk), 5_000, 10, ""),
            Transaction::new_unbond(stamp, sequence, validator, ""),
            Transaction::new_withdraw(stamp, sequence, validator, sender, 5_000, 10, ""),
        ]
    }

    fn executor_for(trx: &Transaction, mode: ExecutionMode) -> Box<dyn Executor> {
        match trx.kind() {
            PayloadKind::Transfer => Box::new(TransferExecutor::new()),
            PayloadKind::Bond => Box::new(BondExecutor::new(mode)),
            PayloadKind::Unbond => Box::new(UnbondExecutor::new(mode)),
            PayloadKind::Withdraw => Box::new(WithdrawExecutor::new()),
            PayloadKind::Sortition => unreachable!("not generated"),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Sender pays stake + fee, the validator gains the stake, and the
        /// supply only drops by the fee.
        #[test]
        fn prop_bond_conserves_currency(
            stake in 1_000u64..=1_000_000,
            fee in 0u64..50_000,
            mode in arb_mode(),
        ) {
            let mut td = TestData::new();
            let mut sb = td.sandbox();
            let sender = td.accounts[0];
            let before = sb.account(&sender).unwrap().balance;
            let pk = td.random_key();

            let mut exe = BondExecutor::new(mode);
            let trx = Transaction::new_bond(
                td.stamp(),
                1,
                sender,
                pk.address(),
                Some(pk),
                stake,
                fee,
                "",
            );
            prop_assert!(exe.execute(&trx, &mut sb).is_ok());

            prop_assert_eq!(sb.account(&sender).unwrap().balance, before - stake - fee);
            prop_assert_eq!(sb.validator(&pk.address()).unwrap().stake, stake);
            prop_assert_eq!(sb.power_delta(), stake);
            prop_assert_eq!(exe.fee(), fee);
            prop_assert_eq!(sb.total_coins() + u128::from(fee), td.snapshot.total_coins());
        }

        /// Any sequence other than current + 1 is rejected, whatever the kind.
        #[test]
        fn prop_wrong_sequence_rejected(
            sequence in any::<u64>().prop_filter("next sequence", |s| *s != 1),
            mode in arb_mode(),
        ) {
            let mut td = TestData::new();
            let mut sb = td.sandbox();
            for trx in signed_with(&mut td, sequence) {
                let mut exe = executor_for(&trx, mode);
                let err = exe.execute(&trx, &mut sb).unwrap_err();
                prop_assert_eq!(err.kind(), ErrorKind::InvalidSequence);
            }
            prop_assert!(!sb.is_modified());
        }

        /// `stake == maximum` is accepted and anything above is not.
        #[test]
        fn prop_max_stake_boundary(over in 1u64..1_000_000, mode in arb_mode()) {
            let mut td = TestData::new();
            let max = td.snapshot.params.maximum_stake;
            let sender = td.accounts[0];
            let pk = td.random_key();
            let mut exe = BondExecutor::new(mode);

            let mut sb = td.sandbox();
            let trx = Transaction::new_bond(
                td.stamp(),
                1,
                sender,
                pk.address(),
                Some(pk),
                max + over,
                10,
                "",
            );
            let err = exe.execute(&trx, &mut sb).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::InvalidTx);
            prop_assert!(!sb.is_modified());

            let trx = Transaction::new_bond(
                td.stamp(),
                1,
                sender,
                pk.address(),
                Some(pk),
                max,
                10,
                "",
            );
            prop_assert!(exe.execute(&trx, &mut sb).is_ok());
        }

        /// The treasury can never receive a bond, in either mode.
        #[test]
        fn prop_treasury_bond_rejected(
            stake in 0u64..=2_000_000,
            with_key in any::<bool>(),
            mode in arb_mode(),
        ) {
            let mut td = TestData::new();
            let mut sb = td.sandbox();
            let key = if with_key { Some(td.random_key()) } else { None };
            let trx = Transaction::new_bond(
                td.stamp(),
                1,
                td.accounts[1],
                Address::TREASURY,
                key,
                stake,
                10,
                "",
            );

            let mut exe = BondExecutor::new(mode);
            let err = exe.execute(&trx, &mut sb).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::InvalidPublicKey);
        }

        /// A transfer the sender cannot cover leaves the sandbox untouched.
        #[test]
        fn prop_overdraft_leaves_sandbox_untouched(extra in 1u64..1_000_000, fee in 0u64..1_000) {
            let td = TestData::new();
            let mut sb = td.sandbox();
            let sender = td.accounts[2];
            let balance = sb.account(&sender).unwrap().balance;
            let trx = Transaction::new_transfer(
                td.stamp(),
                1,
                sender,
                td.accounts[3],
                balance + extra,
                fee,
                "",
            );

            let mut exe = TransferExecutor::new();
            let err = exe.execute(&trx, &mut sb).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
            prop_assert!(!sb.is_modified());
        }
    }
}
