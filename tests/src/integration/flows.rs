//! # Integration Test Flows
//!
//! Drives the ledger sandbox (4) and stake execution (11) together through
//! the in-memory store, one committed block at a time.
//!
//! ## Flows Tested:
//!
//! 1. **Bond scenario**: create a validator, replay, public key misuse
//! 2. **Validator lifecycle**: bond → sortition → eviction → unbond →
//!    cooldown → withdraw → re-bond
//! 3. **Batch execution**: rejections never stop a block
//! 4. **Mode isolation**: strict and lenient sandboxes on one snapshot

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use qc_04_ledger_sandbox::{BlockCommit, InMemoryLedgerStore, LedgerStore, Sandbox};
    use qc_11_stake_execution::prelude::*;
    use qc_11_stake_execution::testkit::{block_hash, proof, stamp_at, TestData};
    use quantum_telemetry::{init_logging, TelemetryConfig};
    use shared_types::{Address, Amount, Height, PublicKey, Transaction};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn init_logs() {
        // Another test may have installed the subscriber already.
        let _ = init_logging(&TelemetryConfig::from_env());
    }

    struct Chain {
        td: TestData,
        store: InMemoryLedgerStore,
        verifier: Arc<InMemorySortitionVerifier>,
        strict: ExecutionService,
        lenient: ExecutionService,
        fees: Amount,
    }

    impl Chain {
        fn new() -> Self {
            init_logs();
            let td = TestData::new();
            let store = td.store();
            let verifier = Arc::new(InMemorySortitionVerifier::new());
            Self {
                strict: ExecutionService::new(ExecutionMode::Strict, verifier.clone()),
                lenient: ExecutionService::new(ExecutionMode::Lenient, verifier.clone()),
                td,
                store,
                verifier,
                fees: 0,
            }
        }

        fn sandbox(&self) -> Sandbox {
            Sandbox::new(self.store.snapshot().unwrap())
        }

        fn fee(&self, amount: Amount) -> Amount {
            self.td.snapshot.params.calculate_fee(amount)
        }

        /// Stamp of the last committed block.
        fn stamp(&self) -> shared_types::Stamp {
            stamp_at(self.store.height())
        }

        fn commit(&self, sb: Sandbox) {
            let height = sb.current_height();
            self.store
                .commit(BlockCommit {
                    block_hash: block_hash(height),
                    round: 0,
                    delta: sb.into_delta(),
                })
                .unwrap();
        }

        /// Executes `transactions` strictly as the next block and commits it.
        fn block(&mut self, transactions: &[Transaction]) -> BatchReport {
            let mut sb = self.sandbox();
            let report = self.strict.execute_batch(transactions, &mut sb);
            self.fees += report.total_fee;
            self.commit(sb);
            report
        }

        /// Commits empty blocks until `height` is the last committed one.
        fn advance_to(&mut self, height: Height) {
            while self.store.height() < height {
                self.block(&[]);
            }
        }

        fn sortition(&mut self, pk: &PublicKey, sequence: u64, seed: u64) -> BatchReport {
            let stamp = self.stamp();
            self.verifier.register(pk.address(), stamp, proof(seed));
            let trx = Transaction::new_sortition(stamp, sequence, pk.address(), proof(seed));
            self.block(&[trx])
        }

        fn state(&self, address: &Address) -> LifecycleState {
            state_of(&self.sandbox(), address)
        }

        fn check_supply(&self) {
            let snapshot = self.store.snapshot().unwrap();
            assert_eq!(
                snapshot.total_coins() + u128::from(self.fees),
                self.td.snapshot.total_coins()
            );
        }
    }

    // =============================================================================
    // BOND SCENARIO
    // =============================================================================

    #[test]
    fn test_bond_scenario() {
        let mut chain = Chain::new();
        let mut sb = chain.sandbox();
        let sender = chain.td.accounts[0];
        let before = sb.account(&sender).unwrap();
        let pk = chain.td.random_key();
        let (amount, fee) = (40_000, chain.fee(40_000));
        let n = before.sequence;

        let trx = Transaction::new_bond(
            chain.stamp(),
            n + 1,
            sender,
            pk.address(),
            Some(pk),
            amount,
            fee,
            "",
        );
        assert_eq!(chain.strict.execute(&trx, &mut sb), Ok(fee));
        assert_eq!(sb.account(&sender).unwrap().balance, before.balance - amount - fee);
        assert_eq!(sb.validator(&pk.address()).unwrap().stake, amount);

        // The same object again.
        let err = chain.strict.execute(&trx, &mut sb).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSequence);

        // Next sequence, but the key is already on record.
        let trx = Transaction::new_bond(
            chain.stamp(),
            n + 2,
            sender,
            pk.address(),
            Some(pk),
            amount,
            fee,
            "",
        );
        let err = chain.strict.execute(&trx, &mut sb).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPublicKey);

        chain.fees += fee;
        chain.commit(sb);
        chain.check_supply();
        assert_eq!(chain.state(&pk.address()), LifecycleState::Bonded);
    }

    // =============================================================================
    // VALIDATOR LIFECYCLE
    // =============================================================================

    #[test]
    fn test_full_validator_lifecycle() {
        let mut chain = Chain::new();
        let params = chain.td.snapshot.params.clone();
        let sender = chain.td.accounts[0];
        let pk = chain.td.random_key();
        let addr = pk.address();
        let stake = 20_000;

        // Bond.
        assert_eq!(chain.state(&addr), LifecycleState::Unknown);
        let trx = Transaction::new_bond(
            chain.stamp(),
            1,
            sender,
            addr,
            Some(pk),
            stake,
            chain.fee(stake),
            "bond",
        );
        assert!(chain.block(&[trx]).all_accepted());
        let bonded_at = chain.store.height();
        assert_eq!(chain.state(&addr), LifecycleState::Bonded);

        // Sortition is only allowed once the bond is old enough.
        let report = chain.sortition(&pk, 1, 1);
        assert_eq!(
            report.outcomes[0].result.as_ref().unwrap_err().kind(),
            ErrorKind::InvalidHeight
        );
        chain.advance_to(bonded_at + params.bond_interval);
        assert!(chain.sortition(&pk, 1, 2).all_accepted());
        assert_eq!(chain.state(&addr), LifecycleState::InCommittee);
        let snapshot = chain.store.snapshot().unwrap();
        assert!(snapshot.committee.contains(&addr));
        assert_eq!(snapshot.committee.size(), params.committee_size);

        // Committee members cannot unbond under strict execution.
        let unbond = Transaction::new_unbond(chain.stamp(), 2, addr, "");
        let report = chain.block(&[unbond]);
        assert_eq!(
            report.outcomes[0].result.as_ref().unwrap_err().kind(),
            ErrorKind::InvalidTx
        );

        // Later joiners push the validator out of the committee.
        let joiners: Vec<PublicKey> = chain
            .td
            .validator_keys
            .iter()
            .chain(chain.td.committee_keys.iter().take(1))
            .copied()
            .collect();
        for (i, joiner) in joiners.iter().enumerate() {
            assert!(chain.sortition(joiner, 1, 10 + i as u64).all_accepted());
        }
        let snapshot = chain.store.snapshot().unwrap();
        assert!(!snapshot.committee.contains(&addr));
        assert_eq!(chain.state(&addr), LifecycleState::Bonded);

        // Unbond.
        let unbond = Transaction::new_unbond(chain.stamp(), 2, addr, "unbond");
        assert!(chain.block(&[unbond]).all_accepted());
        let unbonded_at = chain.store.height();
        assert_eq!(chain.state(&addr), LifecycleState::Unbonding);

        // Withdraw before the cooldown.
        let amount = stake - chain.fee(stake);
        let withdraw = Transaction::new_withdraw(
            chain.stamp(),
            3,
            addr,
            sender,
            amount,
            chain.fee(amount),
            "",
        );
        let report = chain.block(&[withdraw]);
        assert_eq!(
            report.outcomes[0].result.as_ref().unwrap_err().kind(),
            ErrorKind::InvalidHeight
        );

        // Withdraw after the cooldown.
        chain.advance_to(unbonded_at + params.unbond_interval - 1);
        let balance = chain.sandbox().account(&sender).unwrap().balance;
        let withdraw = Transaction::new_withdraw(
            chain.stamp(),
            3,
            addr,
            sender,
            amount,
            chain.fee(amount),
            "withdraw",
        );
        assert!(chain.block(&[withdraw]).all_accepted());

        let sb = chain.sandbox();
        let remainder = stake - amount - chain.fee(amount);
        assert_eq!(sb.validator(&addr).unwrap().stake, remainder);
        assert_eq!(sb.account(&sender).unwrap().balance, balance + amount);

        // Re-bond.
        let trx = Transaction::new_bond(
            chain.stamp(),
            2,
            sender,
            addr,
            None,
            stake,
            chain.fee(stake),
            "re-bond",
        );
        assert!(chain.block(&[trx]).all_accepted());
        let val = chain.sandbox().validator(&addr).unwrap();
        assert!(!val.has_unbonded());
        assert_eq!(val.stake, remainder + stake);
        assert_eq!(chain.state(&addr), LifecycleState::Bonded);

        chain.check_supply();
    }

    // =============================================================================
    // BATCH EXECUTION
    // =============================================================================

    #[test]
    fn test_block_with_rejections_commits_accepted_only() {
        let mut chain = Chain::new();
        let alice = chain.td.accounts[0];
        let bob = chain.td.accounts[1];
        let carol = chain.td.random_key().address();
        let stamp = chain.stamp();
        let amt = 3_000;
        let fee = chain.fee(amt);
        let bob_before = chain.sandbox().account(&bob).unwrap().balance;
        let too_much = bob_before + amt + 1;

        let batch = vec![
            Transaction::new_transfer(stamp, 1, alice, bob, amt, fee, "1"),
            Transaction::new_transfer(stamp, 3, alice, bob, amt, fee, "gap"),
            Transaction::new_transfer(stamp, 2, alice, carol, amt, fee, "2"),
            Transaction::new_transfer(
                stamp,
                1,
                bob,
                carol,
                too_much,
                chain.fee(too_much),
                "too much",
            ),
            Transaction::new_unbond(stamp, 1, chain.td.committee_keys[0].address(), "member"),
        ];
        let report = chain.block(&batch);

        let kinds: Vec<Option<ErrorKind>> = report
            .outcomes
            .iter()
            .map(|o| o.result.as_ref().err().map(ExecutionError::kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                None,
                Some(ErrorKind::InvalidSequence),
                None,
                Some(ErrorKind::InsufficientFunds),
                Some(ErrorKind::InvalidTx),
            ]
        );
        assert_eq!(report.total_fee, 2 * fee);

        let snapshot = chain.store.snapshot().unwrap();
        assert_eq!(snapshot.accounts[&bob].balance, bob_before + amt);
        assert_eq!(snapshot.accounts[&carol].balance, amt);
        assert_eq!(snapshot.accounts[&alice].sequence, 2);
        chain.check_supply();
    }

    // =============================================================================
    // MODE ISOLATION
    // =============================================================================

    #[test]
    fn test_strict_and_lenient_sandboxes_run_concurrently() {
        let mut chain = Chain::new();
        let snapshot = chain.store.snapshot().unwrap();
        let member = chain.td.committee_keys[0].address();
        let sender = chain.td.accounts[2];
        let stamp = chain.stamp();
        let amt = 2_000;
        let trx = Transaction::new_bond(
            stamp,
            1,
            sender,
            member,
            None,
            amt,
            chain.fee(amt),
            "top up",
        );

        let (strict, lenient) = (&mut chain.strict, &mut chain.lenient);
        let (strict_result, lenient_result) = thread::scope(|s| {
            let strict_handle = s.spawn(|| {
                let mut sb = Sandbox::new(Arc::clone(&snapshot));
                let result = strict.execute(&trx, &mut sb);
                (result, sb.is_modified())
            });
            let lenient_handle = s.spawn(|| {
                let mut sb = Sandbox::new(Arc::clone(&snapshot));
                let result = lenient.execute(&trx, &mut sb);
                (result, sb.validator(&member).map(|v| v.stake))
            });
            (strict_handle.join().unwrap(), lenient_handle.join().unwrap())
        });

        let (result, modified) = strict_result;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidTx);
        assert!(!modified);

        let (result, stake) = lenient_result;
        assert!(result.is_ok());
        let base_stake = snapshot.validators[&member].stake;
        assert_eq!(stake, Some(base_stake + amt));

        // Neither sandbox wrote through to the shared snapshot.
        assert_eq!(chain.store.snapshot().unwrap().validators[&member].stake, base_stake);
    }

    #[test]
    fn test_mempool_check_then_block_execution() {
        let mut chain = Chain::new();
        let sender = chain.td.accounts[3];
        let receiver = chain.td.accounts[0];
        let amt = 7_000;
        let trx = Transaction::new_transfer(
            chain.stamp(),
            1,
            sender,
            receiver,
            amt,
            chain.fee(amt),
            "",
        );

        let mempool_view = chain.sandbox();
        assert!(chain.lenient.check(&trx, &mempool_view).is_ok());
        assert!(!mempool_view.is_modified());

        assert!(chain.block(&[trx.clone()]).all_accepted());

        // Admitted again after inclusion: the sequence is spent.
        let err = chain.lenient.check(&trx, &chain.sandbox()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSequence);
        chain.check_supply();
    }
}
