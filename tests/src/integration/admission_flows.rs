//! # Integration Test Flows - Admission Pipeline
//!
//! Exercises the composed pipeline end-to-end over the in-memory
//! adapters: guard ordering, mode-dependent fee checks, and the
//! fail-fast contract.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mc_admission::adapters::{InMemoryLedger, PermissiveSignatureAuthority};
    use mc_admission::{
        AdmissionApi, AdmissionCollaborators, AdmissionConfig, AdmissionContext, AdmissionError,
        AdmissionPipeline, ExecutionMode, GasPriceSet,
    };
    use shared_types::{Address, CoinSet, CommissionRate, Message, Transaction, U256};

    const PAYER: Address = [0xAA; 20];
    const COLLECTOR: Address = [0xFE; 20];

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn funded_ledger() -> Arc<InMemoryLedger> {
        Arc::new(
            InMemoryLedger::new()
                .with_funded_account(PAYER, CoinSet::new().with("ujuno", 1_000_000u64))
                .with_module("distribution", COLLECTOR, CoinSet::new()),
        )
    }

    fn pipeline(ledger: Arc<InMemoryLedger>) -> AdmissionPipeline {
        AdmissionPipeline::new(
            AdmissionConfig::for_testing(),
            AdmissionCollaborators::new()
                .with_accounts(ledger.clone())
                .with_ledger(ledger)
                .with_signatures(Arc::new(PermissiveSignatureAuthority::new())),
        )
        .expect("pipeline construction")
    }

    fn check_ctx() -> AdmissionContext {
        AdmissionContext::new(ExecutionMode::Check, 100)
    }

    fn plain_message() -> Message {
        Message::Other {
            type_url: "/bank.MsgSend".to_string(),
        }
    }

    fn plain_tx(fee: u64) -> Transaction {
        Transaction::new(
            vec![plain_message()],
            CoinSet::new().with("ujuno", fee),
            100_000,
            PAYER,
        )
    }

    // =========================================================================
    // INTEGRATION TESTS: HAPPY PATH
    // =========================================================================

    #[test]
    fn test_admission_moves_fee_and_emits_event() {
        let ledger = funded_ledger();
        let pipeline = pipeline(ledger.clone());

        let mut ctx = check_ctx();
        pipeline.admit(&mut ctx, &plain_tx(100)).unwrap();

        assert_eq!(
            ledger.balance_of(&PAYER).amount_of("ujuno"),
            U256::from(1_000_000u64 - 100)
        );
        assert_eq!(
            ledger.module_balance("distribution").amount_of("ujuno"),
            U256::from(100u64)
        );
        assert_eq!(ctx.events.len(), 1);
        assert!(ctx.gas_consumed() > 0);
    }

    #[tokio::test]
    async fn test_admission_api_async_surface() {
        let ledger = funded_ledger();
        let pipeline = pipeline(ledger);
        let api: Arc<dyn AdmissionApi> = Arc::new(pipeline);

        let mut ctx = AdmissionContext::new(ExecutionMode::Deliver, 100);
        api.admit(&mut ctx, &plain_tx(100)).await.unwrap();
        assert_eq!(ctx.events.len(), 1);
    }

    // =========================================================================
    // INTEGRATION TESTS: FEE SUFFICIENCY BY MODE
    // =========================================================================

    #[test]
    fn test_min_gas_price_policy_enforced_in_check_mode() {
        let ledger = funded_ledger();
        let pipeline = pipeline(ledger);
        let policy = GasPriceSet::new().with("ujuno", 100);

        // required = ceil(0.0001 * 100_000) = 10
        let mut ctx = check_ctx().with_min_gas_prices(policy.clone());
        pipeline.admit(&mut ctx, &plain_tx(10)).unwrap();

        let mut ctx = check_ctx().with_min_gas_prices(policy);
        let err = pipeline.admit(&mut ctx, &plain_tx(9)).unwrap_err();
        assert!(matches!(err, AdmissionError::InsufficientFee { .. }));
    }

    #[test]
    fn test_underpriced_fee_tolerated_outside_check_mode() {
        let ledger = funded_ledger();
        let pipeline = pipeline(ledger);
        let policy = GasPriceSet::new().with("ujuno", 100);

        // Simulation bypasses the policy.
        let mut ctx = check_ctx().with_min_gas_prices(policy.clone()).simulating();
        pipeline.admit(&mut ctx, &plain_tx(9)).unwrap();

        // Deliver mode bypasses the policy.
        let mut ctx =
            AdmissionContext::new(ExecutionMode::Deliver, 100).with_min_gas_prices(policy);
        pipeline.admit(&mut ctx, &plain_tx(9)).unwrap();
    }

    // =========================================================================
    // INTEGRATION TESTS: GUARDS
    // =========================================================================

    #[test]
    fn test_low_commission_rejected_before_any_transfer() {
        let ledger = funded_ledger();
        let pipeline = pipeline(ledger.clone());

        let tx = Transaction::new(
            vec![Message::CreateValidator {
                operator: [0x01; 20],
                commission_rate: CommissionRate::from_basis_points(499),
            }],
            CoinSet::new().with("ujuno", 100u64),
            100_000,
            PAYER,
        );

        let mut ctx = check_ctx();
        let err = pipeline.admit(&mut ctx, &tx).unwrap_err();
        assert!(matches!(err, AdmissionError::CommissionTooLow { .. }));

        // Fail-fast: the settlement stage never ran.
        assert_eq!(
            ledger.balance_of(&PAYER).amount_of("ujuno"),
            U256::from(1_000_000u64)
        );
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn test_expired_transaction_rejected() {
        let ledger = funded_ledger();
        let pipeline = pipeline(ledger);

        let tx = plain_tx(100).with_timeout_height(99);
        let mut ctx = check_ctx(); // height 100 > timeout 99
        let err = pipeline.admit(&mut ctx, &tx).unwrap_err();
        assert!(matches!(err, AdmissionError::InvalidTransaction(_)));
    }

    #[test]
    fn test_oversized_memo_rejected() {
        let ledger = funded_ledger();
        let pipeline = pipeline(ledger);

        // for_testing caps memos at 64 bytes.
        let tx = plain_tx(100).with_memo(&"m".repeat(65));
        let err = pipeline.admit(&mut check_ctx(), &tx).unwrap_err();
        assert!(matches!(err, AdmissionError::InvalidTransaction(_)));
    }

    #[test]
    fn test_gas_limit_too_small_for_tx_size() {
        let ledger = funded_ledger();
        let pipeline = pipeline(ledger);

        let mut tx = plain_tx(100);
        tx.gas_limit = 1; // cannot even cover the per-byte size charge
        let err = pipeline.admit(&mut check_ctx(), &tx).unwrap_err();
        assert!(matches!(err, AdmissionError::GasLimitExceeded { .. }));
    }

    // =========================================================================
    // INTEGRATION TESTS: ORDER INVARIANCE
    // =========================================================================

    #[test]
    fn test_reordering_non_interacting_messages_preserves_outcome() {
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let ledger = funded_ledger();
        let pipeline = pipeline(ledger);

        let mut messages = vec![
            plain_message(),
            Message::EditValidator {
                operator: [0x02; 20],
                commission_rate: None,
            },
            Message::Other {
                type_url: "/gov.MsgVote".to_string(),
            },
            Message::Other {
                type_url: "/staking.MsgDelegate".to_string(),
            },
        ];

        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..8 {
            messages.shuffle(&mut rng);
            let tx = Transaction::new(
                messages.clone(),
                CoinSet::new().with("ujuno", 100u64),
                100_000,
                PAYER,
            );
            let outcome = pipeline.admit(&mut check_ctx(), &tx);
            assert!(outcome.is_ok(), "order {messages:?} changed the outcome");
        }
    }
}
