//! # Integration Test Flows - Fee Settlement
//!
//! Settlement accounting over a live in-memory ledger: the ordinary
//! path, both revenue-split accounting modes, and the grant path. The
//! legacy-mode arithmetic is pinned exactly, since the running network
//! depends on it.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mc_admission::adapters::{
        InMemoryLedger, InMemoryRevenueRegistry, PermissiveSignatureAuthority, StaticGrantTable,
    };
    use mc_admission::{
        AdmissionCollaborators, AdmissionConfig, AdmissionContext, AdmissionError,
        AdmissionPipeline, ExecutionMode, SettlementMode,
    };
    use shared_types::{Address, CoinSet, Message, Transaction, U256};

    const PAYER: Address = [0xAA; 20];
    const GRANTER: Address = [0xBB; 20];
    const CONTRACT: Address = [0xC0; 20];
    const WITHDRAWER: Address = [0xD0; 20];
    const COLLECTOR: Address = [0xFE; 20];

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// Ledger with a funded payer, a funded collector (so legacy mode can
    /// front the withdrawer share), and a withdrawer account.
    fn settlement_ledger() -> Arc<InMemoryLedger> {
        Arc::new(
            InMemoryLedger::new()
                .with_funded_account(PAYER, CoinSet::new().with("ujuno", 10_000u64))
                .with_funded_account(GRANTER, CoinSet::new().with("ujuno", 10_000u64))
                .with_account(WITHDRAWER)
                .with_module(
                    "distribution",
                    COLLECTOR,
                    CoinSet::new().with("ujuno", 10_000u64),
                ),
        )
    }

    fn registry_with_withdrawer() -> Arc<InMemoryRevenueRegistry> {
        Arc::new(InMemoryRevenueRegistry::new().with_record(
            CONTRACT,
            [0x99; 20],
            Some(WITHDRAWER),
        ))
    }

    fn pipeline_with(
        ledger: Arc<InMemoryLedger>,
        revenue: Option<Arc<InMemoryRevenueRegistry>>,
        grants: Option<Arc<StaticGrantTable>>,
        mode: SettlementMode,
    ) -> AdmissionPipeline {
        let config = AdmissionConfig {
            settlement_mode: mode,
            ..AdmissionConfig::for_testing()
        };
        let mut collaborators = AdmissionCollaborators::new()
            .with_accounts(ledger.clone())
            .with_ledger(ledger)
            .with_signatures(Arc::new(PermissiveSignatureAuthority::new()));
        if let Some(revenue) = revenue {
            collaborators = collaborators.with_revenue(revenue);
        }
        if let Some(grants) = grants {
            collaborators = collaborators.with_fee_grants(grants);
        }
        AdmissionPipeline::new(config, collaborators).expect("pipeline construction")
    }

    fn deliver_ctx() -> AdmissionContext {
        AdmissionContext::new(ExecutionMode::Deliver, 100)
    }

    fn contract_tx(fee: u64) -> Transaction {
        Transaction::new(
            vec![Message::ExecuteContract {
                sender: PAYER,
                contract: CONTRACT,
                payload: vec![0x01],
            }],
            CoinSet::new().with("ujuno", fee),
            100_000,
            PAYER,
        )
    }

    fn plain_tx(fee: u64) -> Transaction {
        Transaction::new(
            vec![Message::Other {
                type_url: "/bank.MsgSend".to_string(),
            }],
            CoinSet::new().with("ujuno", fee),
            100_000,
            PAYER,
        )
    }

    fn ujuno(ledger: &InMemoryLedger, address: &Address) -> U256 {
        ledger.balance_of(address).amount_of("ujuno")
    }

    // =========================================================================
    // INTEGRATION TESTS: ORDINARY PATH
    // =========================================================================

    #[test]
    fn test_no_contract_fee_moves_exactly_to_collector() {
        let ledger = settlement_ledger();
        let pipeline = pipeline_with(ledger.clone(), None, None, SettlementMode::Legacy);

        pipeline.admit(&mut deliver_ctx(), &plain_tx(100)).unwrap();

        assert_eq!(ujuno(&ledger, &PAYER), U256::from(9_900u64));
        assert_eq!(
            ledger.module_balance("distribution").amount_of("ujuno"),
            U256::from(10_100u64)
        );
        assert_eq!(ujuno(&ledger, &WITHDRAWER), U256::zero());
    }

    #[test]
    fn test_contract_without_registration_is_ordinary_path() {
        let ledger = settlement_ledger();
        // Registry present but the contract has no record.
        let registry = Arc::new(InMemoryRevenueRegistry::new());
        let pipeline = pipeline_with(ledger.clone(), Some(registry), None, SettlementMode::Legacy);

        pipeline.admit(&mut deliver_ctx(), &contract_tx(101)).unwrap();

        assert_eq!(ujuno(&ledger, &PAYER), U256::from(10_000u64 - 101));
        assert_eq!(ujuno(&ledger, &WITHDRAWER), U256::zero());
    }

    // =========================================================================
    // INTEGRATION TESTS: LEGACY SPLIT (pinned network arithmetic)
    // =========================================================================

    #[test]
    fn test_legacy_split_exact_balances() {
        let ledger = settlement_ledger();
        let pipeline = pipeline_with(
            ledger.clone(),
            Some(registry_with_withdrawer()),
            None,
            SettlementMode::Legacy,
        );

        pipeline.admit(&mut deliver_ctx(), &contract_tx(101)).unwrap();

        // Half = floor(101/2) = 50; withdrawer share = 101 - 50 = 51.
        assert_eq!(ujuno(&ledger, &WITHDRAWER), U256::from(51u64));
        // The payer is debited only the 51, never the retained half.
        assert_eq!(ujuno(&ledger, &PAYER), U256::from(10_000u64 - 51));
        // The collector pays out 51 and is reimbursed 51: net zero.
        assert_eq!(
            ledger.module_balance("distribution").amount_of("ujuno"),
            U256::from(10_000u64)
        );
    }

    #[test]
    fn test_legacy_split_with_even_fee() {
        let ledger = settlement_ledger();
        let pipeline = pipeline_with(
            ledger.clone(),
            Some(registry_with_withdrawer()),
            None,
            SettlementMode::Legacy,
        );

        pipeline.admit(&mut deliver_ctx(), &contract_tx(100)).unwrap();

        assert_eq!(ujuno(&ledger, &WITHDRAWER), U256::from(50u64));
        assert_eq!(ujuno(&ledger, &PAYER), U256::from(10_000u64 - 50));
    }

    // =========================================================================
    // INTEGRATION TESTS: CORRECTED SPLIT
    // =========================================================================

    #[test]
    fn test_corrected_split_exact_balances() {
        let ledger = settlement_ledger();
        let pipeline = pipeline_with(
            ledger.clone(),
            Some(registry_with_withdrawer()),
            None,
            SettlementMode::Corrected,
        );

        pipeline.admit(&mut deliver_ctx(), &contract_tx(101)).unwrap();

        // The payer pays the full fee; the collector keeps the retained
        // half after paying out the withdrawer share.
        assert_eq!(ujuno(&ledger, &PAYER), U256::from(10_000u64 - 101));
        assert_eq!(ujuno(&ledger, &WITHDRAWER), U256::from(51u64));
        assert_eq!(
            ledger.module_balance("distribution").amount_of("ujuno"),
            U256::from(10_000u64 + 50)
        );
    }

    // =========================================================================
    // INTEGRATION TESTS: GRANT PATH
    // =========================================================================

    #[test]
    fn test_granter_pays_when_grant_covers_fee() {
        let ledger = settlement_ledger();
        let grants = Arc::new(StaticGrantTable::new().with_allowance(
            GRANTER,
            PAYER,
            CoinSet::new().with("ujuno", 500u64),
        ));
        let pipeline = pipeline_with(ledger.clone(), None, Some(grants), SettlementMode::Legacy);

        let tx = plain_tx(100).with_granter(GRANTER);
        pipeline.admit(&mut deliver_ctx(), &tx).unwrap();

        // Deduction hits the granter, not the literal payer.
        assert_eq!(ujuno(&ledger, &GRANTER), U256::from(9_900u64));
        assert_eq!(ujuno(&ledger, &PAYER), U256::from(10_000u64));
    }

    #[test]
    fn test_granter_rejected_without_grant_capability() {
        let ledger = settlement_ledger();
        let pipeline = pipeline_with(ledger.clone(), None, None, SettlementMode::Legacy);

        let tx = plain_tx(100).with_granter(GRANTER);
        let err = pipeline.admit(&mut deliver_ctx(), &tx).unwrap_err();
        assert!(matches!(err, AdmissionError::GrantNotAuthorized { .. }));

        // Nothing moved.
        assert_eq!(ujuno(&ledger, &GRANTER), U256::from(10_000u64));
        assert_eq!(ujuno(&ledger, &PAYER), U256::from(10_000u64));
    }

    #[test]
    fn test_granter_rejected_when_allowance_too_small() {
        let ledger = settlement_ledger();
        let grants = Arc::new(StaticGrantTable::new().with_allowance(
            GRANTER,
            PAYER,
            CoinSet::new().with("ujuno", 99u64),
        ));
        let pipeline = pipeline_with(ledger, None, Some(grants), SettlementMode::Legacy);

        let tx = plain_tx(100).with_granter(GRANTER);
        let err = pipeline.admit(&mut deliver_ctx(), &tx).unwrap_err();
        assert!(matches!(err, AdmissionError::GrantNotAuthorized { .. }));
    }

    // =========================================================================
    // INTEGRATION TESTS: FAILURE MODES
    // =========================================================================

    #[test]
    fn test_broke_payer_is_rejected_with_insufficient_funds() {
        let ledger = Arc::new(
            InMemoryLedger::new()
                .with_funded_account(PAYER, CoinSet::new().with("ujuno", 10u64))
                .with_module("distribution", COLLECTOR, CoinSet::new()),
        );
        let pipeline = pipeline_with(ledger, None, None, SettlementMode::Legacy);

        let err = pipeline
            .admit(&mut deliver_ctx(), &plain_tx(100))
            .unwrap_err();
        assert!(matches!(err, AdmissionError::InsufficientFunds(_)));
    }

    #[test]
    fn test_unknown_payer_is_rejected() {
        let ledger = Arc::new(
            InMemoryLedger::new().with_module("distribution", COLLECTOR, CoinSet::new()),
        );
        let pipeline = pipeline_with(ledger, None, None, SettlementMode::Legacy);

        let err = pipeline
            .admit(&mut deliver_ctx(), &plain_tx(100))
            .unwrap_err();
        assert!(matches!(err, AdmissionError::UnknownFeePayer { .. }));
    }
}
