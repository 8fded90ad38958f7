//! Message inspection.
//!
//! Classifies the messages of a transaction for the commission guard and
//! the fee settlement stage. Authorization batches are unwrapped exactly
//! one level deep: a batch nested inside a batch is not inspected again,
//! so authorization-of-authorization is unsupported and passes.

use super::errors::AdmissionError;
use shared_types::{Address, CommissionRate, Message, RawMessage};

/// Validates the commission floor across every message of a transaction,
/// in transaction order, returning the first failure.
pub fn validate_commissions(
    messages: &[Message],
    minimum: CommissionRate,
) -> Result<(), AdmissionError> {
    for message in messages {
        match message {
            Message::AuthzExec { inner, .. } => validate_authz_batch(inner, minimum)?,
            other => validate_message(other, minimum)?,
        }
    }
    Ok(())
}

/// Validates a single, already-decoded message against the floor.
fn validate_message(message: &Message, minimum: CommissionRate) -> Result<(), AdmissionError> {
    match message {
        Message::CreateValidator {
            commission_rate, ..
        } => {
            if *commission_rate < minimum {
                return Err(AdmissionError::CommissionTooLow {
                    rate: *commission_rate,
                    minimum,
                });
            }
        }
        Message::EditValidator {
            commission_rate: Some(rate),
            ..
        } => {
            if *rate < minimum {
                return Err(AdmissionError::CommissionTooLow {
                    rate: *rate,
                    minimum,
                });
            }
        }
        // An edit without a rate change, and every other message kind,
        // is not commission-relevant.
        _ => {}
    }
    Ok(())
}

/// Decodes and validates every inner message of an authorization batch.
fn validate_authz_batch(
    inner: &[RawMessage],
    minimum: CommissionRate,
) -> Result<(), AdmissionError> {
    for raw in inner {
        let message = raw
            .decode()
            .map_err(|e| AdmissionError::UnauthorizedDecode(e.to_string()))?;
        validate_message(&message, minimum)?;
    }
    Ok(())
}

/// Collects, in transaction order, the contract address of every
/// top-level contract execution.
///
/// Authorization-wrapped executions are not unwrapped here; only
/// top-level messages count toward the revenue split.
pub fn collect_executed_contracts(messages: &[Message]) -> Vec<Address> {
    messages
        .iter()
        .filter_map(|message| match message {
            Message::ExecuteContract { contract, .. } => Some(*contract),
            _ => None,
        })
        .collect()
}
