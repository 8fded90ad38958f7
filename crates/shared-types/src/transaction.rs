//! # Transactions and Messages
//!
//! The transaction shape consumed by the admission pipeline, and the
//! closed message variant set it inspects.
//!
//! Message kinds the pipeline does not recognize map to
//! [`Message::Other`], which passes every admission check
//! unconditionally; the match over kinds stays total.

use crate::coins::CoinSet;
use crate::entities::{Address, CommissionRate, Hash, PublicKey, Signature};
use crate::errors::{CodecError, TransactionError};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// A message inside a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// Registers a new validator with the given commission rate.
    CreateValidator {
        /// Operator account of the new validator.
        operator: Address,
        /// Initial commission rate.
        commission_rate: CommissionRate,
    },
    /// Edits an existing validator.
    EditValidator {
        /// Operator account of the validator.
        operator: Address,
        /// New commission rate; `None` means the rate is untouched.
        commission_rate: Option<CommissionRate>,
    },
    /// Executes a deployed smart contract.
    ExecuteContract {
        /// The calling account.
        sender: Address,
        /// The contract being executed.
        contract: Address,
        /// Opaque call payload, interpreted by the execution engine.
        payload: Vec<u8>,
    },
    /// Executes a batch of messages under a prior authorization grant.
    ///
    /// Inner messages travel encoded and must be decoded before
    /// inspection; decoding can fail for malformed payloads.
    AuthzExec {
        /// The account executing on the granter's behalf.
        grantee: Address,
        /// Encoded inner messages.
        inner: Vec<RawMessage>,
    },
    /// Any message kind the admission pipeline does not inspect.
    Other {
        /// Routing identifier of the unrecognized kind.
        type_url: String,
    },
}

/// An encoded message, as carried inside an authorization batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage(pub Vec<u8>);

impl RawMessage {
    /// Encodes a message into its canonical byte form.
    pub fn encode(message: &Message) -> Result<RawMessage, CodecError> {
        bincode::serialize(message)
            .map(RawMessage)
            .map_err(|e| CodecError::Encoding(e.to_string()))
    }

    /// Decodes the canonical byte form back into a message.
    pub fn decode(&self) -> Result<Message, CodecError> {
        bincode::deserialize(&self.0).map_err(|e| CodecError::Malformed(e.to_string()))
    }
}

/// Signer metadata attached to a transaction.
///
/// Produced and consumed by the signature-verification collaborator; the
/// admission pipeline treats the signature bytes as opaque.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignerInfo {
    /// The signer's public key, absent for accounts signing for the
    /// first time before their key is on record.
    pub public_key: Option<PublicKey>,
    /// The signer's expected sequence number.
    pub sequence: u64,
    /// Signature over the canonical transaction bytes.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

/// A transaction submitted for admission.
///
/// Immutable once submitted: the pipeline reads it, never rewrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Ordered message list.
    pub messages: Vec<Message>,
    /// Declared fee.
    pub fee: CoinSet,
    /// Declared gas limit.
    pub gas_limit: u64,
    /// Account financially responsible for the fee, absent a grant.
    pub fee_payer: Address,
    /// Account that pre-authorized paying this fee, if any.
    pub fee_granter: Option<Address>,
    /// Free-form memo.
    pub memo: String,
    /// Height after which the transaction is invalid (0 = no limit).
    pub timeout_height: u64,
    /// Encoded extension options; unknown options are rejected.
    pub extension_options: Vec<RawMessage>,
    /// Signer metadata, one entry per required signer.
    pub signers: Vec<SignerInfo>,
}

impl Transaction {
    /// Creates a transaction with no granter, memo, timeout, or
    /// extension options, signed by the fee payer at sequence zero.
    pub fn new(messages: Vec<Message>, fee: CoinSet, gas_limit: u64, fee_payer: Address) -> Self {
        Self {
            messages,
            fee,
            gas_limit,
            fee_payer,
            fee_granter: None,
            memo: String::new(),
            timeout_height: 0,
            extension_options: Vec::new(),
            signers: vec![SignerInfo {
                public_key: None,
                sequence: 0,
                signature: [0u8; 64],
            }],
        }
    }

    /// Sets the fee granter.
    pub fn with_granter(mut self, granter: Address) -> Self {
        self.fee_granter = Some(granter);
        self
    }

    /// Sets the memo.
    pub fn with_memo(mut self, memo: &str) -> Self {
        self.memo = memo.to_string();
        self
    }

    /// Sets the timeout height.
    pub fn with_timeout_height(mut self, height: u64) -> Self {
        self.timeout_height = height;
        self
    }

    /// Computes the transaction hash over the canonical encoding.
    pub fn hash(&self) -> Hash {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        // An in-memory transaction always encodes; an empty hash input
        // is the non-panicking fallback.
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }

    /// Returns the canonical encoded size in bytes.
    pub fn encoded_size(&self) -> Result<u64, CodecError> {
        bincode::serialized_size(self).map_err(|e| CodecError::Encoding(e.to_string()))
    }

    /// Transaction-level self-consistency checks that need no chain
    /// state: messages present, signers present, fee denominations valid.
    pub fn validate_basic(&self) -> Result<(), TransactionError> {
        if self.messages.is_empty() {
            return Err(TransactionError::EmptyMessages);
        }
        if self.signers.is_empty() {
            return Err(TransactionError::NoSigners);
        }
        self.fee.validate_denoms()?;
        Ok(())
    }

    /// Returns true if the timeout height has passed at `current_height`.
    pub fn is_expired(&self, current_height: u64) -> bool {
        self.timeout_height != 0 && current_height > self.timeout_height
    }
}
