//! Consensus containers that a validator signs.
//!
//! Only the fields that contribute to a hash tree root are modelled. Full
//! beacon blocks are signed through their header: a block and its header
//! (with `body_root = hash_tree_root(body)`) share the same root.

use crate::{Address, Epoch, Gwei, Hash256, PublicKeyBytes, SignatureBytes, Slot, ValidatorIndex};
use serde::{Deserialize, Serialize};
use std::fmt;
use tree_hash_derive::TreeHash;

/// An (epoch, root) pair identifying a point in the chain's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TreeHash)]
pub struct Checkpoint {
    pub epoch: Epoch,
    pub root: Hash256,
}

impl Checkpoint {
    pub fn new(epoch: Epoch, root: Hash256) -> Self {
        Self { epoch, root }
    }
}

/// One attestation vote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TreeHash)]
pub struct AttestationData {
    pub slot: Slot,
    pub index: u64,

    /// LMD GHOST vote
    pub beacon_block_root: Hash256,

    /// FFG vote
    pub source: Checkpoint,
    pub target: Checkpoint,
}

impl fmt::Display for AttestationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slot={} index={} source={} target={}",
            self.slot, self.index, self.source.epoch, self.target.epoch
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TreeHash)]
pub struct BeaconBlockHeader {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body_root: Hash256,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TreeHash)]
pub struct VoluntaryExit {
    pub epoch: Epoch,
    pub validator_index: ValidatorIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TreeHash)]
pub struct BlsToExecutionChange {
    pub validator_index: ValidatorIndex,
    pub from_bls_pubkey: PublicKeyBytes,
    pub to_execution_address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TreeHash)]
pub struct SyncAggregatorSelectionData {
    pub slot: Slot,
    pub subcommittee_index: u64,
}

/// Builder API validator registration (v1).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TreeHash)]
pub struct ValidatorRegistration {
    pub fee_recipient: Address,
    pub gas_limit: u64,
    pub timestamp: u64,
    pub pubkey: PublicKeyBytes,
}

/// What a validator signs to make a deposit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TreeHash)]
pub struct DepositMessage {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: Hash256,
    pub amount: Gwei,
}

/// Deposit contract input: the message plus its signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TreeHash)]
pub struct DepositData {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: Hash256,
    pub amount: Gwei,
    pub signature: SignatureBytes,
}

impl DepositData {
    pub fn message(&self) -> DepositMessage {
        DepositMessage {
            pubkey: self.pubkey,
            withdrawal_credentials: self.withdrawal_credentials,
            amount: self.amount,
        }
    }
}
