//! Signing root and signature domain computation.

use crate::{Domain, Hash256, Root, Version};
use tree_hash::{PackedEncoding, TreeHash, TreeHashType};
use tree_hash_derive::TreeHash;

/// Four-byte domain type prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainType(pub [u8; 4]);

impl DomainType {
    pub const BEACON_PROPOSER: Self = Self([0x00, 0x00, 0x00, 0x00]);
    pub const BEACON_ATTESTER: Self = Self([0x01, 0x00, 0x00, 0x00]);
    pub const RANDAO: Self = Self([0x02, 0x00, 0x00, 0x00]);
    pub const DEPOSIT: Self = Self([0x03, 0x00, 0x00, 0x00]);
    pub const VOLUNTARY_EXIT: Self = Self([0x04, 0x00, 0x00, 0x00]);
    pub const SELECTION_PROOF: Self = Self([0x05, 0x00, 0x00, 0x00]);
    pub const AGGREGATE_AND_PROOF: Self = Self([0x06, 0x00, 0x00, 0x00]);
    pub const SYNC_COMMITTEE: Self = Self([0x07, 0x00, 0x00, 0x00]);
    pub const SYNC_COMMITTEE_SELECTION_PROOF: Self = Self([0x08, 0x00, 0x00, 0x00]);
    pub const CONTRIBUTION_AND_PROOF: Self = Self([0x09, 0x00, 0x00, 0x00]);
    pub const BLS_TO_EXECUTION_CHANGE: Self = Self([0x0a, 0x00, 0x00, 0x00]);
    pub const APPLICATION_BUILDER: Self = Self([0x00, 0x00, 0x00, 0x01]);
}

/// Container mixing an object root with its domain; its root is what gets signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TreeHash)]
pub struct SigningData {
    pub object_root: Root,
    pub domain: Domain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForkData {
    pub current_version: Version,
    pub genesis_validators_root: Root,
}

impl ForkData {
    pub fn root(&self) -> Root {
        let mut leaves = [0u8; 64];
        leaves[..4].copy_from_slice(&self.current_version);
        leaves[32..].copy_from_slice(self.genesis_validators_root.as_slice());
        tree_hash::merkle_root(&leaves, 0)
    }
}

/// Opaque bytes merkleized as a byte vector: chunks of 32 bytes, zero padded,
/// without a length mix-in. A 32-byte input is its own root.
#[derive(Debug, Clone, Copy)]
pub struct OpaqueRoot<'a>(pub &'a [u8]);

impl TreeHash for OpaqueRoot<'_> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_root(&self) -> Hash256 {
        tree_hash::merkle_root(self.0, 0)
    }
}

/// `hash_tree_root(SigningData { object_root: hash_tree_root(obj), domain })`
pub fn compute_signing_root<T: TreeHash + ?Sized>(obj: &T, domain: Domain) -> Root {
    SigningData {
        object_root: obj.tree_hash_root(),
        domain,
    }
    .tree_hash_root()
}

/// Domain type followed by the first 28 bytes of the fork data root.
pub fn compute_domain(
    domain_type: DomainType,
    fork_version: Version,
    genesis_validators_root: Root,
) -> Domain {
    let fork_data_root = ForkData {
        current_version: fork_version,
        genesis_validators_root,
    }
    .root();

    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(&domain_type.0);
    domain[4..].copy_from_slice(&fork_data_root.as_slice()[..28]);
    Domain::from(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(s: &str) -> Hash256 {
        Hash256::from_slice(&hex::decode(s).unwrap())
    }

    #[test]
    fn test_mainnet_deposit_domain() {
        let domain = compute_domain(DomainType::DEPOSIT, [0, 0, 0, 0], Hash256::ZERO);
        assert_eq!(
            domain,
            hash("03000000f5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a9")
        );
    }

    #[test]
    fn test_domain_prefix_is_domain_type() {
        let domain = compute_domain(
            DomainType::VOLUNTARY_EXIT,
            [0x01, 0x01, 0x70, 0x00],
            Hash256::repeat_byte(7),
        );
        assert_eq!(&domain.as_slice()[..4], &DomainType::VOLUNTARY_EXIT.0);
    }

    #[test]
    fn test_signing_root_depends_on_domain() {
        let a = compute_signing_root(&42u64, Hash256::ZERO);
        let b = compute_signing_root(&42u64, Hash256::repeat_byte(1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_opaque_root_of_single_chunk_is_identity() {
        let root = Hash256::repeat_byte(0x5c);
        assert_eq!(OpaqueRoot(root.as_slice()).tree_hash_root(), root);
    }

    #[test]
    fn test_opaque_root_pads_short_input() {
        let mut padded = [0u8; 32];
        padded[..3].copy_from_slice(&[1, 2, 3]);
        assert_eq!(OpaqueRoot(&[1, 2, 3]).tree_hash_root(), Hash256::from(padded));
    }
}
