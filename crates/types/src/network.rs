//! Network parameters and the slot/epoch calendar derived from wall-clock time.

use crate::{Epoch, Hash256, Result, Root, Slot, TypesError, Version};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SECONDS_PER_SLOT: u64 = 12;
pub const SLOTS_PER_EPOCH: u64 = 32;

/// Estimates slots and epochs from wall-clock time.
pub trait NetworkCalendar: Send + Sync {
    /// Unix time of slot 0.
    fn min_genesis_time(&self) -> u64;

    fn seconds_per_slot(&self) -> u64;

    fn slots_per_epoch(&self) -> u64;

    /// Slot at the given unix time, 0 before genesis.
    fn estimated_slot_at_time(&self, unix_secs: i64) -> Slot {
        let genesis = self.min_genesis_time() as i64;
        if unix_secs < genesis {
            return 0;
        }
        ((unix_secs - genesis) as u64)
            .checked_div(self.seconds_per_slot())
            .unwrap_or(0)
    }

    fn estimated_epoch_at_slot(&self, slot: Slot) -> Epoch {
        slot.checked_div(self.slots_per_epoch()).unwrap_or(0)
    }

    fn estimated_current_slot(&self) -> Slot {
        self.estimated_slot_at_time(unix_now())
    }

    fn estimated_current_epoch(&self) -> Epoch {
        self.estimated_epoch_at_slot(self.estimated_current_slot())
    }
}

/// Current unix time in seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Known Ethereum networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Prater,
    Sepolia,
    Holesky,
    Hoodi,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Mainnet,
        Network::Prater,
        Network::Sepolia,
        Network::Holesky,
        Network::Hoodi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Prater => "prater",
            Network::Sepolia => "sepolia",
            Network::Holesky => "holesky",
            Network::Hoodi => "hoodi",
        }
    }

    pub fn genesis_fork_version(&self) -> Version {
        match self {
            Network::Mainnet => [0x00, 0x00, 0x00, 0x00],
            Network::Prater => [0x00, 0x00, 0x10, 0x20],
            Network::Sepolia => [0x90, 0x00, 0x00, 0x69],
            Network::Holesky => [0x01, 0x01, 0x70, 0x00],
            Network::Hoodi => [0x10, 0x00, 0x09, 0x10],
        }
    }

    pub fn genesis_validators_root(&self) -> Root {
        let hex_root: &str = match self {
            Network::Mainnet => "4b363db94e286120d76eb905340fdd4e54bfe9f06bf33ff6cf5ad27f511bfe95",
            Network::Prater => "043db0d9a83813551ee2f33450d23797757d430911a9320530ad8a0eabc43efb",
            Network::Sepolia => "d8ea171f3c94aea21ebc42a1ed61052acf3f9209c00e4efbaaddac09ed9b8078",
            Network::Holesky => "9143aa7c615a7f7115e2b6aac319c03529df8242ae705fba9df39b79c59fa8b1",
            Network::Hoodi => "212f13fc4df078b6cb7db228f1c8307566dcecf900867401a92023d7ba99cb5f",
        };
        // Constants above are well-formed 32-byte hex.
        let mut root = [0u8; 32];
        if hex::decode_to_slice(hex_root, &mut root).is_err() {
            return Hash256::ZERO;
        }
        Hash256::from(root)
    }

    pub fn deposit_contract_address(&self) -> &'static str {
        match self {
            Network::Mainnet | Network::Hoodi => "0x00000000219ab540356cBB839Cbe05303d7705Fa",
            Network::Prater => "0xff50ed3d0ec03ac01d4c79aad74928bff48a7b2b",
            Network::Sepolia | Network::Holesky => "0x4242424242424242424242424242424242424242",
        }
    }

    pub fn min_genesis_time(&self) -> u64 {
        match self {
            Network::Mainnet => 1606824023,
            Network::Prater => 1616508000,
            Network::Sepolia => 1655733600,
            Network::Holesky => 1695902400,
            Network::Hoodi => 1742213400,
        }
    }

    pub fn from_fork_version(version: Version) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.genesis_fork_version() == version)
            .ok_or_else(|| TypesError::UnknownForkVersion(hex::encode(version)))
    }

    pub fn config(&self) -> NetworkConfig {
        NetworkConfig {
            name: self.name().to_string(),
            genesis_fork_version: self.genesis_fork_version(),
            genesis_validators_root: self.genesis_validators_root(),
            deposit_contract_address: self.deposit_contract_address().to_string(),
            min_genesis_time: self.min_genesis_time(),
            seconds_per_slot: SECONDS_PER_SLOT,
            slots_per_epoch: SLOTS_PER_EPOCH,
        }
    }
}

impl FromStr for Network {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|n| n.name() == lower)
            .ok_or_else(|| TypesError::UnknownNetwork(s.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl NetworkCalendar for Network {
    fn min_genesis_time(&self) -> u64 {
        Network::min_genesis_time(self)
    }

    fn seconds_per_slot(&self) -> u64 {
        SECONDS_PER_SLOT
    }

    fn slots_per_epoch(&self) -> u64 {
        SLOTS_PER_EPOCH
    }
}

/// Resolved parameters of a network. Custom values are allowed for devnets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: String,
    pub genesis_fork_version: Version,
    pub genesis_validators_root: Root,
    pub deposit_contract_address: String,
    pub min_genesis_time: u64,
    pub seconds_per_slot: u64,
    pub slots_per_epoch: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Network::Mainnet.config()
    }
}

impl From<Network> for NetworkConfig {
    fn from(network: Network) -> Self {
        network.config()
    }
}

impl NetworkCalendar for NetworkConfig {
    fn min_genesis_time(&self) -> u64 {
        self.min_genesis_time
    }

    fn seconds_per_slot(&self) -> u64 {
        self.seconds_per_slot
    }

    fn slots_per_epoch(&self) -> u64 {
        self.slots_per_epoch
    }
}
