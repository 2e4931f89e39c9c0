use crate::{Hash256, Result, TypesError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tree_hash::{PackedEncoding, TreeHash, TreeHashType};

pub const PUBLIC_KEY_BYTES_LEN: usize = 48;
pub const SIGNATURE_BYTES_LEN: usize = 96;

/// Defines a fixed-length byte newtype that hex-encodes for display and serde
/// and merkleizes as an SSZ byte vector.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub fn from_slice(slice: &[u8]) -> Result<Self> {
                if slice.len() != $len {
                    return Err(TypesError::InvalidLength {
                        expected: $len,
                        actual: slice.len(),
                    });
                }
                let mut bytes = [0u8; $len];
                bytes.copy_from_slice(slice);
                Ok(Self(bytes))
            }

            pub fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn to_bytes(&self) -> [u8; $len] {
                self.0
            }

            /// Lowercase hex without the `0x` prefix.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self([0u8; $len])
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                if s.len() != $len * 2 {
                    return Err(TypesError::InvalidLength {
                        expected: $len * 2,
                        actual: s.len(),
                    });
                }
                let bytes = hex::decode(s).map_err(|_| TypesError::InvalidHex(s.to_string()))?;
                Self::from_slice(&bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_str(&s).map_err(de::Error::custom)
            }
        }

        impl TreeHash for $name {
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
                tree_hash::merkle_root(&self.0, 0)
            }
        }
    };
}

fixed_bytes!(
    /// Compressed BLS12-381 public key, as used to key slashing protection
    /// records.
    PublicKeyBytes,
    PUBLIC_KEY_BYTES_LEN
);

fixed_bytes!(
    /// Compressed BLS12-381 signature.
    SignatureBytes,
    SIGNATURE_BYTES_LEN
);
