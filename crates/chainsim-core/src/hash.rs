use crate::error::ChainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sha3::Sha3_256;
use std::{fmt, str::FromStr};

/// Digest used for every commitment in a run: transaction hashes, Merkle
/// nodes, block hashes and nonce probes. Output is always lowercase hex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[default]
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha256")]
    Sha256,
}

impl HashAlgorithm {
    pub fn hash(&self, input: &[u8]) -> String {
        match self {
            HashAlgorithm::Sha3_256 => digest_hex::<Sha3_256>(input),
            HashAlgorithm::Sha256 => digest_hex::<Sha256>(input),
        }
    }

    pub fn hash_str(&self, input: &str) -> String {
        self.hash(input.as_bytes())
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}

fn digest_hex<D: Digest>(input: &[u8]) -> String {
    hex::encode(D::digest(input))
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha3-256" | "sha3" => Ok(HashAlgorithm::Sha3_256),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            other => Err(ChainError::InvalidConfig(format!(
                "unknown hash algorithm `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HASH_HEX_SIZE;

    #[test]
    fn sha256_empty_input() {
        assert_eq!(
            HashAlgorithm::Sha256.hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha3_empty_input() {
        assert_eq!(
            HashAlgorithm::Sha3_256.hash(b""),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn hex_output_is_lowercase_and_fixed_width() {
        for alg in [HashAlgorithm::Sha256, HashAlgorithm::Sha3_256] {
            let h = alg.hash_str("A1B50");
            assert_eq!(h.len(), HASH_HEX_SIZE);
            assert!(h.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn algorithms_disagree() {
        assert_ne!(
            HashAlgorithm::Sha256.hash_str("abc"),
            HashAlgorithm::Sha3_256.hash_str("abc")
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!("sha3-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha3_256);
        assert_eq!("SHA256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn serde_names_match_display() {
        let json = serde_json::to_string(&HashAlgorithm::Sha3_256).unwrap();
        assert_eq!(json, "\"sha3-256\"");
        let alg: HashAlgorithm = serde_json::from_str("\"sha256\"").unwrap();
        assert_eq!(alg.to_string(), "sha256");
    }
}
