use std::fmt;

use ed25519_dalek::SigningKey;
use keyseg_core::{FieldLayout, KeyPair, KeysegError, Segment, SegmentedWindowReader, PUBLIC_KEY_LEN};
use rand::{rngs::OsRng, RngCore};
use serde::Serialize;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::encoding::Encoding;

/// Ed25519 seed length accepted by [`seed_matches_public`].
pub const SEED_LEN: usize = 32;

/// Load a key pair from `blob`.
///
/// With a layout, the `public` field is required and `private` is optional.
/// Without one, the first 32 bytes are the public key and everything after
/// them is the private key.
pub fn load_keypair(blob: &[u8], layout: Option<&FieldLayout>) -> Result<KeyPair, KeysegError> {
    let mut pair = KeyPair::new();
    match layout {
        Some(layout) => {
            let split = layout.split(blob)?;
            let public = split.get("public").ok_or_else(|| {
                KeysegError::InvalidConfiguration("layout has no `public` field".into())
            })?;
            pair.set_public_key(&public)?;
            if let Some(private) = split.get("private") {
                pair.set_private_key(&private);
            }
        }
        None => {
            let mut reader = SegmentedWindowReader::new(Segment::whole(blob));
            pair.set_public_key(&reader.read(PUBLIC_KEY_LEN)?)?;
            let rest = reader.remaining();
            if rest > 0 {
                pair.set_private_key(&reader.read(rest)?);
            }
        }
    }
    tracing::debug!(private_len = pair.private_key_len(), "key pair loaded");
    Ok(pair)
}

/// Generate a fresh Ed25519 pair and hold its public key and seed.
pub fn generate_keypair() -> Result<KeyPair, KeysegError> {
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    OsRng.fill_bytes(&mut *seed);
    let signing_key = SigningKey::from_bytes(&seed);
    KeyPair::from_parts(signing_key.verifying_key().as_bytes(), &seed[..])
}

/// `true` when the private half is an Ed25519 seed that derives the stored
/// public key.
pub fn seed_matches_public(pair: &KeyPair) -> bool {
    let Some(public) = pair.public_key() else {
        return false;
    };
    let private = pair.private_key();
    let Ok(seed) = <[u8; SEED_LEN]>::try_from(private.as_slice()) else {
        return false;
    };
    let seed = Zeroizing::new(seed);
    SigningKey::from_bytes(&seed).verifying_key().to_bytes() == public
}

/// SHA-256 of the public key.
pub fn fingerprint(public: &[u8; PUBLIC_KEY_LEN]) -> [u8; 32] {
    Sha256::digest(public).into()
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct KeyReport {
    pub public_key: String,
    pub fingerprint: String,
    pub private_key_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_matches: Option<bool>,
}

impl KeyReport {
    pub fn new(pair: &KeyPair, encoding: Encoding, check: bool) -> Result<Self, KeysegError> {
        let public = pair.public_key().ok_or(KeysegError::InvalidKeyLength {
            expected: PUBLIC_KEY_LEN,
            actual: 0,
        })?;
        Ok(Self {
            public_key: encoding.encode(&public),
            fingerprint: hex::encode(fingerprint(&public)),
            private_key_len: pair.private_key_len(),
            seed_matches: check.then(|| seed_matches_public(pair)),
        })
    }
}

impl fmt::Display for KeyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "public key:   {}", self.public_key)?;
        writeln!(f, "fingerprint:  sha256:{}", self.fingerprint)?;
        writeln!(f, "private key:  {} bytes", self.private_key_len)?;
        if let Some(matches) = self.seed_matches {
            writeln!(f, "seed check:   {}", if matches { "ok" } else { "MISMATCH" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob_for(pair: &KeyPair) -> Vec<u8> {
        let mut blob = pair.public_key().unwrap().to_vec();
        blob.extend_from_slice(&pair.private_key());
        blob
    }

    #[test]
    fn generated_pairs_are_consistent() {
        let pair = generate_keypair().unwrap();
        assert_eq!(pair.private_key_len(), SEED_LEN);
        assert!(seed_matches_public(&pair));

        let other = generate_keypair().unwrap();
        assert_ne!(pair.public_key(), other.public_key());
    }

    #[test]
    fn default_layout_is_public_then_private() {
        let pair = generate_keypair().unwrap();
        let loaded = load_keypair(&blob_for(&pair), None).unwrap();
        assert_eq!(loaded.public_key(), pair.public_key());
        assert_eq!(loaded.private_key().as_slice(), pair.private_key().as_slice());
        assert!(seed_matches_public(&loaded));
    }

    #[test]
    fn public_only_blob_has_empty_private_half() {
        let loaded = load_keypair(&[9u8; 32], None).unwrap();
        assert_eq!(loaded.public_key(), Some([9u8; 32]));
        assert!(loaded.private_key().is_empty());
        assert!(!seed_matches_public(&loaded));
    }

    #[test]
    fn short_blob_is_out_of_range() {
        assert!(matches!(
            load_keypair(&[1u8; 31], None),
            Err(KeysegError::OutOfRange { .. })
        ));
    }

    #[test]
    fn custom_layouts_locate_fields_by_name() {
        let pair = generate_keypair().unwrap();
        let mut blob = vec![0xee; 4];
        blob.extend_from_slice(&pair.private_key());
        blob.extend_from_slice(&pair.public_key().unwrap());

        let layout: FieldLayout = "magic:4,private:32,public:32".parse().unwrap();
        let loaded = load_keypair(&blob, Some(&layout)).unwrap();
        assert!(seed_matches_public(&loaded));

        let layout: FieldLayout = "magic:4,private:32,public:31".parse().unwrap();
        assert!(matches!(
            load_keypair(&blob, Some(&layout)),
            Err(KeysegError::InvalidKeyLength {
                expected: 32,
                actual: 31
            })
        ));

        let layout: FieldLayout = "magic:4,private:60".parse().unwrap();
        assert!(matches!(
            load_keypair(&blob, Some(&layout)),
            Err(KeysegError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn report_never_includes_private_bytes() {
        let pair = KeyPair::from_parts(&[0x11; 32], &[0x77; 32]).unwrap();
        let report = KeyReport::new(&pair, Encoding::Hex, true).unwrap();
        assert_eq!(report.public_key, "11".repeat(32));
        assert_eq!(report.seed_matches, Some(false));

        let text = report.to_string();
        let json = serde_json::to_string(&report).unwrap();
        assert!(!text.contains("7777"));
        assert!(!json.contains("7777"));
        assert_eq!(report.fingerprint, hex::encode(Sha256::digest([0x11u8; 32])));
    }

    #[test]
    fn report_needs_a_public_key() {
        let mut pair = KeyPair::new();
        pair.set_private_key(b"seed");
        assert!(KeyReport::new(&pair, Encoding::Hex, false).is_err());
    }
}
