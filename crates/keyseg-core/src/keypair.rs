use std::fmt;

use zeroize::Zeroizing;

use crate::error::KeysegError;

/// Required size of the public half.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Raw bytes of one asymmetric key pair.
///
/// The public half is always exactly [`PUBLIC_KEY_LEN`] bytes once set. The
/// private half has no length rule here; that belongs to whichever scheme
/// produced it. Nothing checks that the two halves actually belong together.
///
/// Storage is never shared with callers: setters copy the caller's bytes in
/// and getters hand back fresh copies. Private key bytes live in a
/// [`Zeroizing`] buffer and are wiped when replaced or dropped.
///
/// The pair holds mutable key state without any locking; share it between
/// threads only behind the caller's own synchronisation.
#[derive(Clone)]
pub struct KeyPair {
    public_key: Option<[u8; PUBLIC_KEY_LEN]>,
    private_key: Zeroizing<Vec<u8>>,
}

impl KeyPair {
    /// An empty pair with neither half set.
    pub fn new() -> Self {
        Self {
            public_key: None,
            private_key: Zeroizing::new(Vec::new()),
        }
    }

    /// Build a pair from both halves, validating the public one.
    pub fn from_parts(public_key: &[u8], private_key: &[u8]) -> Result<Self, KeysegError> {
        let mut pair = Self::new();
        pair.set_public_key(public_key)?;
        pair.set_private_key(private_key);
        Ok(pair)
    }

    /// Copy of the public key, or `None` if it was never set.
    pub fn public_key(&self) -> Option<[u8; PUBLIC_KEY_LEN]> {
        self.public_key
    }

    /// Replace the public key. Anything other than [`PUBLIC_KEY_LEN`] bytes
    /// is rejected and the current value is kept.
    pub fn set_public_key(&mut self, bytes: &[u8]) -> Result<(), KeysegError> {
        let Ok(key) = <[u8; PUBLIC_KEY_LEN]>::try_from(bytes) else {
            return Err(KeysegError::InvalidKeyLength {
                expected: PUBLIC_KEY_LEN,
                actual: bytes.len(),
            });
        };
        self.public_key = Some(key);
        Ok(())
    }

    pub fn has_public_key(&self) -> bool {
        self.public_key.is_some()
    }

    /// Copy of the private key; empty if it was never set.
    pub fn private_key(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.private_key.to_vec())
    }

    /// Replace the private key with a copy of `bytes`. Any length is accepted.
    pub fn set_private_key(&mut self, bytes: &[u8]) {
        self.private_key = Zeroizing::new(bytes.to_vec());
    }

    pub fn private_key_len(&self) -> usize {
        self.private_key.len()
    }
}

impl Default for KeyPair {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key.map(hex::encode))
            .field("private_key_len", &self.private_key.len())
            .finish()
    }
}
