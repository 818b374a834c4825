use crate::model::params::ParameterSet;
use sha2::{Digest, Sha256};
use std::fmt;

/// Filesystem namespace for one evaluation.
///
/// The first 16 hex digits hash the fully resolved parameter vector; an
/// optional salt appends 16 more so that identical points evaluated
/// concurrently still land in distinct directories. Not a security hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunIdentity(String);

impl RunIdentity {
    pub fn from_params(params: &ParameterSet, salt: Option<u64>) -> Self {
        let mut hasher = Sha256::new();
        for value in params.resolved() {
            hasher.update(value.to_le_bytes());
        }
        let digest = hasher.finalize();

        let mut id = hex::encode(&digest[..8]);
        if let Some(salt) = salt {
            id.push_str(&format!("{:016x}", salt));
        }
        Self(id)
    }

    /// Identity salted with a fresh random value.
    pub fn salted(params: &ParameterSet) -> Self {
        Self::from_params(params, Some(rand::random()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
