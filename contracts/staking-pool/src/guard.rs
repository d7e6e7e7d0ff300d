//! Authorization Guard
//!
//! Every mutating operation is checked here before the transition engine
//! runs: position-scoped operations require the caller to be the position
//! owner, pool-configuration operations require the pool authority, and
//! any position supplied together with a pool must actually belong to it.
//! A failed check short-circuits the operation with no side effects.

use staking_common::{Address, Pool, StakePosition, StakingError, StakingResult};

/// Identity oracle: resolves a submitted credential to the authenticated
/// caller. Signature verification itself lives outside the core; the
/// engine only ever sees the resolved `Address`.
pub trait Authenticator {
    fn authenticate(&self, credential: &[u8]) -> StakingResult<Address>;
}

/// Table-backed authenticator for deterministic tests and local harnesses.
#[derive(Debug, Clone, Default)]
pub struct TableAuthenticator {
    identities: std::collections::BTreeMap<Vec<u8>, Address>,
}

impl TableAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential as resolving to `address`
    pub fn register(&mut self, credential: &[u8], address: Address) {
        self.identities.insert(credential.to_vec(), address);
    }
}

impl Authenticator for TableAuthenticator {
    fn authenticate(&self, credential: &[u8]) -> StakingResult<Address> {
        self.identities
            .get(credential)
            .copied()
            .ok_or(StakingError::InvalidSignature)
    }
}

/// Caller must be the position owner
pub fn require_owner(position: &StakePosition, caller: &Address) -> StakingResult<()> {
    if position.owner != *caller {
        return Err(StakingError::AccountMismatch {
            expected: position.owner,
            actual: *caller,
        });
    }
    Ok(())
}

/// Caller must be the pool authority
pub fn require_authority(pool: &Pool, caller: &Address) -> StakingResult<()> {
    if pool.authority != *caller {
        return Err(StakingError::AccountMismatch {
            expected: pool.authority,
            actual: *caller,
        });
    }
    Ok(())
}

/// The position must reference the supplied pool
pub fn require_binding(pool: &Pool, position: &StakePosition) -> StakingResult<()> {
    if position.pool != pool.id {
        return Err(StakingError::AccountMismatch {
            expected: pool.id,
            actual: position.pool,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use staking_common::derive_pool_id;

    fn test_pool() -> Pool {
        Pool::new([1u8; 32], [7u8; 32], [8u8; 32], 10, 1_000)
    }

    #[test]
    fn test_owner_check() {
        let position = StakePosition::new([2u8; 32], derive_pool_id(&[7u8; 32]), 1_000);

        assert!(require_owner(&position, &[2u8; 32]).is_ok());
        assert!(matches!(
            require_owner(&position, &[9u8; 32]),
            Err(StakingError::AccountMismatch { .. })
        ));
    }

    #[test]
    fn test_authority_check() {
        let pool = test_pool();

        assert!(require_authority(&pool, &[1u8; 32]).is_ok());
        assert!(matches!(
            require_authority(&pool, &[9u8; 32]),
            Err(StakingError::AccountMismatch { .. })
        ));
    }

    #[test]
    fn test_binding_check() {
        let pool = test_pool();
        let bound = StakePosition::new([2u8; 32], pool.id, 1_000);
        let foreign = StakePosition::new([2u8; 32], derive_pool_id(&[9u8; 32]), 1_000);

        assert!(require_binding(&pool, &bound).is_ok());
        assert!(matches!(
            require_binding(&pool, &foreign),
            Err(StakingError::AccountMismatch { .. })
        ));
    }

    #[test]
    fn test_table_authenticator() {
        let mut auth = TableAuthenticator::new();
        auth.register(b"alice-sig", [2u8; 32]);

        assert_eq!(auth.authenticate(b"alice-sig").unwrap(), [2u8; 32]);
        assert_eq!(
            auth.authenticate(b"mallory-sig"),
            Err(StakingError::InvalidSignature)
        );
    }
}
