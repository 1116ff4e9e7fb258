//! Lock-guarded ledger handle for concurrent validators.
//!
//! Validation runs under the read lock, so any number of candidate blocks
//! (e.g. competing fork tips) can be checked at once. Registering a block
//! updates four coupled indices and runs under the write lock, together
//! with a fresh validation of that block, so no reader ever observes a
//! half-registered block and no block is admitted on a stale view.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use forkchain_primitives::{types::hash_to_hex, Block, Error, Result, Verdict};
use tracing::warn;

use crate::consensus::SealMechanism;
use crate::ledger::Ledger;
use crate::validator::BlockValidator;

/// Cloneable handle to a ledger shared between threads.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Shared access for reads and validation.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Ledger>> {
        self.inner.read().map_err(|_| {
            warn!("ledger read lock poisoned");
            Error::LockPoisoned
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger>> {
        self.inner.write().map_err(|_| {
            warn!("ledger write lock poisoned");
            Error::LockPoisoned
        })
    }

    /// Validate `block` against the current ledger without registering it.
    pub fn validate(
        &self,
        block: &Block,
        validator: &BlockValidator,
        seal: &dyn SealMechanism,
    ) -> Result<Verdict> {
        let ledger = self.read()?;
        Ok(validator.is_valid(block, &*ledger, seal))
    }

    /// Validate `block` and, if accepted, register it, all under one
    /// exclusive lock.
    ///
    /// A rejected block leaves the ledger unchanged and is returned as
    /// `Ok(Verdict::Rejected(_))`. `Err` is reserved for lock poisoning and
    /// for linkage failures, such as a block that is already registered.
    pub fn submit(
        &self,
        block: Block,
        validator: &BlockValidator,
        seal: &dyn SealMechanism,
    ) -> Result<Verdict> {
        let mut ledger = self.write()?;
        let verdict = validator.is_valid(&block, &*ledger, seal);
        if verdict.is_accepted() {
            if ledger.contains(&block.hash) {
                return Err(Error::DuplicateBlock(hash_to_hex(&block.hash)));
            }
            ledger.add_block(block)?;
        }
        Ok(verdict)
    }
}
