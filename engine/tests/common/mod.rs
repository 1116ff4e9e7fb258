//! Shared test helpers for integration tests.
//!
//! Provides deterministic parties, transaction builders, and a small
//! chain harness that validates blocks before registering them.

#![allow(dead_code)]

use forkchain_engine::{BlockValidator, EngineConfig, Ledger, ProofOfWork};
use forkchain_primitives::{
    Address, Block, BlockTemplate, InputRef, Target, Timestamp, Transaction, TxOutput, Verdict,
};

/// Proof-of-work target every hash except `ff..ff` satisfies.
pub const EASY_TARGET: Target = [0xff; 32];

pub const GENESIS_TIME: Timestamp = 1_700_000_000;

/// Seconds between a parent and the children built by [`TestChain::child`].
pub const BLOCK_INTERVAL: Timestamp = 60;

// ── Deterministic Parties ──

/// Create a deterministic Ed25519 signing key from a single seed byte.
pub fn deterministic_keypair(seed: u8) -> (ed25519_dalek::VerifyingKey, ed25519_dalek::SigningKey) {
    let signing_key = ed25519_dalek::SigningKey::from_bytes(&[seed; 32]);
    let verifying_key = signing_key.verifying_key();
    (verifying_key, signing_key)
}

/// Alice: seed=1.
pub fn alice() -> Address {
    *deterministic_keypair(1).0.as_bytes()
}

/// Bob: seed=2.
pub fn bob() -> Address {
    *deterministic_keypair(2).0.as_bytes()
}

/// Charlie: seed=3.
pub fn charlie() -> Address {
    *deterministic_keypair(3).0.as_bytes()
}

// ── Transactions ──

/// Input-less transaction paying `amount` to `to`, as found in genesis.
pub fn coinbase(to: &Address, amount: u64) -> Transaction {
    Transaction::new(vec![], vec![TxOutput::new(*to, *to, amount)])
}

/// Spend `input` (owned by `from`) into a single output to `to`.
pub fn transfer(input: InputRef, from: &Address, to: &Address, amount: u64) -> Transaction {
    Transaction::new(vec![input], vec![TxOutput::new(*from, *to, amount)])
}

/// Reference output `index` of `tx`.
pub fn output_ref(tx: &Transaction, index: usize) -> InputRef {
    InputRef::new(&tx.hash, index)
}

// ── Chain Harness ──

/// Ledger plus the proof-of-work and validator used to extend it.
pub struct TestChain {
    pub ledger: Ledger,
    pub pow: ProofOfWork,
    pub validator: BlockValidator,
    pub genesis: Block,
}

impl TestChain {
    /// Chain whose genesis pays each `(party, amount)` through its own
    /// coinbase transaction, in order.
    pub fn funded(accounts: &[(Address, u64)]) -> Self {
        let pow = ProofOfWork::new(EASY_TARGET);
        let txs = accounts
            .iter()
            .map(|(party, amount)| coinbase(party, *amount))
            .collect();
        let genesis = seal(&pow, BlockTemplate::genesis(txs, GENESIS_TIME));

        let mut chain = Self {
            ledger: Ledger::new(),
            pow,
            validator: BlockValidator::default(),
            genesis: genesis.clone(),
        };
        assert_eq!(chain.submit(&genesis), Verdict::Accepted);
        chain
    }

    /// Output 0 of genesis coinbase number `index`.
    pub fn genesis_output(&self, index: usize) -> InputRef {
        output_ref(&self.genesis.transactions[index], 0)
    }

    /// Sealed child of `parent`, one interval later.
    pub fn child(&self, parent: &Block, txs: Vec<Transaction>) -> Block {
        self.child_at(parent, txs, parent.timestamp + BLOCK_INTERVAL)
    }

    pub fn child_at(&self, parent: &Block, txs: Vec<Transaction>, timestamp: Timestamp) -> Block {
        let template = BlockTemplate::child(parent.height + 1, txs, parent.hash, timestamp);
        seal(&self.pow, template)
    }

    pub fn verdict(&self, block: &Block) -> Verdict {
        self.validator.is_valid(block, &self.ledger, &self.pow)
    }

    /// Validate `block` and register it if accepted.
    pub fn submit(&mut self, block: &Block) -> Verdict {
        let verdict = self.verdict(block);
        if verdict.is_accepted() {
            self.ledger.add_block(block.clone()).unwrap();
        }
        verdict
    }
}

/// Build `template` under `pow` and mine a nonce for it.
pub fn seal(pow: &ProofOfWork, template: BlockTemplate) -> Block {
    use forkchain_engine::SealMechanism;

    let mut block = pow.build_block(template);
    pow.mine_with_config(&mut block, &EngineConfig::default())
        .expect("nonce within attempt budget");
    block
}
