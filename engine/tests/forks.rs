//! Fork-relative economics: spends and inclusions only conflict with
//! blocks on the candidate's own ancestry.

mod common;

use forkchain_engine::LedgerView;
use forkchain_primitives::{InputRef, Rejection, Verdict};

use common::*;

#[test]
fn test_sibling_forks_may_spend_the_same_output() {
    let (a, b, c) = (alice(), bob(), charlie());
    let mut chain = TestChain::funded(&[(a, 10)]);
    let coin = chain.genesis_output(0);

    let b1 = chain.child(&chain.genesis, vec![transfer(coin.clone(), &a, &b, 10)]);
    let b2 = chain.child(&chain.genesis, vec![transfer(coin.clone(), &a, &c, 10)]);
    assert_eq!(chain.submit(&b1), Verdict::Accepted);
    assert_eq!(chain.submit(&b2), Verdict::Accepted);

    // Both forks recorded the spend; neither sees the other
    let spenders = chain.ledger.blocks_spending_input(&coin).unwrap();
    assert_eq!(spenders.len(), 2);
    assert_eq!(chain.ledger.tips().len(), 2);

    let again = chain.child(&b1, vec![transfer(coin.clone(), &a, &c, 10)]);
    assert_eq!(chain.submit(&again), Verdict::Rejected(Rejection::DoubleSpentInput));

    let again = chain.child(&b2, vec![transfer(coin, &a, &b, 5)]);
    assert_eq!(chain.submit(&again), Verdict::Rejected(Rejection::DoubleSpentInput));
}

#[test]
fn test_double_spend_detected_deep_in_ancestry() {
    let (a, b) = (alice(), bob());
    let mut chain = TestChain::funded(&[(a, 10)]);
    let coin = chain.genesis_output(0);

    let b1 = chain.child(&chain.genesis, vec![transfer(coin.clone(), &a, &b, 10)]);
    assert_eq!(chain.submit(&b1), Verdict::Accepted);
    let mut tip = b1;
    for _ in 0..5 {
        let next = chain.child(&tip, vec![]);
        assert_eq!(chain.submit(&next), Verdict::Accepted);
        tip = next;
    }

    let replay = chain.child(&tip, vec![transfer(coin, &a, &a, 10)]);
    assert_eq!(chain.submit(&replay), Verdict::Rejected(Rejection::DoubleSpentInput));
}

#[test]
fn test_double_inclusion_is_fork_relative() {
    let (a, b) = (alice(), bob());
    let mut chain = TestChain::funded(&[(a, 10)]);
    let payment = transfer(chain.genesis_output(0), &a, &b, 10);

    let b1 = chain.child(&chain.genesis, vec![payment.clone()]);
    assert_eq!(chain.submit(&b1), Verdict::Accepted);

    let on_top = chain.child(&b1, vec![payment.clone()]);
    assert_eq!(
        chain.verdict(&on_top),
        Verdict::Rejected(Rejection::DoubleTransactionInclusion)
    );

    let sibling = chain.child_at(&chain.genesis, vec![payment.clone()], GENESIS_TIME + 1);
    assert_eq!(chain.submit(&sibling), Verdict::Accepted);
    assert_eq!(chain.ledger.blocks_containing_tx(&payment.hash).unwrap().len(), 2);
}

#[test]
fn test_same_transaction_twice_in_one_block() {
    let (a, b) = (alice(), bob());
    let chain = TestChain::funded(&[(a, 10)]);
    let payment = transfer(chain.genesis_output(0), &a, &b, 10);
    let block = chain.child(&chain.genesis, vec![payment.clone(), payment]);
    assert_eq!(
        chain.verdict(&block),
        Verdict::Rejected(Rejection::DoubleTransactionInclusion)
    );
}

#[test]
fn test_duplicate_reported_before_its_inputs_are_resolved() {
    let (a, b) = (alice(), bob());
    let chain = TestChain::funded(&[(a, 10)]);
    let bogus = transfer(InputRef::new(&[0x77; 32], 0), &a, &b, 1);
    let block = chain.child(&chain.genesis, vec![bogus.clone(), bogus]);
    assert_eq!(
        chain.verdict(&block),
        Verdict::Rejected(Rejection::DoubleTransactionInclusion)
    );
}

#[test]
fn test_input_from_another_fork() {
    let (a, b, c) = (alice(), bob(), charlie());
    let mut chain = TestChain::funded(&[(a, 10)]);
    let to_bob = transfer(chain.genesis_output(0), &a, &b, 10);

    let b1 = chain.child(&chain.genesis, vec![to_bob.clone()]);
    let b2 = chain.child_at(&chain.genesis, vec![], GENESIS_TIME + 1);
    assert_eq!(chain.submit(&b1), Verdict::Accepted);
    assert_eq!(chain.submit(&b2), Verdict::Accepted);

    // to_bob is known to the ledger, but only on the B1 fork
    let from_bob = transfer(output_ref(&to_bob, 0), &b, &c, 10);
    let on_b2 = chain.child(&b2, vec![from_bob.clone()]);
    assert_eq!(
        chain.verdict(&on_b2),
        Verdict::Rejected(Rejection::InputTransactionNotFound)
    );

    let on_b1 = chain.child(&b1, vec![from_bob]);
    assert_eq!(chain.verdict(&on_b1), Verdict::Accepted);
}

#[test]
fn test_validation_does_not_mutate_ledger() {
    let (a, b) = (alice(), bob());
    let chain = TestChain::funded(&[(a, 10)]);
    let payment = transfer(chain.genesis_output(0), &a, &b, 10);
    let block = chain.child(&chain.genesis, vec![payment.clone()]);

    assert_eq!(chain.verdict(&block), Verdict::Accepted);
    assert_eq!(chain.verdict(&block), Verdict::Accepted);
    assert_eq!(chain.ledger.len(), 1);
    assert!(chain.ledger.transaction(&payment.hash).is_none());
}

#[test]
fn test_ancestry_of_fork_tip() {
    let mut chain = TestChain::funded(&[(alice(), 10)]);
    let b1 = chain.child(&chain.genesis, vec![]);
    let b2 = chain.child(&b1, vec![]);
    let side = chain.child_at(&chain.genesis, vec![], GENESIS_TIME + 1);
    for block in [&b1, &b2, &side] {
        assert_eq!(chain.submit(block), Verdict::Accepted);
    }

    assert_eq!(
        chain.ledger.ancestry_of(&b2.hash).unwrap(),
        vec![chain.genesis.hash, b1.hash, b2.hash]
    );
    assert_eq!(
        chain.ledger.ancestry_of(&side.hash).unwrap(),
        vec![chain.genesis.hash, side.hash]
    );
}
