/// Called after the ledger pays `amount` out of its pot to `recipient`.
///
/// Runs while the ledger's reentry lock is still held, so any ledger call made from here
/// fails with `ReentrantCall`.
pub trait OnPayout<AccountId> {
	fn on_payout(recipient: &AccountId, amount: u128);
}

impl<AccountId> OnPayout<AccountId> for () {
	fn on_payout(_recipient: &AccountId, _amount: u128) {}
}
