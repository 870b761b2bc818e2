use crate as pallet_reward_ledger;
use crate::OnPayout;
use frame_support::{derive_impl, parameter_types, traits::ConstU64, PalletId};
use pallet_device_registry::DeviceId;
use sp_runtime::{BuildStorage, DispatchResult};
use std::cell::RefCell;

pub type Balance = u128;

pub const ADMIN: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;

pub const INITIAL_BALANCE: Balance = 1_000_000;

/// Genesis wall clock, in milliseconds.
pub const GENESIS_MOMENT: u64 = 1_700_000_000_000;

// Configure a mock runtime to test the pallet
frame_support::construct_runtime!(
	pub enum Test
	{
		System: frame_system,
		Balances: pallet_balances,
		Timestamp: pallet_timestamp,
		DeviceRegistry: pallet_device_registry,
		RewardLedger: pallet_reward_ledger,
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
	type Block = frame_system::mocking::MockBlock<Test>;
	type AccountData = pallet_balances::AccountData<Balance>;
}

parameter_types! {
	pub const ExistentialDeposit: Balance = 1;
}

#[derive_impl(pallet_balances::config_preludes::TestDefaultConfig)]
impl pallet_balances::Config for Test {
	type Balance = Balance;
	type AccountStore = System;
	type ExistentialDeposit = ExistentialDeposit;
}

impl pallet_timestamp::Config for Test {
	type Moment = u64;
	type OnTimestampSet = ();
	type MinimumPeriod = ConstU64<5>;
	type WeightInfo = ();
}

parameter_types! {
	pub const MaxMetadataLength: u32 = 64;
	pub const MaxLabelLength: u32 = 16;
}

impl pallet_device_registry::Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type TimeProvider = Timestamp;
	type StatusPolicy = ();
	type MaxMetadataLength = MaxMetadataLength;
	type MaxLabelLength = MaxLabelLength;
	type WeightInfo = ();
}

/// A ledger call the payout hook attempts from inside a payout.
#[derive(Clone, Copy, Debug)]
pub enum Reentry {
	Claim(DeviceId),
	WithdrawStake(u128),
}

thread_local! {
	static REENTRY: RefCell<Option<Reentry>> = RefCell::new(None);
	static REENTRY_RESULTS: RefCell<Vec<DispatchResult>> = RefCell::new(Vec::new());
	static PAYOUTS: RefCell<Vec<(u64, u128)>> = RefCell::new(Vec::new());
}

/// Payee that records every payout and, when armed, calls back into the ledger.
pub struct ReentrantPayee;

impl ReentrantPayee {
	pub fn arm(reentry: Reentry) {
		REENTRY.with(|r| *r.borrow_mut() = Some(reentry));
	}

	pub fn reentry_results() -> Vec<DispatchResult> {
		REENTRY_RESULTS.with(|r| r.borrow().clone())
	}

	pub fn payouts() -> Vec<(u64, u128)> {
		PAYOUTS.with(|p| p.borrow().clone())
	}

	fn reset() {
		REENTRY.with(|r| *r.borrow_mut() = None);
		REENTRY_RESULTS.with(|r| r.borrow_mut().clear());
		PAYOUTS.with(|p| p.borrow_mut().clear());
	}
}

impl OnPayout<u64> for ReentrantPayee {
	fn on_payout(recipient: &u64, amount: u128) {
		PAYOUTS.with(|p| p.borrow_mut().push((*recipient, amount)));

		let Some(reentry) = REENTRY.with(|r| *r.borrow()) else { return };
		let origin = RuntimeOrigin::signed(*recipient);
		let result = match reentry {
			Reentry::Claim(device_id) => RewardLedger::claim(origin, device_id),
			Reentry::WithdrawStake(amount) => RewardLedger::withdraw_stake(origin, amount),
		};
		REENTRY_RESULTS.with(|r| r.borrow_mut().push(result));
	}
}

parameter_types! {
	pub const RewardLedgerPalletId: PalletId = PalletId(*b"py/rwdlg");
	pub const BaseRewardRate: u128 = 100;
	pub const MinStake: u128 = 1_000;
}

impl pallet_reward_ledger::Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type Currency = Balances;
	type Registry = DeviceRegistry;
	type TimeProvider = Timestamp;
	type OnPayout = ReentrantPayee;
	type PalletId = RewardLedgerPalletId;
	type BaseRewardRate = BaseRewardRate;
	type MinStake = MinStake;
	type WeightInfo = ();
}

pub fn new_test_ext() -> sp_io::TestExternalities {
	ReentrantPayee::reset();

	let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

	pallet_balances::GenesisConfig::<Test> {
		balances: vec![(ADMIN, INITIAL_BALANCE), (ALICE, INITIAL_BALANCE), (BOB, INITIAL_BALANCE)],
	}
	.assimilate_storage(&mut t)
	.unwrap();

	pallet_device_registry::GenesisConfig::<Test> { admin: Some(ADMIN), paused: false }
		.assimilate_storage(&mut t)
		.unwrap();

	let mut ext: sp_io::TestExternalities = t.into();
	ext.execute_with(|| {
		System::set_block_number(1);
		Timestamp::set_timestamp(GENESIS_MOMENT);
	});
	ext
}
