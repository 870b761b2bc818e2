use crate as pallet_device_registry;
use crate::{AllowedTransitions, DeviceStatus, StatusTransitionPolicy};
use frame_support::{derive_impl, parameter_types, traits::ConstU64};
use sp_runtime::BuildStorage;
use std::cell::RefCell;

type Block = frame_system::mocking::MockBlock<Test>;

pub const ADMIN: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;

/// Genesis wall clock, in milliseconds.
pub const GENESIS_MOMENT: u64 = 1_700_000_000_000;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
	pub enum Test
	{
		System: frame_system,
		Timestamp: pallet_timestamp,
		DeviceRegistry: pallet_device_registry,
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
	type Block = Block;
}

impl pallet_timestamp::Config for Test {
	type Moment = u64;
	type OnTimestampSet = ();
	type MinimumPeriod = ConstU64<5>;
	type WeightInfo = ();
}

thread_local! {
	static STRICT_TRANSITIONS: RefCell<bool> = RefCell::new(false);
}

/// Permissive by default; switches to [`AllowedTransitions`] when made strict.
pub struct MockStatusPolicy;

impl MockStatusPolicy {
	pub fn set_strict(strict: bool) {
		STRICT_TRANSITIONS.with(|s| *s.borrow_mut() = strict);
	}
}

impl StatusTransitionPolicy for MockStatusPolicy {
	fn is_allowed(from: DeviceStatus, to: DeviceStatus) -> bool {
		if STRICT_TRANSITIONS.with(|s| *s.borrow()) {
			AllowedTransitions::is_allowed(from, to)
		} else {
			<() as StatusTransitionPolicy>::is_allowed(from, to)
		}
	}
}

parameter_types! {
	pub const MaxMetadataLength: u32 = 64;
	pub const MaxLabelLength: u32 = 16;
}

impl pallet_device_registry::Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type TimeProvider = Timestamp;
	type StatusPolicy = MockStatusPolicy;
	type MaxMetadataLength = MaxMetadataLength;
	type MaxLabelLength = MaxLabelLength;
	type WeightInfo = ();
}

/// Moves the wall clock forward by whole seconds.
pub fn advance_time(secs: u64) {
	Timestamp::set_timestamp(pallet_timestamp::Now::<Test>::get() + secs * 1_000);
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
	MockStatusPolicy::set_strict(false);

	let mut storage = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
	pallet_device_registry::GenesisConfig::<Test> { admin: Some(ADMIN), paused: false }
		.assimilate_storage(&mut storage)
		.unwrap();

	let mut ext: sp_io::TestExternalities = storage.into();
	ext.execute_with(|| {
		System::set_block_number(1);
		Timestamp::set_timestamp(GENESIS_MOMENT);
	});
	ext
}
