//! Benchmarking setup for pallet-reward-ledger
#![cfg(feature = "runtime-benchmarks")]

use super::*;
use crate::Pallet as RewardLedger;
use frame_benchmarking::v2::*;
use frame_support::{
	assert_ok,
	traits::{Currency, Get},
};
use frame_system::RawOrigin;
use sp_runtime::SaturatedConversion;

const SEED: u32 = 0;

/// Creates a funded administrator and returns it with a stake amount comfortably above
/// `MinStake` and the per-report rate.
fn setup_admin<T: Config>() -> (T::AccountId, u128) {
	let admin: T::AccountId = account("admin", 0, SEED);
	T::Registry::set_administrator_for_benchmarks(admin.clone());

	let amount = T::MinStake::get()
		.max(T::BaseRewardRate::get().saturating_mul(100))
		.max(1_000_000);
	T::Currency::make_free_balance_be(&admin, amount.saturating_mul(10).saturated_into());
	(admin, amount)
}

fn setup_pool<T: Config>() -> (T::AccountId, u128) {
	let (admin, amount) = setup_admin::<T>();
	assert_ok!(RewardLedger::<T>::stake(RawOrigin::Signed(admin.clone()).into(), amount, amount));
	(admin, amount)
}

fn setup_device<T: Config>(owner: &T::AccountId) -> DeviceId {
	T::Registry::register_for_benchmarks(owner.clone()).expect("registry accepts devices")
}

#[benchmarks]
mod benchmarks {
	use super::*;

	#[benchmark]
	fn stake() {
		let (admin, amount) = setup_admin::<T>();

		#[extrinsic_call]
		stake(RawOrigin::Signed(admin), amount, amount);

		assert_eq!(Pool::<T>::get().total_pool, amount);
	}

	#[benchmark]
	fn distribute() {
		let (admin, _) = setup_pool::<T>();
		let device_id = setup_device::<T>(&admin);

		#[extrinsic_call]
		distribute(RawOrigin::Signed(admin), device_id, 10);

		assert!(ClaimEligibility::<T>::get(device_id));
	}

	#[benchmark]
	fn slash() {
		let (admin, _) = setup_pool::<T>();
		let device_id = setup_device::<T>(&admin);
		assert_ok!(RewardLedger::<T>::do_distribute(&admin, device_id, 10));

		#[extrinsic_call]
		slash(RawOrigin::Signed(admin), device_id, ViolationKind::MaliciousActivity, 50);

		assert_eq!(SlashingHistory::<T>::get(device_id).len(), 1);
	}

	#[benchmark]
	fn claim() {
		let (admin, _) = setup_pool::<T>();
		let owner: T::AccountId = whitelisted_caller();
		let device_id = setup_device::<T>(&owner);
		assert_ok!(RewardLedger::<T>::do_distribute(&admin, device_id, 10));

		#[extrinsic_call]
		claim(RawOrigin::Signed(owner), device_id);

		assert!(!ClaimEligibility::<T>::get(device_id));
	}

	#[benchmark]
	fn withdraw_stake() {
		let (admin, amount) = setup_pool::<T>();

		#[extrinsic_call]
		withdraw_stake(RawOrigin::Signed(admin), amount / 2);

		assert_eq!(Pool::<T>::get().staked_total, amount - amount / 2);
	}

	#[benchmark]
	fn emergency_drain() {
		let (admin, _) = setup_pool::<T>();

		#[extrinsic_call]
		emergency_drain(RawOrigin::Signed(admin));

		assert_eq!(RewardLedger::<T>::pot_balance(), 0);
	}

	#[benchmark]
	fn penalize() {
		let (admin, _) = setup_pool::<T>();
		let device_id = setup_device::<T>(&admin);
		assert_ok!(RewardLedger::<T>::do_distribute(&admin, device_id, 10));

		#[extrinsic_call]
		penalize(RawOrigin::Signed(admin), device_id, ViolationKind::Offline);

		assert_eq!(SlashingHistory::<T>::get(device_id).len(), 1);
	}

	impl_benchmark_test_suite!(RewardLedger, crate::mock::new_test_ext(), crate::mock::Test);
}
