//! Benchmarking setup for pallet-device-registry
#![cfg(feature = "runtime-benchmarks")]

use super::*;
use crate::Pallet as DeviceRegistry;
use frame_benchmarking::v2::*;
use frame_support::{assert_ok, traits::Get};
use frame_system::RawOrigin;
use sp_std::vec;

const SEED: u32 = 0;

fn setup_admin<T: Config>() -> T::AccountId {
	let admin: T::AccountId = account("admin", 0, SEED);
	Admin::<T>::put(admin.clone());
	Paused::<T>::put(false);
	admin
}

fn setup_device<T: Config>(owner: &T::AccountId) -> DeviceId {
	let metadata = vec![b'x'; T::MaxMetadataLength::get() as usize];
	assert_ok!(DeviceRegistry::<T>::do_register(owner.clone(), metadata));
	DeviceCount::<T>::get()
}

#[benchmarks]
mod benchmarks {
	use super::*;

	#[benchmark]
	fn register() {
		let caller: T::AccountId = whitelisted_caller();
		let metadata = vec![b'x'; T::MaxMetadataLength::get() as usize];

		#[extrinsic_call]
		register(RawOrigin::Signed(caller.clone()), metadata);

		assert_eq!(DeviceCount::<T>::get(), 1);
		assert_eq!(OwnerDevices::<T>::get(&caller), vec![1]);
	}

	#[benchmark]
	fn report_measurement() {
		let caller: T::AccountId = whitelisted_caller();
		let device_id = setup_device::<T>(&caller);
		let label = vec![b'l'; T::MaxLabelLength::get() as usize];

		#[extrinsic_call]
		report_measurement(RawOrigin::Signed(caller), device_id, -42, label);

		assert_eq!(MeasurementCount::<T>::get(device_id), 1);
	}

	#[benchmark]
	fn set_status() {
		let admin = setup_admin::<T>();
		let owner: T::AccountId = account("owner", 1, SEED);
		let device_id = setup_device::<T>(&owner);

		#[extrinsic_call]
		set_status(RawOrigin::Signed(admin), device_id, DeviceStatus::Suspended);

		assert_eq!(Devices::<T>::get(device_id).map(|d| d.status), Some(DeviceStatus::Suspended));
	}

	#[benchmark]
	fn accrue_rewards() {
		let admin = setup_admin::<T>();
		let owner: T::AccountId = account("owner", 1, SEED);
		let device_id = setup_device::<T>(&owner);

		#[extrinsic_call]
		accrue_rewards(RawOrigin::Signed(admin), device_id, 1_000u128);

		assert_eq!(Devices::<T>::get(device_id).map(|d| d.accrued_rewards), Some(1_000));
	}

	#[benchmark]
	fn pause() {
		let admin = setup_admin::<T>();

		#[extrinsic_call]
		pause(RawOrigin::Signed(admin));

		assert!(Paused::<T>::get());
	}

	#[benchmark]
	fn unpause() {
		let admin = setup_admin::<T>();
		Paused::<T>::put(true);

		#[extrinsic_call]
		unpause(RawOrigin::Signed(admin));

		assert!(!Paused::<T>::get());
	}

	impl_benchmark_test_suite!(DeviceRegistry, crate::mock::new_test_ext(), crate::mock::Test);
}
