#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use sp_std::marker::PhantomData;

/// Weight functions needed for pallet_device_registry.
pub trait WeightInfo {
    fn register() -> Weight;
    fn report_measurement() -> Weight;
    fn set_status() -> Weight;
    fn accrue_rewards() -> Weight;
    fn pause() -> Weight;
    fn unpause() -> Weight;
}

/// Default weights for pallet_device_registry
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    // Paused, DeviceCount, Devices, OwnerDevices
    fn register() -> Weight {
        Weight::from_parts(25_000, 0)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(3))
    }

    // Paused, Devices, MeasurementCount, Measurements
    fn report_measurement() -> Weight {
        Weight::from_parts(20_000, 0)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(3))
    }

    fn set_status() -> Weight {
        Weight::from_parts(15_000, 0)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(1))
    }

    fn accrue_rewards() -> Weight {
        Weight::from_parts(15_000, 0)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(1))
    }

    fn pause() -> Weight {
        Weight::from_parts(10_000, 0)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(1))
    }

    fn unpause() -> Weight {
        Weight::from_parts(10_000, 0)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(1))
    }
}

impl WeightInfo for () {
    fn register() -> Weight {
        Weight::from_parts(25_000, 0)
    }

    fn report_measurement() -> Weight {
        Weight::from_parts(20_000, 0)
    }

    fn set_status() -> Weight {
        Weight::from_parts(15_000, 0)
    }

    fn accrue_rewards() -> Weight {
        Weight::from_parts(15_000, 0)
    }

    fn pause() -> Weight {
        Weight::from_parts(10_000, 0)
    }

    fn unpause() -> Weight {
        Weight::from_parts(10_000, 0)
    }
}
