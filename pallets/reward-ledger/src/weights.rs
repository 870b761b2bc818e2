#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use sp_std::marker::PhantomData;

/// Weight functions needed for pallet_reward_ledger.
pub trait WeightInfo {
    fn stake() -> Weight;
    fn distribute() -> Weight;
    fn slash() -> Weight;
    fn claim() -> Weight;
    fn withdraw_stake() -> Weight;
    fn emergency_drain() -> Weight;
    fn penalize() -> Weight;
}

/// Default weights for pallet_reward_ledger
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    // Locked, Paused, Admin, Pool, System::Account (x2)
    fn stake() -> Weight {
        Weight::from_parts(45_000, 0)
            .saturating_add(T::DbWeight::get().reads(6))
            .saturating_add(T::DbWeight::get().writes(3))
    }

    // Locked, Paused, Admin, Devices, Pool, ClaimEligibility
    fn distribute() -> Weight {
        Weight::from_parts(35_000, 0)
            .saturating_add(T::DbWeight::get().reads(6))
            .saturating_add(T::DbWeight::get().writes(5))
    }

    // Locked, Paused, Admin, Devices, Pool, SlashingHistory, ClaimEligibility
    fn slash() -> Weight {
        Weight::from_parts(30_000, 0)
            .saturating_add(T::DbWeight::get().reads(6))
            .saturating_add(T::DbWeight::get().writes(3))
    }

    fn claim() -> Weight {
        Weight::from_parts(50_000, 0)
            .saturating_add(T::DbWeight::get().reads(7))
            .saturating_add(T::DbWeight::get().writes(5))
    }

    fn withdraw_stake() -> Weight {
        Weight::from_parts(50_000, 0)
            .saturating_add(T::DbWeight::get().reads(6))
            .saturating_add(T::DbWeight::get().writes(4))
    }

    fn emergency_drain() -> Weight {
        Weight::from_parts(45_000, 0)
            .saturating_add(T::DbWeight::get().reads(5))
            .saturating_add(T::DbWeight::get().writes(3))
    }

    fn penalize() -> Weight {
        Weight::from_parts(30_000, 0)
            .saturating_add(T::DbWeight::get().reads(6))
            .saturating_add(T::DbWeight::get().writes(3))
    }
}

impl WeightInfo for () {
    fn stake() -> Weight {
        Weight::from_parts(45_000, 0)
    }

    fn distribute() -> Weight {
        Weight::from_parts(35_000, 0)
    }

    fn slash() -> Weight {
        Weight::from_parts(30_000, 0)
    }

    fn claim() -> Weight {
        Weight::from_parts(50_000, 0)
    }

    fn withdraw_stake() -> Weight {
        Weight::from_parts(50_000, 0)
    }

    fn emergency_drain() -> Weight {
        Weight::from_parts(45_000, 0)
    }

    fn penalize() -> Weight {
        Weight::from_parts(30_000, 0)
    }
}
