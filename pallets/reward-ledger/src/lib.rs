#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod traits;
pub mod types;
pub mod weights;

pub use pallet::*;
pub use traits::*;
pub use types::*;
pub use weights::WeightInfo;

use frame_support::pallet_prelude::*;
use frame_support::sp_runtime::traits::AccountIdConversion;
use frame_system::pallet_prelude::*;
use pallet_device_registry::{DeviceId, DeviceRegistryInterface};
use sp_std::prelude::*;

pub(crate) const LOG_TARGET: &str = "runtime::reward-ledger";

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use frame_support::traits::{Currency, ExistenceRequirement, UnixTime};
	use frame_support::PalletId;
	use sp_runtime::{Percent, SaturatedConversion};

	pub type BalanceOf<T> =
		<<T as Config>::Currency as Currency<<T as frame_system::Config>::AccountId>>::Balance;

	#[pallet::pallet]
	#[pallet::without_storage_info]
	pub struct Pallet<T>(_);

	#[pallet::config]
	pub trait Config: frame_system::Config {
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// Currency the pot is held in.
		type Currency: Currency<Self::AccountId>;

		/// Device registry. Supplies ownership, the accrued counter, the administrator and the
		/// shared pause switch.
		type Registry: DeviceRegistryInterface<Self::AccountId>;

		type TimeProvider: UnixTime;

		/// Invoked after every payout from the pot while the reentry lock is held.
		type OnPayout: OnPayout<Self::AccountId>;

		/// The pallet's id, used for deriving the pot account.
		#[pallet::constant]
		type PalletId: Get<PalletId>;

		/// Reward paid per reported measurement.
		#[pallet::constant]
		type BaseRewardRate: Get<u128>;

		/// Smallest amount accepted by `stake`.
		#[pallet::constant]
		type MinStake: Get<u128>;

		type WeightInfo: WeightInfo;
	}

	#[pallet::storage]
	#[pallet::getter(fn pool)]
	pub type Pool<T: Config> = StorageValue<_, RewardPool, ValueQuery>;

	/// Set by `distribute`, cleared by `claim` and `slash`.
	#[pallet::storage]
	#[pallet::getter(fn is_claimable)]
	pub type ClaimEligibility<T: Config> =
		StorageMap<_, Blake2_128Concat, DeviceId, bool, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn slashing_history)]
	pub type SlashingHistory<T: Config> =
		StorageMap<_, Blake2_128Concat, DeviceId, Vec<SlashingRecord>, ValueQuery>;

	/// Reentry lock.
	#[pallet::storage]
	pub type Locked<T: Config> = StorageValue<_, bool, ValueQuery>;

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// The administrator added stake to the pool.
		RewardsStaked { amount: u128 },
		/// Rewards were committed to a device. [device_id, amount]
		RewardsDistributed { device_id: DeviceId, amount: u128 },
		/// Part of a device's accrued rewards was returned to the pool.
		DeviceSlashed { device_id: DeviceId, amount: u128, kind: ViolationKind },
		/// A device owner was paid out.
		RewardsClaimed { device_id: DeviceId, owner: T::AccountId, amount: u128 },
		StakeWithdrawn { amount: u128 },
		/// The whole pot balance was sent to `to`, outside of pool accounting.
		EmergencyDrained { to: T::AccountId, amount: u128 },
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The caller is not the administrator.
		Unauthorized,
		DeviceNotFound,
		NotDeviceOwner,
		/// Stake is below `MinStake`.
		BelowMinimumStake,
		/// The attached value does not cover the stated amount.
		InsufficientValue,
		/// Percentages must be within 0..=100.
		InvalidPercentage,
		ZeroAmount,
		/// The pool cannot cover the request without dropping below what it has distributed.
		PoolExhausted,
		InsufficientBalance,
		NothingToClaim,
		NothingToSlash,
		/// The registry's pause switch is on.
		Paused,
		/// A ledger call was made while another one was still in flight.
		ReentrantCall,
		StorageOverflow,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Move `attached` from the administrator into the pot and credit `amount` to the pool.
		#[pallet::call_index(0)]
		#[pallet::weight(<T as Config>::WeightInfo::stake())]
		pub fn stake(origin: OriginFor<T>, amount: u128, attached: u128) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::ensure_unlocked()?;
			Self::ensure_running()?;
			Self::ensure_admin(&who)?;

			ensure!(amount > 0, Error::<T>::ZeroAmount);
			ensure!(amount >= T::MinStake::get(), Error::<T>::BelowMinimumStake);
			ensure!(attached >= amount, Error::<T>::InsufficientValue);

			T::Currency::transfer(
				&who,
				&Self::pot_account(),
				attached.saturated_into(),
				ExistenceRequirement::KeepAlive,
			)?;

			Pool::<T>::try_mutate(|pool| -> DispatchResult {
				pool.staked_total =
					pool.staked_total.checked_add(amount).ok_or(Error::<T>::StorageOverflow)?;
				pool.total_pool =
					pool.total_pool.checked_add(amount).ok_or(Error::<T>::StorageOverflow)?;
				Ok(())
			})?;

			log::info!(target: LOG_TARGET, "staked {} into the reward pool", amount);
			Self::deposit_event(Event::RewardsStaked { amount });
			Ok(())
		}

		/// Commit `BaseRewardRate * report_count` from the pool to a device.
		#[pallet::call_index(1)]
		#[pallet::weight(<T as Config>::WeightInfo::distribute())]
		pub fn distribute(
			origin: OriginFor<T>,
			device_id: DeviceId,
			report_count: u32,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_distribute(&who, device_id, report_count)?;
			Ok(())
		}

		/// Return `percent` of a device's accrued rewards to the pool and revoke its claim.
		#[pallet::call_index(2)]
		#[pallet::weight(<T as Config>::WeightInfo::slash())]
		pub fn slash(
			origin: OriginFor<T>,
			device_id: DeviceId,
			kind: ViolationKind,
			percent: u8,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_slash(&who, device_id, kind, percent)?;
			Ok(())
		}

		/// Pay a device's accrued rewards to its owner.
		#[pallet::call_index(3)]
		#[pallet::weight(<T as Config>::WeightInfo::claim())]
		pub fn claim(origin: OriginFor<T>, device_id: DeviceId) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_claim(&who, device_id)?;
			Ok(())
		}

		#[pallet::call_index(4)]
		#[pallet::weight(<T as Config>::WeightInfo::withdraw_stake())]
		pub fn withdraw_stake(origin: OriginFor<T>, amount: u128) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::with_lock(|| {
				Self::ensure_running()?;
				Self::ensure_admin(&who)?;
				ensure!(amount > 0, Error::<T>::ZeroAmount);

				let mut pool = Pool::<T>::get();
				ensure!(amount <= pool.staked_total, Error::<T>::InsufficientBalance);
				ensure!(amount <= Self::pot_balance(), Error::<T>::InsufficientBalance);
				Self::ensure_covers_distributed(&pool, amount)?;

				pool.staked_total -= amount;
				pool.total_pool -= amount;
				Pool::<T>::put(pool);

				Self::pay_out(&who, amount)?;

				log::info!(target: LOG_TARGET, "withdrew {} of stake", amount);
				Self::deposit_event(Event::StakeWithdrawn { amount });
				Ok(())
			})
		}

		/// Send the entire pot balance to the administrator. Pool accounting is left untouched.
		#[pallet::call_index(5)]
		#[pallet::weight(<T as Config>::WeightInfo::emergency_drain())]
		pub fn emergency_drain(origin: OriginFor<T>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::with_lock(|| {
				Self::ensure_running()?;
				Self::ensure_admin(&who)?;

				let amount = Self::pot_balance();
				T::Currency::transfer(
					&Self::pot_account(),
					&who,
					amount.saturated_into(),
					ExistenceRequirement::AllowDeath,
				)?;
				T::OnPayout::on_payout(&who, amount);

				log::warn!(target: LOG_TARGET, "reward pot drained: {} sent to administrator", amount);
				Self::deposit_event(Event::EmergencyDrained { to: who, amount });
				Ok(())
			})
		}

		/// Slash at the kind's default percentage.
		#[pallet::call_index(6)]
		#[pallet::weight(<T as Config>::WeightInfo::penalize())]
		pub fn penalize(
			origin: OriginFor<T>,
			device_id: DeviceId,
			kind: ViolationKind,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_slash(&who, device_id, kind, kind.default_percent())?;
			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		/// Returns the amount committed to the device.
		pub fn do_distribute(
			who: &T::AccountId,
			device_id: DeviceId,
			report_count: u32,
		) -> Result<u128, DispatchError> {
			Self::with_lock(|| {
				Self::ensure_running()?;
				Self::ensure_admin(who)?;
				ensure!(T::Registry::device_owner(device_id).is_some(), Error::<T>::DeviceNotFound);

				let reward = T::BaseRewardRate::get()
					.checked_mul(report_count as u128)
					.ok_or(Error::<T>::StorageOverflow)?;
				ensure!(reward > 0, Error::<T>::ZeroAmount);

				let mut pool = Pool::<T>::get();
				let distributed =
					pool.distributed_total.checked_add(reward).ok_or(Error::<T>::StorageOverflow)?;
				if pool.total_pool < distributed {
					log::warn!(
						target: LOG_TARGET,
						"pool exhausted: cannot distribute {} to device {}",
						reward,
						device_id
					);
					return Err(Error::<T>::PoolExhausted.into());
				}
				pool.distributed_total = distributed;
				Pool::<T>::put(pool);

				T::Registry::credit_rewards(device_id, reward)?;
				ClaimEligibility::<T>::insert(device_id, true);

				log::info!(target: LOG_TARGET, "distributed {} to device {}", reward, device_id);
				Self::deposit_event(Event::RewardsDistributed { device_id, amount: reward });
				Ok(reward)
			})
		}

		/// Returns the slashed amount. The device's accrued counter is left as is.
		pub fn do_slash(
			who: &T::AccountId,
			device_id: DeviceId,
			kind: ViolationKind,
			percent: u8,
		) -> Result<u128, DispatchError> {
			Self::ensure_unlocked()?;
			Self::ensure_running()?;
			Self::ensure_admin(who)?;
			ensure!(percent <= 100, Error::<T>::InvalidPercentage);

			let accrued =
				T::Registry::accrued_rewards(device_id).ok_or(Error::<T>::DeviceNotFound)?;
			let amount = Percent::from_percent(percent).mul_floor(accrued);
			ensure!(amount > 0, Error::<T>::NothingToSlash);

			Pool::<T>::try_mutate(|pool| -> DispatchResult {
				pool.total_pool =
					pool.total_pool.checked_add(amount).ok_or(Error::<T>::StorageOverflow)?;
				Ok(())
			})?;
			SlashingHistory::<T>::append(
				device_id,
				SlashingRecord {
					device_id,
					violation_kind: kind,
					amount,
					timestamp: T::TimeProvider::now().as_secs(),
					resolved: false,
				},
			);
			ClaimEligibility::<T>::insert(device_id, false);

			log::info!(
				target: LOG_TARGET,
				"device {} slashed {} for {:?}",
				device_id,
				amount,
				kind
			);
			Self::deposit_event(Event::DeviceSlashed { device_id, amount, kind });
			Ok(amount)
		}

		/// Returns the amount paid. The device's accrued counter is left as is.
		pub fn do_claim(who: &T::AccountId, device_id: DeviceId) -> Result<u128, DispatchError> {
			Self::with_lock(|| {
				Self::ensure_running()?;

				let owner =
					T::Registry::device_owner(device_id).ok_or(Error::<T>::DeviceNotFound)?;
				ensure!(ClaimEligibility::<T>::get(device_id), Error::<T>::NothingToClaim);
				ensure!(&owner == who, Error::<T>::NotDeviceOwner);

				let amount = T::Registry::accrued_rewards(device_id).unwrap_or_default();
				ensure!(amount > 0, Error::<T>::NothingToClaim);

				let mut pool = Pool::<T>::get();
				ensure!(pool.total_pool >= amount, Error::<T>::InsufficientBalance);
				Self::ensure_covers_distributed(&pool, amount)?;

				ClaimEligibility::<T>::insert(device_id, false);
				pool.total_pool -= amount;
				Pool::<T>::put(pool);

				Self::pay_out(&owner, amount)?;

				log::info!(target: LOG_TARGET, "device {} claimed {}", device_id, amount);
				Self::deposit_event(Event::RewardsClaimed { device_id, owner, amount });
				Ok(amount)
			})
		}

		pub fn pool_stats() -> PoolStats {
			Pool::<T>::get().into()
		}

		pub fn pot_account() -> T::AccountId {
			T::PalletId::get().into_account_truncating()
		}

		/// Free balance actually held by the pot.
		pub fn pot_balance() -> u128 {
			T::Currency::free_balance(&Self::pot_account()).saturated_into()
		}

		fn pay_out(recipient: &T::AccountId, amount: u128) -> DispatchResult {
			T::Currency::transfer(
				&Self::pot_account(),
				recipient,
				amount.saturated_into(),
				ExistenceRequirement::AllowDeath,
			)?;
			T::OnPayout::on_payout(recipient, amount);
			Ok(())
		}

		/// Runs `f` with the reentry lock held.
		fn with_lock<R>(f: impl FnOnce() -> Result<R, DispatchError>) -> Result<R, DispatchError> {
			Self::ensure_unlocked()?;
			Locked::<T>::put(true);
			let result = f();
			Locked::<T>::kill();
			result
		}

		fn ensure_unlocked() -> DispatchResult {
			ensure!(!Locked::<T>::get(), Error::<T>::ReentrantCall);
			Ok(())
		}

		fn ensure_running() -> DispatchResult {
			ensure!(!T::Registry::is_paused(), Error::<T>::Paused);
			Ok(())
		}

		fn ensure_admin(who: &T::AccountId) -> DispatchResult {
			ensure!(T::Registry::administrator().as_ref() == Some(who), Error::<T>::Unauthorized);
			Ok(())
		}

		/// Removing `amount` from the pool must not take it below what has been distributed.
		fn ensure_covers_distributed(pool: &RewardPool, amount: u128) -> DispatchResult {
			let remaining = pool.total_pool.checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;
			if remaining < pool.distributed_total {
				log::warn!(
					target: LOG_TARGET,
					"refusing to pay {}: pool would fall below distributed total {}",
					amount,
					pool.distributed_total
				);
				return Err(Error::<T>::PoolExhausted.into());
			}
			Ok(())
		}
	}
}
