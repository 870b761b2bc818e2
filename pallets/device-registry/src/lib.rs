#![cfg_attr(not(feature = "std"), no_std)]

// `pallet-device-registry`
//
// Tracks DePIN devices: who owns them, what state they are in, the measurements they
// report and the rewards the ledger has credited to them. Also holds the administrator
// account and the pause switch shared with `pallet-reward-ledger`.

pub use pallet::*;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod traits;
pub mod types;
pub mod weights;

pub use traits::*;
pub use types::*;
pub use weights::WeightInfo;

pub(crate) const LOG_TARGET: &str = "runtime::device-registry";

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use frame_support::{pallet_prelude::*, traits::UnixTime};
	use frame_system::pallet_prelude::*;
	use sp_std::vec::Vec;

	#[pallet::pallet]
	#[pallet::without_storage_info]
	pub struct Pallet<T>(_);

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// The overarching event type.
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// Clock used to stamp registrations and measurements.
		type TimeProvider: UnixTime;

		/// Which status changes `set_status` accepts.
		type StatusPolicy: StatusTransitionPolicy;

		/// Longest accepted metadata reference, in bytes.
		#[pallet::constant]
		type MaxMetadataLength: Get<u32>;

		/// Longest accepted measurement label, in bytes.
		#[pallet::constant]
		type MaxLabelLength: Get<u32>;

		type WeightInfo: WeightInfo;
	}

	#[pallet::storage]
	#[pallet::getter(fn admin)]
	pub type Admin<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

	/// Global pause switch. Also honoured by the reward ledger.
	#[pallet::storage]
	#[pallet::getter(fn is_paused)]
	pub type Paused<T: Config> = StorageValue<_, bool, ValueQuery>;

	/// Number of devices ever registered, which is also the id of the newest one.
	#[pallet::storage]
	#[pallet::getter(fn total_devices)]
	pub type DeviceCount<T: Config> = StorageValue<_, DeviceId, ValueQuery>;

	#[pallet::storage]
	pub type Devices<T: Config> =
		StorageMap<_, Blake2_128Concat, DeviceId, DeviceInfo<T::AccountId>, OptionQuery>;

	/// Device ids per owner, in registration order.
	#[pallet::storage]
	#[pallet::getter(fn owner_devices)]
	pub type OwnerDevices<T: Config> =
		StorageMap<_, Blake2_128Concat, T::AccountId, Vec<DeviceId>, ValueQuery>;

	/// Append-only measurement log, keyed by device and record id.
	#[pallet::storage]
	pub type Measurements<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		DeviceId,
		Twox64Concat,
		RecordId,
		MeasurementRecord,
		OptionQuery,
	>;

	#[pallet::storage]
	#[pallet::getter(fn measurement_count)]
	pub type MeasurementCount<T: Config> =
		StorageMap<_, Blake2_128Concat, DeviceId, u64, ValueQuery>;

	#[pallet::genesis_config]
	#[derive(frame_support::DefaultNoBound)]
	pub struct GenesisConfig<T: Config> {
		pub admin: Option<T::AccountId>,
		pub paused: bool,
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			if let Some(admin) = &self.admin {
				Admin::<T>::put(admin);
			}
			Paused::<T>::put(self.paused);
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// A new device was registered. [device_id, owner, metadata_ref]
		DeviceRegistered { device_id: DeviceId, owner: T::AccountId, metadata_ref: Vec<u8> },
		/// A device appended a measurement to its log.
		MeasurementReported { device_id: DeviceId, record_id: RecordId, value: i64, label: Vec<u8> },
		/// The administrator changed a device's status.
		DeviceStatusUpdated { device_id: DeviceId, status: DeviceStatus },
		/// Rewards were credited to a device. `total` is the new accrued amount.
		RewardsAccrued { device_id: DeviceId, amount: u128, total: u128 },
		RegistryPaused { by: T::AccountId },
		RegistryUnpaused { by: T::AccountId },
	}

	#[pallet::error]
	pub enum Error<T> {
		/// No device with this id has been registered.
		DeviceNotFound,
		/// The caller does not own the device.
		NotDeviceOwner,
		/// Only active devices may report measurements.
		DeviceInactive,
		MetadataTooLong,
		LabelTooLong,
		/// The configured status policy rejects this change.
		TransitionNotAllowed,
		/// Mutations are suspended until the administrator unpauses.
		RegistryPaused,
		/// Unpause was requested while not paused.
		NotPaused,
		/// The caller is not the administrator.
		Unauthorized,
		/// A counter would overflow.
		StorageOverflow,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Register a new device owned by the caller. It starts `Active` with nothing accrued.
		#[pallet::call_index(0)]
		#[pallet::weight(<T as Config>::WeightInfo::register())]
		pub fn register(origin: OriginFor<T>, metadata_ref: Vec<u8>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_register(who, metadata_ref)?;
			Ok(())
		}

		/// Append a measurement to one of the caller's active devices.
		#[pallet::call_index(1)]
		#[pallet::weight(<T as Config>::WeightInfo::report_measurement())]
		pub fn report_measurement(
			origin: OriginFor<T>,
			device_id: DeviceId,
			value: i64,
			label: Vec<u8>,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_report_measurement(&who, device_id, value, label)?;
			Ok(())
		}

		#[pallet::call_index(2)]
		#[pallet::weight(<T as Config>::WeightInfo::set_status())]
		pub fn set_status(
			origin: OriginFor<T>,
			device_id: DeviceId,
			status: DeviceStatus,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::ensure_not_paused()?;
			Self::ensure_admin(&who)?;
			Self::do_set_status(device_id, status)
		}

		/// Credit rewards to a device directly. Normally the reward ledger does this
		/// through [`DeviceRegistryInterface::credit_rewards`].
		#[pallet::call_index(3)]
		#[pallet::weight(<T as Config>::WeightInfo::accrue_rewards())]
		pub fn accrue_rewards(
			origin: OriginFor<T>,
			device_id: DeviceId,
			amount: u128,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::ensure_not_paused()?;
			Self::ensure_admin(&who)?;
			Self::do_accrue_rewards(device_id, amount)?;
			Ok(())
		}

		#[pallet::call_index(4)]
		#[pallet::weight(<T as Config>::WeightInfo::pause())]
		pub fn pause(origin: OriginFor<T>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::ensure_admin(&who)?;
			Self::ensure_not_paused()?;

			Paused::<T>::put(true);
			log::warn!(target: LOG_TARGET, "registry paused by administrator");
			Self::deposit_event(Event::RegistryPaused { by: who });
			Ok(())
		}

		#[pallet::call_index(5)]
		#[pallet::weight(<T as Config>::WeightInfo::unpause())]
		pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::ensure_admin(&who)?;
			ensure!(Paused::<T>::get(), Error::<T>::NotPaused);

			Paused::<T>::put(false);
			log::info!(target: LOG_TARGET, "registry unpaused");
			Self::deposit_event(Event::RegistryUnpaused { by: who });
			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		pub fn do_register(
			owner: T::AccountId,
			metadata_ref: Vec<u8>,
		) -> Result<DeviceId, DispatchError> {
			Self::ensure_not_paused()?;
			ensure!(
				metadata_ref.len() <= T::MaxMetadataLength::get() as usize,
				Error::<T>::MetadataTooLong
			);

			let device_id =
				DeviceCount::<T>::get().checked_add(1).ok_or(Error::<T>::StorageOverflow)?;
			let now = Self::now();

			Devices::<T>::insert(
				device_id,
				DeviceInfo {
					id: device_id,
					owner: owner.clone(),
					metadata_ref: metadata_ref.clone(),
					status: DeviceStatus::Active,
					accrued_rewards: 0,
					registered_at: now,
					last_report_at: now,
				},
			);
			DeviceCount::<T>::put(device_id);
			OwnerDevices::<T>::append(&owner, device_id);

			log::info!(target: LOG_TARGET, "device {} registered", device_id);
			Self::deposit_event(Event::DeviceRegistered { device_id, owner, metadata_ref });
			Ok(device_id)
		}

		/// Returns the id of the new record.
		pub fn do_report_measurement(
			who: &T::AccountId,
			device_id: DeviceId,
			value: i64,
			label: Vec<u8>,
		) -> Result<RecordId, DispatchError> {
			Self::ensure_not_paused()?;

			let mut device = Devices::<T>::get(device_id).ok_or(Error::<T>::DeviceNotFound)?;
			ensure!(&device.owner == who, Error::<T>::NotDeviceOwner);
			ensure!(device.status == DeviceStatus::Active, Error::<T>::DeviceInactive);
			ensure!(label.len() <= T::MaxLabelLength::get() as usize, Error::<T>::LabelTooLong);

			let record_id = MeasurementCount::<T>::get(device_id);
			let next = record_id.checked_add(1).ok_or(Error::<T>::StorageOverflow)?;
			let now = Self::now();

			Measurements::<T>::insert(
				device_id,
				record_id,
				MeasurementRecord {
					device_id,
					timestamp: now,
					value,
					label: label.clone(),
					verified: false,
				},
			);
			MeasurementCount::<T>::insert(device_id, next);

			device.last_report_at = now;
			Devices::<T>::insert(device_id, device);

			log::debug!(
				target: LOG_TARGET,
				"device {} reported measurement {} (value {})",
				device_id,
				record_id,
				value
			);
			Self::deposit_event(Event::MeasurementReported { device_id, record_id, value, label });
			Ok(record_id)
		}

		pub fn do_set_status(device_id: DeviceId, status: DeviceStatus) -> DispatchResult {
			Devices::<T>::try_mutate(device_id, |maybe_device| -> DispatchResult {
				let device = maybe_device.as_mut().ok_or(Error::<T>::DeviceNotFound)?;
				ensure!(
					T::StatusPolicy::is_allowed(device.status, status),
					Error::<T>::TransitionNotAllowed
				);
				device.status = status;
				Ok(())
			})?;

			log::info!(target: LOG_TARGET, "device {} status set to {:?}", device_id, status);
			Self::deposit_event(Event::DeviceStatusUpdated { device_id, status });
			Ok(())
		}

		/// Adds `amount` to the device's accrued counter and returns the new total.
		pub fn do_accrue_rewards(device_id: DeviceId, amount: u128) -> Result<u128, DispatchError> {
			let total = Devices::<T>::try_mutate(
				device_id,
				|maybe_device| -> Result<u128, DispatchError> {
					let device = maybe_device.as_mut().ok_or(Error::<T>::DeviceNotFound)?;
					device.accrued_rewards = device
						.accrued_rewards
						.checked_add(amount)
						.ok_or(Error::<T>::StorageOverflow)?;
					Ok(device.accrued_rewards)
				},
			)?;

			Self::deposit_event(Event::RewardsAccrued { device_id, amount, total });
			Ok(total)
		}

		pub fn device(device_id: DeviceId) -> Result<DeviceInfo<T::AccountId>, DispatchError> {
			Devices::<T>::get(device_id).ok_or(Error::<T>::DeviceNotFound.into())
		}

		/// Full measurement log of a device, oldest first.
		pub fn measurements(device_id: DeviceId) -> Result<Vec<MeasurementRecord>, DispatchError> {
			ensure!(Devices::<T>::contains_key(device_id), Error::<T>::DeviceNotFound);
			Ok(Self::collect_measurements(device_id, 0, MeasurementCount::<T>::get(device_id)))
		}

		/// The `limit` most recent measurements of a device, oldest first.
		pub fn latest_measurements(
			device_id: DeviceId,
			limit: u64,
		) -> Result<Vec<MeasurementRecord>, DispatchError> {
			ensure!(Devices::<T>::contains_key(device_id), Error::<T>::DeviceNotFound);
			let count = MeasurementCount::<T>::get(device_id);
			Ok(Self::collect_measurements(device_id, count.saturating_sub(limit), count))
		}

		/// Every registered id. Ids are dense, so this is just `1..=total_devices`.
		pub fn all_devices() -> Vec<DeviceId> {
			(1..=DeviceCount::<T>::get()).collect()
		}

		pub fn ensure_admin(who: &T::AccountId) -> DispatchResult {
			ensure!(Admin::<T>::get().as_ref() == Some(who), Error::<T>::Unauthorized);
			Ok(())
		}

		pub fn ensure_not_paused() -> DispatchResult {
			ensure!(!Paused::<T>::get(), Error::<T>::RegistryPaused);
			Ok(())
		}

		fn collect_measurements(
			device_id: DeviceId,
			from: RecordId,
			to: RecordId,
		) -> Vec<MeasurementRecord> {
			(from..to)
				.filter_map(|record_id| Measurements::<T>::get(device_id, record_id))
				.collect()
		}

		fn now() -> u64 {
			T::TimeProvider::now().as_secs()
		}
	}
}

impl<T: Config> DeviceRegistryInterface<T::AccountId> for Pallet<T> {
	fn administrator() -> Option<T::AccountId> {
		Admin::<T>::get()
	}

	fn is_paused() -> bool {
		Paused::<T>::get()
	}

	fn device_owner(device_id: DeviceId) -> Option<T::AccountId> {
		Devices::<T>::get(device_id).map(|device| device.owner)
	}

	fn accrued_rewards(device_id: DeviceId) -> Option<u128> {
		Devices::<T>::get(device_id).map(|device| device.accrued_rewards)
	}

	fn credit_rewards(device_id: DeviceId, amount: u128) -> Result<u128, sp_runtime::DispatchError> {
		Self::do_accrue_rewards(device_id, amount)
	}

	#[cfg(feature = "runtime-benchmarks")]
	fn register_for_benchmarks(owner: T::AccountId) -> Result<DeviceId, sp_runtime::DispatchError> {
		Self::do_register(owner, sp_std::vec::Vec::new())
	}

	#[cfg(feature = "runtime-benchmarks")]
	fn set_administrator_for_benchmarks(admin: T::AccountId) {
		Admin::<T>::put(admin);
	}
}
