use crate::types::{DeviceId, DeviceStatus};
use sp_runtime::DispatchError;

/// The registry surface other pallets settle rewards against.
pub trait DeviceRegistryInterface<AccountId> {
	/// The single privileged account, if one was configured at genesis.
	fn administrator() -> Option<AccountId>;

	/// Whether the global pause switch is on.
	fn is_paused() -> bool;

	fn device_owner(device_id: DeviceId) -> Option<AccountId>;

	fn accrued_rewards(device_id: DeviceId) -> Option<u128>;

	/// Adds `amount` to the device's accrued counter and returns the new total.
	fn credit_rewards(device_id: DeviceId, amount: u128) -> Result<u128, DispatchError>;

	#[cfg(feature = "runtime-benchmarks")]
	fn register_for_benchmarks(owner: AccountId) -> Result<DeviceId, DispatchError>;

	#[cfg(feature = "runtime-benchmarks")]
	fn set_administrator_for_benchmarks(admin: AccountId);
}

/// Decides whether a device may move from one status to another.
pub trait StatusTransitionPolicy {
	fn is_allowed(from: DeviceStatus, to: DeviceStatus) -> bool;
}

/// Any status may follow any other, including re-setting the current one.
impl StatusTransitionPolicy for () {
	fn is_allowed(_from: DeviceStatus, _to: DeviceStatus) -> bool {
		true
	}
}

/// Explicit transition table.
///
/// Re-asserting the current status is always accepted. A suspended device can only be
/// brought back through `Inactive`.
pub struct AllowedTransitions;

impl StatusTransitionPolicy for AllowedTransitions {
	fn is_allowed(from: DeviceStatus, to: DeviceStatus) -> bool {
		use DeviceStatus::*;

		if from == to {
			return true;
		}

		matches!(
			(from, to),
			(Inactive, Active) |
				(Active, Inactive) |
				(Active, Paused) |
				(Active, Suspended) |
				(Paused, Active) |
				(Paused, Inactive) |
				(Paused, Suspended) |
				(Suspended, Inactive)
		)
	}
}
