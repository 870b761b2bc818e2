use codec::{Decode, Encode, MaxEncodedLen};
use pallet_device_registry::DeviceId;
use scale_info::TypeInfo;

/// Why a device was slashed.
#[derive(Encode, Decode, Clone, Copy, Eq, PartialEq, Debug, TypeInfo, MaxEncodedLen)]
pub enum ViolationKind {
	Offline,
	DataInconsistency,
	MaliciousActivity,
}

impl ViolationKind {
	/// Percentage of accrued rewards taken by `penalize`.
	pub fn default_percent(&self) -> u8 {
		match self {
			ViolationKind::Offline => 5,
			ViolationKind::DataInconsistency => 10,
			ViolationKind::MaliciousActivity => 50,
		}
	}
}

#[derive(Encode, Decode, Clone, Eq, PartialEq, Debug, TypeInfo, MaxEncodedLen)]
pub struct SlashingRecord {
	pub device_id: DeviceId,
	pub violation_kind: ViolationKind,
	pub amount: u128,
	pub timestamp: u64,
	/// Always false; there is no on-chain resolution workflow.
	pub resolved: bool,
}

/// Pool accounting.
#[derive(Encode, Decode, Clone, Default, Eq, PartialEq, Debug, TypeInfo, MaxEncodedLen)]
pub struct RewardPool {
	pub total_pool: u128,
	pub staked_total: u128,
	pub distributed_total: u128,
}

impl RewardPool {
	pub fn available(&self) -> u128 {
		self.total_pool.saturating_sub(self.distributed_total)
	}
}

#[derive(Encode, Decode, Clone, Default, Eq, PartialEq, Debug, TypeInfo)]
pub struct PoolStats {
	pub total_pool: u128,
	pub staked_total: u128,
	pub distributed_total: u128,
	pub available: u128,
}

impl From<RewardPool> for PoolStats {
	fn from(pool: RewardPool) -> Self {
		PoolStats {
			available: pool.available(),
			total_pool: pool.total_pool,
			staked_total: pool.staked_total,
			distributed_total: pool.distributed_total,
		}
	}
}
