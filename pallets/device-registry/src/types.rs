use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_std::prelude::*;

/// Sequential device identifier, starting at 1 and never reused.
pub type DeviceId = u64;

/// Zero-based position of a measurement in its device's log.
pub type RecordId = u64;

#[derive(Encode, Decode, Clone, Copy, Eq, PartialEq, Debug, TypeInfo, MaxEncodedLen)]
pub enum DeviceStatus {
	Inactive,
	Active,
	Paused,
	Suspended,
}

// Everything the registry knows about a device
#[derive(Encode, Decode, Clone, Eq, PartialEq, Debug, TypeInfo)]
pub struct DeviceInfo<AccountId> {
	pub id: DeviceId,
	pub owner: AccountId,
	/// Opaque content reference (e.g. an IPFS CID), never interpreted on-chain.
	pub metadata_ref: Vec<u8>,
	pub status: DeviceStatus,
	/// Running total credited by the reward ledger. Only ever increases.
	pub accrued_rewards: u128,
	/// Unix seconds.
	pub registered_at: u64,
	/// Unix seconds; equals `registered_at` until the first report.
	pub last_report_at: u64,
}

#[derive(Encode, Decode, Clone, Eq, PartialEq, Debug, TypeInfo)]
pub struct MeasurementRecord {
	pub device_id: DeviceId,
	pub timestamp: u64,
	pub value: i64,
	/// Free-form category, e.g. `temperature`.
	pub label: Vec<u8>,
	pub verified: bool,
}
