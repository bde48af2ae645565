use serde::{Deserialize, Serialize};
use std::fmt;

/// Default request id carried by every target.
pub const DEFAULT_REQUEST_ID: u32 = 1;
/// Default subprogram the ToO time is charged to.
pub const DEFAULT_SUBPROGRAM: &str = "ToO_Neutrino";
/// Default principal investigator of the ToO program.
pub const DEFAULT_PROGRAM_PI: &str = "Kulkarni";
/// Default program id (2 = Caltech/partnership time).
pub const DEFAULT_PROGRAM_ID: u8 = 2;
/// Longest exposure the scheduler accepts, in seconds.
pub const MAX_EXPOSURE_TIME: u32 = 600;

/// Recognized program ids.
pub const PROGRAM_IDS: [u8; 3] = [1, 2, 3];

/// Optical bandpass of one exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Filter {
	R = 1,
	G = 2,
	I = 3,
}

impl Filter {
	pub fn id(self) -> u8 {
		self as u8
	}

	pub fn band(self) -> &'static str {
		match self {
			Filter::R => "r",
			Filter::G => "g",
			Filter::I => "i",
		}
	}
}

impl TryFrom<u8> for Filter {
	type Error = String;

	fn try_from(id: u8) -> Result<Self, Self::Error> {
		match id {
			1 => Ok(Filter::R),
			2 => Ok(Filter::G),
			3 => Ok(Filter::I),
			other => Err(format!("unknown filter id {}, expected 1, 2 or 3", other)),
		}
	}
}

impl From<Filter> for u8 {
	fn from(filter: Filter) -> Self {
		filter.id()
	}
}

impl fmt::Display for Filter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-band", self.band())
	}
}

/// One observation of a fixed sky field.
///
/// The filter id is kept raw so an out-of-range value can reach validation and be reported
/// against the `filter_id` field instead of failing at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooTarget {
	#[serde(default = "default_request_id")]
	pub request_id: u32,
	/// ZTF field (sky tile) id
	pub field_id: u32,
	/// 1 = r, 2 = g, 3 = i
	pub filter_id: u8,
	#[serde(default = "default_subprogram")]
	pub subprogram_name: String,
	#[serde(default = "default_program_pi")]
	pub program_pi: String,
	#[serde(default = "default_program_id")]
	pub program_id: u8,
	/// Seconds
	pub exposure_time: u32,
}

fn default_request_id() -> u32 {
	DEFAULT_REQUEST_ID
}

fn default_subprogram() -> String {
	DEFAULT_SUBPROGRAM.to_string()
}

fn default_program_pi() -> String {
	DEFAULT_PROGRAM_PI.to_string()
}

fn default_program_id() -> u8 {
	DEFAULT_PROGRAM_ID
}

impl TooTarget {
	/// Creates a target with the default request, subprogram and program settings.
	pub fn new(field_id: u32, filter_id: u8, exposure_time: u32) -> Self {
		Self {
			request_id: DEFAULT_REQUEST_ID,
			field_id,
			filter_id,
			subprogram_name: default_subprogram(),
			program_pi: default_program_pi(),
			program_id: DEFAULT_PROGRAM_ID,
			exposure_time,
		}
	}

	/// The filter, if the id is one of the recognized values.
	pub fn filter(&self) -> Option<Filter> {
		Filter::try_from(self.filter_id).ok()
	}
}
