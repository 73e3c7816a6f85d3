use std::fmt;
use std::str::FromStr;

use crate::codec::{Result, TyppoError};

/// Target platform whose word width sizes pointers and `native` types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Platform {
	/// 32-bit ARM embedded target.
	#[default]
	Arm,
	/// Managed scripting host with 32-bit words.
	Js,
	/// 64-bit x86 host.
	X86_64,
}

impl Platform {
	/// Byte width of a pointer or native word on this platform.
	pub fn native_size(self) -> usize {
		match self {
			Self::Arm | Self::Js => 4,
			Self::X86_64 => 8,
		}
	}

	/// Canonical identifier.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Arm => "ARM",
			Self::Js => "js",
			Self::X86_64 => "x86_64",
		}
	}

	/// Parse a platform identifier.
	pub fn parse(id: &str) -> Result<Self> {
		match id {
			"ARM" | "arm" => Ok(Self::Arm),
			"js" => Ok(Self::Js),
			"x86_64" => Ok(Self::X86_64),
			_ => Err(TyppoError::UnknownPlatform { id: id.to_owned() }),
		}
	}
}

impl FromStr for Platform {
	type Err = TyppoError;

	fn from_str(id: &str) -> Result<Self> {
		Self::parse(id)
	}
}

impl fmt::Display for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
