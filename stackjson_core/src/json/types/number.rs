//! `From` conversions from Rust numeric types into `JsonValue::Number`.
//!
//! Every JSON number is an `f64`. Integers wider than 53 bits are rounded on the way in.

use super::JsonValue;

impl From<f64> for JsonValue {
	fn from(input: f64) -> Self {
		JsonValue::Number(input)
	}
}

macro_rules! impl_from_number {
	(lossless: $($t:ty),+) => {
		$(
			impl From<$t> for JsonValue {
				fn from(input: $t) -> Self {
					JsonValue::Number(f64::from(input))
				}
			}
		)+
	};
	(lossy: $($t:ty),+) => {
		$(
			impl From<$t> for JsonValue {
				fn from(input: $t) -> Self {
					JsonValue::Number(input as f64)
				}
			}
		)+
	};
}

impl_from_number!(lossless: f32, u8, u16, u32, i8, i16, i32);
impl_from_number!(lossy: u64, u128, usize, i64, i128, isize);
