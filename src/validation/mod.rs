pub mod ip;
pub mod range;

pub use ip::{invalid_addresses, is_valid_ipv4};
pub use range::{parse_int_prefix, NumericRange};
