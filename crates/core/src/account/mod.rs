//! Chart of accounts types.

pub mod types;

pub use types::{Account, AccountInfo, InvalidAccountCode, NormalSide};
