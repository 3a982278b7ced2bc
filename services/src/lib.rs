pub mod access;
pub mod accounts;
pub mod college_leave;
pub mod error;
pub mod holiday_leave;
pub mod input;
pub mod ledger;
pub mod presence;
pub mod reminder;
pub mod scheduler;
pub mod sms;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ErrorKind, ServiceError, ServiceResult};
