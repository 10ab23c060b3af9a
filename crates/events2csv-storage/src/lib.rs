//! OpenDAL-backed object store for events2csv
//!
//! One [`OpendalStore`] wraps one bucket. The job builds two of them, one for
//! the input bucket and one for the output bucket, from the same
//! [`StorageConfig`].

mod operator;
mod store;

pub use operator::build_operator;
pub use store::OpendalStore;
