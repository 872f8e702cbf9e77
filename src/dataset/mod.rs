//! Datasets, records, and repair bookkeeping
//!
//! The target dataset owns the mutable record collection, the repair
//! history, and the entropy ledger; the master dataset is a read-side
//! provenance index of revealed column values.

mod constraint;
mod diff;
mod errors;
mod master;
mod record;
mod target;

pub use constraint::Constraint;
pub use diff::DiffRecord;
pub use errors::{DatasetError, DatasetResult};
pub use master::MasterDataset;
pub use record::{Record, RecordId};
pub use target::TargetDataset;
