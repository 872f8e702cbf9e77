//! mend - an incremental, entropy-guided data repair engine
//!
//! Applies proposed column-value corrections to a target dataset while
//! incrementally maintaining Shannon entropy statistics for each
//! functional-dependency constraint, with full rollback of applied repairs.

pub mod config;
pub mod dataset;
pub mod observability;
pub mod repair;
pub mod stats;
