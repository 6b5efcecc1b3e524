//! Robot storage, selection metadata, and snapshot persistence.
//!
//! A [`Population`] owns the live set of robots for one generation and hands
//! out sequential [`RobotName`]s on save. [`RobotInfo`] is the lightweight
//! per-robot view the breeding and culling passes consume; it never aliases
//! the stored robot. Snapshots round-trip the whole container through a
//! compressed binary file.

mod info;
mod invariants;
mod persistence;
mod robot;
mod store;

pub use info::RobotInfo;
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use persistence::{
    load_snapshot, read_meta, save_snapshot, snapshot_path, write_meta, SnapshotMeta,
};
pub use robot::{Robot, RobotName};
pub use store::Population;
