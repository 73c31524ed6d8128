//! Broadcast collaborator contract.

use crate::types::TickSnapshot;

/// Receives the aggregate snapshot once per completed tick.
///
/// Implementations must not block the scheduler: hand the snapshot to a
/// queue or channel and return. Slow listeners are the sink's problem.
pub trait SnapshotSink: Send + Sync {
    fn emit(&self, snapshot: &TickSnapshot);
}
