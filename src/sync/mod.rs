/// Price synchronization engine
///
/// Scheduler -> synchronization run -> per-symbol reconciler -> quote client
/// and price store. Upstream failures are absorbed per symbol and per tick;
/// they never corrupt stored records or terminate the continuous loop.
pub mod engine;
pub mod reconciler;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testkit;

pub use engine::{SyncEngine, SyncReport};
pub use reconciler::{ReconcileOutcome, Reconciler, SkipReason};
pub use scheduler::PriceSyncScheduler;
