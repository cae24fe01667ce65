//! Process-wide clock used to timestamp events
//!
//! Defaults to the wall clock. Tests swap in a fixed source with [`freeze`]
//! and get the wall clock back when the returned guard drops:
//!
//! ```
//! use chainlog::core::clock;
//! use chrono::{TimeZone, Utc};
//!
//! let epoch = Utc.timestamp_opt(0, 0).unwrap();
//! {
//!     let _guard = clock::freeze(epoch);
//!     assert_eq!(clock::now(), epoch);
//! }
//! assert_ne!(clock::now(), epoch);
//! ```

use chrono::{DateTime, Utc};
use parking_lot::{const_mutex, const_rwlock, Mutex, MutexGuard, RwLock};
use std::sync::Arc;

/// A source of the current time
pub type ClockFn = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

static CLOCK: RwLock<Option<ClockFn>> = const_rwlock(None);

// Serializes guarded overrides so concurrent tests never observe each other's clock.
static OVERRIDE: Mutex<()> = const_mutex(());

/// Current time according to the process clock
pub fn now() -> DateTime<Utc> {
    match CLOCK.read().as_ref() {
        Some(clock) => clock(),
        None => Utc::now(),
    }
}

/// Replace the process clock until [`reset`] is called
///
/// Waits for any live [`ClockGuard`] to drop first, so a guarded override is
/// never replaced underneath its owner.
pub fn set<F>(clock: F)
where
    F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
{
    let _exclusive = OVERRIDE.lock();
    install(Some(Arc::new(clock)));
}

/// Restore the wall clock
///
/// Waits for any live [`ClockGuard`] to drop first.
pub fn reset() {
    let _exclusive = OVERRIDE.lock();
    install(None);
}

fn install(clock: Option<ClockFn>) {
    *CLOCK.write() = clock;
}

/// Pin the process clock to `instant` for the lifetime of the returned guard
pub fn freeze(instant: DateTime<Utc>) -> ClockGuard {
    override_with(move || instant)
}

/// Replace the process clock for the lifetime of the returned guard
///
/// Blocks while another guard is alive.
pub fn override_with<F>(clock: F) -> ClockGuard
where
    F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
{
    let exclusive = OVERRIDE.lock();
    install(Some(Arc::new(clock)));
    ClockGuard {
        _exclusive: exclusive,
    }
}

/// RAII guard restoring the wall clock when dropped
pub struct ClockGuard {
    _exclusive: MutexGuard<'static, ()>,
}

impl Drop for ClockGuard {
    fn drop(&mut self) {
        // Runs before `_exclusive` is released
        install(None);
    }
}
