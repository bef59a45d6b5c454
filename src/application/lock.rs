use std::sync::{Mutex, MutexGuard};

use tracing::warn;

/// Lock a console state region, recovering the guard if a previous holder panicked.
pub(crate) fn mutex_lock<'a, T>(
    lock: &'a Mutex<T>,
    region: &'static str,
    op: &'static str,
) -> MutexGuard<'a, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!(
                op,
                region,
                result = "poisoned_recovered",
                "Recovered from poisoned console state lock"
            );
            poisoned.into_inner()
        }
    }
}
