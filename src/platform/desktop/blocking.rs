use std::time::Instant;

use log::trace;

/// Runs a short synchronous job (a local sqlite query) on the UI thread.
pub fn run_blocking<F, T>(label: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let started = Instant::now();
    let out = f();
    trace!("{label} finished in {:?}", started.elapsed());
    out
}
