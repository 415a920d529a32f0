// Concurrent collection of random books.
//
// One worker thread per requested book, all launched at once and all
// joined before returning. Finished records are appended in completion
// order; failed or missed fetches simply contribute nothing.

use std::sync::{Mutex, PoisonError};
use std::thread;

use tracing::{debug, info, warn};

use crate::api::Catalog;
use crate::catalog::Record;
use crate::error::{LibraryError, Result};

/// Largest batch a single session may request. Every book gets its own
/// thread, so the count is also the number of threads started at once.
pub const MAX_BOOKS: usize = 1000;

// Upper bound on the result buffer reserved up front.
const MAX_PREALLOCATED: usize = 64;

/// Fetch up to `count` random books from `catalog`.
///
/// The result may be shorter than `count` when fetches fail.
///
/// # Errors
///
/// Returns [`LibraryError::InvalidArgument`] when `count` is zero or above
/// [`MAX_BOOKS`].
pub fn collect<C: Catalog + ?Sized>(catalog: &C, count: usize) -> Result<Vec<Record>> {
    collect_with_progress(catalog, count, || {})
}

/// Same as [`collect`], calling `on_finished` once per worker as it ends,
/// whether or not it produced a record.
pub fn collect_with_progress<C, F>(catalog: &C, count: usize, on_finished: F) -> Result<Vec<Record>>
where
    C: Catalog + ?Sized,
    F: Fn() + Sync,
{
    if count == 0 {
        return Err(LibraryError::InvalidArgument(
            "expected 1 or more books, got 0".to_string(),
        ));
    }
    if count > MAX_BOOKS {
        return Err(LibraryError::InvalidArgument(format!(
            "expected at most {MAX_BOOKS} books, got {count}"
        )));
    }

    let records = Mutex::new(Vec::with_capacity(count.min(MAX_PREALLOCATED)));

    thread::scope(|scope| {
        for worker in 0..count {
            let records = &records;
            let on_finished = &on_finished;
            let spawned = thread::Builder::new()
                .name(format!("collect-{worker}"))
                .spawn_scoped(scope, move || {
                    match catalog.fetch_random_record() {
                        Ok(Some(record)) => records
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(record),
                        Ok(None) => debug!(worker, "Random pick was not a book edition; skipping"),
                        Err(error) => warn!(worker, %error, "Failed to fetch random book; skipping"),
                    }
                    on_finished();
                });
            if let Err(error) = spawned {
                // The OS is out of threads; the rest would fail the same way.
                let skipped = count - worker;
                warn!(worker, skipped, %error, "Could not start fetch worker; skipping the rest");
                (0..skipped).for_each(|_| on_finished());
                break;
            }
        }
    });

    let records = records.into_inner().unwrap_or_else(PoisonError::into_inner);
    info!(requested = count, collected = records.len(), "Collection finished");
    Ok(records)
}
