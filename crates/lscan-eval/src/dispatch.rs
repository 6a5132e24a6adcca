use lscan_core::errors::{ErrorInfo, LscanError};
use lscan_core::RngHandle;
use rayon::prelude::*;

fn dispatch_error(code: &str, err: impl ToString) -> LscanError {
    LscanError::Dispatch(ErrorInfo::new(code, err.to_string()))
}

/// Work-stealing executor for independent, index-addressed units of work.
///
/// Units are scheduled on a dedicated rayon pool and written into a result
/// vector sized up front, so output order always follows unit index no matter
/// which worker finished first.
#[derive(Debug)]
pub struct Dispatcher {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl Dispatcher {
    /// Builds a pool with `threads` workers; zero means one per logical core.
    pub fn new(threads: usize) -> Result<Self, LscanError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("lscan-worker-{index}"))
            .build()
            .map_err(|err| dispatch_error("thread_pool", err))?;
        let threads = pool.current_num_threads();
        log::debug!("dispatcher ready with {threads} worker(s)");
        Ok(Self { pool, threads })
    }

    /// Number of workers in the pool.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Runs `unit(0..len)` in parallel and returns results in index order.
    ///
    /// The first failing unit fails the whole call; partial results are
    /// discarded.
    pub fn run_indexed<T, F>(&self, len: usize, unit: F) -> Result<Vec<T>, LscanError>
    where
        T: Send,
        F: Fn(usize) -> Result<T, LscanError> + Sync,
    {
        log::debug!("dispatching {len} unit(s) on {} worker(s)", self.threads);
        let mut slots: Vec<Option<T>> = (0..len).map(|_| None).collect();
        self.pool.install(|| {
            slots
                .par_iter_mut()
                .with_max_len(1)
                .enumerate()
                .try_for_each(|(index, slot)| {
                    *slot = Some(unit(index)?);
                    Ok::<(), LscanError>(())
                })
        })?;
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    LscanError::Dispatch(
                        ErrorInfo::new("slot_unfilled", "work unit produced no result")
                            .with_context("index", index),
                    )
                })
            })
            .collect()
    }

    /// Like [`Dispatcher::run_indexed`] but hands each unit its own RNG.
    ///
    /// Unit `i` receives the substream `i` of `master_seed`, so the draws do
    /// not depend on scheduling or on the pool size.
    pub fn run_seeded<T, F>(
        &self,
        len: usize,
        master_seed: u64,
        unit: F,
    ) -> Result<Vec<T>, LscanError>
    where
        T: Send,
        F: Fn(usize, RngHandle) -> Result<T, LscanError> + Sync,
    {
        self.run_indexed(len, |index| {
            unit(index, RngHandle::for_substream(master_seed, index as u64))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn results_follow_index_order() {
        let dispatcher = Dispatcher::new(4).unwrap();
        let out = dispatcher.run_indexed(64, |i| Ok(i * i)).unwrap();
        assert_eq!(out, (0..64).map(|i| i * i).collect::<Vec<_>>());
    }

    #[test]
    fn failing_unit_fails_the_call() {
        let dispatcher = Dispatcher::new(2).unwrap();
        let err = dispatcher
            .run_indexed(16, |i| {
                if i == 7 {
                    Err(dispatch_error("boom", "unit seven failed"))
                } else {
                    Ok(i)
                }
            })
            .unwrap_err();
        assert_eq!(err.info().code, "boom");
    }

    #[test]
    fn seeded_units_ignore_pool_size() {
        let draw = |threads| {
            Dispatcher::new(threads)
                .unwrap()
                .run_seeded(32, 99, |_, mut rng| Ok(rng.gen::<u64>()))
                .unwrap()
        };
        assert_eq!(draw(1), draw(4));
    }

    #[test]
    fn empty_run_is_empty() {
        let dispatcher = Dispatcher::new(1).unwrap();
        let out: Vec<u8> = dispatcher.run_indexed(0, |_| Ok(0)).unwrap();
        assert!(out.is_empty());
    }
}
