//! Exhaustive checks over a range of model indices, split among worker threads.

use super::Config;
use crossbeam_queue::ArrayQueue;
use std::{
    ops::Range,
    panic,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

/// The maximum number of chunks the index range is split into.
const MAX_CHUNKS: usize = 1 << 16;

fn is_sequential(len: usize, config: &Config) -> bool {
    config.num_threads <= 1 || len <= config.chunk_size.max(1)
}

/// Splits `0..len` into chunks and pushes them to a new queue.
fn make_queue(len: usize, config: &Config) -> ArrayQueue<Range<usize>> {
    let chunk_size = config.chunk_size.max(1).max(len.div_ceil(MAX_CHUNKS));
    let num_chunks = len.div_ceil(chunk_size);
    let queue = ArrayQueue::new(num_chunks.max(1));
    for start in (0..len).step_by(chunk_size) {
        let chunk = start..(start + chunk_size).min(len);
        if queue.push(chunk).is_err() {
            unreachable!("queue has room for every chunk");
        }
    }
    log::debug!(
        "dispatching {} chunks of {} models to {} workers",
        num_chunks,
        chunk_size,
        config.num_threads
    );
    queue
}

/// Runs `worker` on `config.num_threads` threads, one of them being the calling thread, and returns
/// all of their results.
fn run_workers<T, F>(config: &Config, worker: F) -> Vec<T>
where
    T: Send,
    F: Fn() -> T + Sync,
{
    thread::scope(|s| {
        let worker = &worker;

        // We need to `collect` here to ensure we spawn all threads before starting to `join` them
        #[allow(clippy::needless_collect)]
        let handles: Vec<_> = (1..config.num_threads)
            .filter_map(|i| {
                thread::Builder::new()
                    .name(format!("proplogic-worker-{}", i))
                    .spawn_scoped(s, worker)
                    .map_err(|e| log::warn!("failed to spawn worker thread: {}", e))
                    .ok()
            })
            .collect();

        let mut results = vec![worker()];
        for handle in handles {
            match handle.join() {
                Ok(r) => results.push(r),
                Err(e) => panic::resume_unwind(e),
            }
        }
        results
    })
}

/// Returns `true` if `predicate` holds for every index in `0..len`. Workers stop taking new chunks
/// as soon as any of them finds an index for which `predicate` doesn't hold.
pub(crate) fn all_indices<F>(len: usize, config: &Config, predicate: F) -> bool
where
    F: Fn(usize) -> bool + Sync,
{
    if is_sequential(len, config) {
        return (0..len).all(predicate);
    }

    let queue = make_queue(len, config);
    let failed = AtomicBool::new(false);
    run_workers(config, || {
        while let Some(chunk) = queue.pop() {
            if failed.load(Ordering::Relaxed) {
                break;
            }
            let holds = chunk.clone().all(&predicate);
            log::trace!("chunk {:?}: {}", chunk, holds);
            if !holds {
                failed.store(true, Ordering::Relaxed);
                break;
            }
        }
    });
    !failed.load(Ordering::Relaxed)
}

/// Computes `f` for every index in `0..len`, returning the results in index order.
pub(crate) fn map_indices<T, F>(len: usize, config: &Config, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    if is_sequential(len, config) {
        return (0..len).map(f).collect();
    }

    let queue = make_queue(len, config);
    let mut chunks: Vec<(usize, Vec<T>)> = run_workers(config, || {
        let mut done = Vec::new();
        while let Some(chunk) = queue.pop() {
            log::trace!("chunk {:?}", chunk);
            done.push((chunk.start, chunk.map(&f).collect()));
        }
        done
    })
    .into_iter()
    .flatten()
    .collect();

    chunks.sort_unstable_by_key(|(start, _)| *start);
    chunks.into_iter().flat_map(|(_, values)| values).collect()
}
