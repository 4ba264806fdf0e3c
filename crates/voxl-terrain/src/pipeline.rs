//! Asynchronous chunk generation with a configurable thread pool.
//!
//! Offloads generation to background threads, supports cancellation, and
//! delivers completed chunks via bounded channels. The pool shares one
//! [`TerrainGenerator`], so workers benefit from its memo cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use dashmap::DashMap;
use tracing::debug;

use voxl_voxel::{Chunk, ChunkCoord};

use crate::generator::TerrainGenerator;

/// A request to generate a single chunk.
#[derive(Clone, Copy, Debug)]
pub struct GenerationTask {
    /// Position of the chunk to generate.
    pub coord: ChunkCoord,
    /// Priority hint: lower values should be submitted first. Typically
    /// the squared distance from the viewer.
    pub priority: u64,
}

/// A fully generated chunk ready for insertion into a region.
#[derive(Debug)]
pub struct GeneratedChunk {
    /// The coordinate matching the original task.
    pub coord: ChunkCoord,
    /// The generated chunk, shared with the generator cache.
    pub chunk: Arc<Chunk>,
    /// Generation time in microseconds (for profiling).
    pub generation_time_us: u64,
}

/// Internal wrapper that carries the task and its cancellation flag.
struct PendingTask {
    task: GenerationTask,
    cancelled: Arc<AtomicBool>,
}

/// Manages asynchronous chunk generation across a thread pool.
pub struct GeneratorPool {
    /// Sender for submitting generation tasks.
    task_sender: Sender<PendingTask>,
    /// Receiver for collecting completed chunks on the caller's thread.
    result_receiver: Receiver<GeneratedChunk>,
    /// Shared cancellation flag per task.
    active_tasks: Arc<DashMap<ChunkCoord, Arc<AtomicBool>>>,
    /// Current number of in-flight tasks.
    in_flight: Arc<AtomicU64>,
}

impl GeneratorPool {
    /// Create a new pool with the specified thread count and queue capacity.
    ///
    /// # Arguments
    /// - `generator`: shared chunk source; its memo cache is visible to
    ///   all workers.
    /// - `thread_count`: number of worker threads.
    /// - `max_concurrent`: maximum in-flight tasks. Excess submissions
    ///   are rejected.
    /// - `result_capacity`: bounded channel capacity for completed chunks.
    pub fn new(
        generator: Arc<TerrainGenerator>,
        thread_count: usize,
        max_concurrent: usize,
        result_capacity: usize,
    ) -> Self {
        let (task_sender, task_receiver) = bounded::<PendingTask>(max_concurrent * 2);
        let (result_sender, result_receiver) = bounded::<GeneratedChunk>(result_capacity);
        let in_flight = Arc::new(AtomicU64::new(0));

        for _ in 0..thread_count {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);
            let generator = Arc::clone(&generator);

            std::thread::Builder::new()
                .name("chunk-gen-worker".into())
                .spawn(move || {
                    while let Ok(pending) = receiver.recv() {
                        // Check cancellation before starting work.
                        if pending.cancelled.load(Ordering::Relaxed) {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let start = std::time::Instant::now();
                        let chunk = generator.generate(pending.task.coord);
                        let elapsed = start.elapsed().as_micros() as u64;

                        // Check cancellation after generation.
                        if !pending.cancelled.load(Ordering::Relaxed) {
                            let _ = sender.send(GeneratedChunk {
                                coord: pending.task.coord,
                                chunk,
                                generation_time_us: elapsed,
                            });
                        }

                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })
                .expect("failed to spawn chunk generation worker thread");
        }

        Self {
            task_sender,
            result_receiver,
            active_tasks: Arc::new(DashMap::new()),
            in_flight,
        }
    }

    /// Create a pool with a thread count based on available CPU cores.
    pub fn with_defaults(generator: Arc<TerrainGenerator>) -> Self {
        let cpus = num_cpus::get().max(2);
        let threads = (cpus - 1).max(1);
        Self::new(generator, threads, 64, 128)
    }

    /// Submit a chunk for background generation.
    ///
    /// Returns `Ok(())` if the task was queued, or `Err(task)` if the
    /// queue is full.
    pub fn submit(&self, task: GenerationTask) -> Result<(), GenerationTask> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.active_tasks.insert(task.coord, Arc::clone(&cancelled));
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        let pending = PendingTask { task, cancelled };
        self.task_sender.try_send(pending).map_err(|e| {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            let coord = e.into_inner().task.coord;
            self.active_tasks.remove(&coord);
            debug!(?coord, "generation queue full, task rejected");
            task
        })
    }

    /// Cancel a pending or in-progress generation task.
    ///
    /// If the task has already completed, this is a no-op.
    pub fn cancel(&self, coord: &ChunkCoord) {
        if let Some((_, cancelled)) = self.active_tasks.remove(coord) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Drain all completed chunks from the result channel.
    pub fn drain_results(&self) -> Vec<GeneratedChunk> {
        let mut results = Vec::new();
        while let Ok(done) = self.result_receiver.try_recv() {
            self.active_tasks.remove(&done.coord);
            results.push(done);
        }
        results
    }

    /// Number of tasks currently in flight (queued or executing).
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Returns `true` if a task for the given coordinate is pending.
    pub fn is_pending(&self, coord: &ChunkCoord) -> bool {
        self.active_tasks.contains_key(coord)
    }
}
