// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A work-stealing task scheduler built on a dedicated `rayon` thread pool.

use khora_core::task::{ScopedTask, Task, TaskScheduler};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::any::Any;

/// Configuration for a [`RayonTaskScheduler`].
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Number of worker threads. `None` lets rayon pick (one per logical core).
    pub worker_threads: Option<usize>,
    /// Prefix of the worker thread names, suffixed with the worker index.
    pub thread_name_prefix: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            thread_name_prefix: "khora-worker".to_string(),
        }
    }
}

/// The engine's task scheduler.
///
/// Detached tasks go through [`ThreadPool::spawn`]. Fan-out work goes through
/// [`ThreadPool::scope`], whose join lets the waiting thread steal queued work,
/// so a task running on a worker can fan out again even on a one-thread pool.
pub struct RayonTaskScheduler {
    pool: ThreadPool,
}

impl RayonTaskScheduler {
    /// Builds a dedicated thread pool from `config`.
    pub fn new(config: SchedulerConfig) -> Result<Self, ThreadPoolBuildError> {
        let prefix = config.thread_name_prefix;
        let mut builder = ThreadPoolBuilder::new()
            .thread_name(move |index| format!("{prefix}-{index}"))
            .panic_handler(|payload| {
                log::error!(
                    "RayonTaskScheduler: A detached task panicked: {}",
                    panic_message(payload.as_ref())
                );
            });

        if let Some(threads) = config.worker_threads {
            builder = builder.num_threads(threads);
        }

        let pool = builder.build()?;
        log::info!(
            "RayonTaskScheduler: Started with {} worker thread(s).",
            pool.current_num_threads()
        );

        Ok(Self { pool })
    }

    /// Shorthand for a pool with exactly `threads` workers.
    pub fn with_threads(threads: usize) -> Result<Self, ThreadPoolBuildError> {
        Self::new(SchedulerConfig {
            worker_threads: Some(threads),
            ..Default::default()
        })
    }
}

impl TaskScheduler for RayonTaskScheduler {
    fn submit(&self, task: Task) {
        self.pool.spawn(task);
    }

    fn execute_all<'a>(&self, tasks: Vec<ScopedTask<'a>>) {
        if tasks.is_empty() {
            return;
        }

        self.pool.scope(move |scope| {
            for task in tasks {
                scope.spawn(move |_| task());
            }
        });
    }

    fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Drop for RayonTaskScheduler {
    fn drop(&mut self) {
        log::debug!("RayonTaskScheduler: Shutting down worker pool.");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}
