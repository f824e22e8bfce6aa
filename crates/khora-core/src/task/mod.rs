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

//! Defines the task scheduling contract used by background imports.
//!
//! `khora-core` only states what a scheduler must offer. Thread-pool backed
//! implementations live in `khora-infra`; [`ImmediateScheduler`] is provided
//! here for tools and tests that want deterministic, single-threaded execution.

/// A detached unit of work. It may outlive the caller that submitted it.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A unit of work that may borrow from the caller's stack.
///
/// Scoped tasks are only accepted by [`TaskScheduler::execute_all`], which does
/// not return before every one of them has finished.
pub type ScopedTask<'a> = Box<dyn FnOnce() + Send + 'a>;

/// A service that runs work on some set of worker threads.
pub trait TaskScheduler: Send + Sync {
    /// Queues a task and returns immediately.
    ///
    /// There is no handle to await the task; callers observe completion through
    /// whatever state the task itself publishes.
    fn submit(&self, task: Task);

    /// Runs every task, possibly in parallel, and blocks until all of them have completed.
    ///
    /// Implementations must tolerate being called from one of their own workers.
    fn execute_all<'a>(&self, tasks: Vec<ScopedTask<'a>>);

    /// The number of threads work is spread across.
    fn worker_count(&self) -> usize;
}

/// A scheduler that runs every task on the calling thread, in submission order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateScheduler;

impl TaskScheduler for ImmediateScheduler {
    fn submit(&self, task: Task) {
        task();
    }

    fn execute_all<'a>(&self, tasks: Vec<ScopedTask<'a>>) {
        for task in tasks {
            task();
        }
    }

    fn worker_count(&self) -> usize {
        1
    }
}
