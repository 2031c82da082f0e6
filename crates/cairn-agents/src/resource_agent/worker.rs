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

//! The background thread that drains the load queue.

use super::handle::LoadResult;
use cairn_core::ResourceType;
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// A queued request to load `path` as `kind`.
pub(crate) struct LoadRequest {
    pub(crate) path: String,
    pub(crate) kind: ResourceType,
    pub(crate) reply: Sender<LoadResult>,
}

/// What the worker does with the requests it receives.
pub(crate) trait RequestHandler: Send + Sync + 'static {
    /// Processes a request and resolves its reply.
    fn dispatch(&self, request: LoadRequest);

    /// Drops a request that arrived after the loader was asked to stop.
    /// The reply sender is dropped unresolved.
    fn abandon(&self, request: LoadRequest);
}

/// Owns the worker thread and the producer side of its queue.
///
/// Requests are processed one at a time in the order they were sent.
pub(crate) struct AsyncLoader {
    running: Arc<AtomicBool>,
    sender: Sender<LoadRequest>,
    handle: thread::JoinHandle<()>,
}

impl AsyncLoader {
    /// Spawns the worker thread.
    ///
    /// `capacity` bounds the queue; `0` means unbounded. `running` is set
    /// here and observed by the worker for the rest of its life.
    pub(crate) fn start<H: RequestHandler>(
        thread_name: &str,
        capacity: usize,
        running: Arc<AtomicBool>,
        handler: Arc<H>,
    ) -> Self {
        let (sender, receiver) = if capacity == 0 {
            crossbeam_channel::unbounded::<LoadRequest>()
        } else {
            crossbeam_channel::bounded::<LoadRequest>(capacity)
        };

        running.store(true, Ordering::SeqCst);
        let worker_running = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || {
                log::info!("Resource loader thread started.");

                // Ends once every sender is gone and the queue is drained.
                for request in receiver.iter() {
                    if worker_running.load(Ordering::SeqCst) {
                        handler.dispatch(request);
                    } else {
                        handler.abandon(request);
                    }
                }

                log::info!("Resource loader thread stopped.");
            })
            .expect("Failed to spawn the resource loader thread");

        Self {
            running,
            sender,
            handle,
        }
    }

    /// A producer handle onto the queue.
    pub(crate) fn sender(&self) -> Sender<LoadRequest> {
        self.sender.clone()
    }

    /// Stops the worker and waits for it to exit.
    ///
    /// The request being processed finishes normally; every request still
    /// queued is abandoned.
    pub(crate) fn stop(self) {
        let Self {
            running,
            sender,
            handle,
        } = self;

        running.store(false, Ordering::SeqCst);
        drop(sender);
        if handle.join().is_err() {
            log::error!("Resource loader thread panicked.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        dispatched: Mutex<Vec<String>>,
        abandoned: Mutex<Vec<String>>,
    }

    impl RequestHandler for Recorder {
        fn dispatch(&self, request: LoadRequest) {
            self.dispatched.lock().unwrap().push(request.path);
        }

        fn abandon(&self, request: LoadRequest) {
            self.abandoned.lock().unwrap().push(request.path);
        }
    }

    fn request(path: &str) -> LoadRequest {
        let (reply, _) = crossbeam_channel::bounded(1);
        LoadRequest {
            path: path.to_string(),
            kind: ResourceType::Texture,
            reply,
        }
    }

    #[test]
    fn requests_are_dispatched_in_order() {
        let recorder = Arc::new(Recorder::default());
        let running = Arc::new(AtomicBool::new(false));
        let loader = AsyncLoader::start("test-loader", 0, running.clone(), recorder.clone());
        assert!(running.load(Ordering::SeqCst));

        let sender = loader.sender();
        for i in 0..10 {
            sender.send(request(&format!("{i}.png"))).unwrap();
        }
        drop(sender);
        loader.stop();

        assert!(!running.load(Ordering::SeqCst));
        let dispatched = recorder.dispatched.lock().unwrap().clone();
        let abandoned = recorder.abandoned.lock().unwrap().clone();
        // Whatever was not dispatched before the stop flag was seen is abandoned.
        assert_eq!(dispatched.len() + abandoned.len(), 10);
        let expected: Vec<String> = (0..dispatched.len()).map(|i| format!("{i}.png")).collect();
        assert_eq!(dispatched, expected);
    }
}
