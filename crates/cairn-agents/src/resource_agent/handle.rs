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

//! The completion side of an asynchronous load request.

use cairn_core::{LoadError, ResourceHandle};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// The outcome delivered to a [`LoadHandle`].
pub(crate) type LoadResult = Result<ResourceHandle, LoadError>;

/// A handle to the eventual result of a load request.
///
/// The result is delivered exactly once. If the request is dropped before it
/// is processed (the loader was stopped), waiting yields
/// [`LoadError::Abandoned`] instead of blocking forever.
#[derive(Debug)]
pub struct LoadHandle {
    path: String,
    receiver: Receiver<LoadResult>,
}

impl LoadHandle {
    /// Creates a pending handle and the sender that resolves it.
    pub(crate) fn pending(path: &str) -> (Sender<LoadResult>, Self) {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        let handle = Self {
            path: path.to_string(),
            receiver,
        };
        (sender, handle)
    }

    /// Creates a handle that is already resolved.
    pub(crate) fn resolved(path: &str, result: LoadResult) -> Self {
        let (sender, handle) = Self::pending(path);
        // The channel has room for exactly this one message.
        let _ = sender.send(result);
        handle
    }

    /// The path this request was made for.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Blocks until the request completes.
    pub fn wait(self) -> LoadResult {
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(LoadError::Abandoned(self.path.clone())))
    }

    /// Blocks for at most `timeout`.
    ///
    /// Returns `None` if the request is still pending when the timeout
    /// expires.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<LoadResult> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                Some(Err(LoadError::Abandoned(self.path.clone())))
            }
        }
    }

    /// Returns the result if the request has completed, without blocking.
    pub fn try_result(&self) -> Option<LoadResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(LoadError::Abandoned(self.path.clone())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_handle_times_out() {
        let (_sender, handle) = LoadHandle::pending("wall.png");
        assert!(handle.try_result().is_none());
        assert!(handle.wait_timeout(Duration::from_millis(10)).is_none());
        assert_eq!(handle.path(), "wall.png");
    }

    #[test]
    fn dropped_sender_means_abandoned() {
        let (sender, handle) = LoadHandle::pending("wall.png");
        drop(sender);
        assert!(matches!(handle.wait(), Err(LoadError::Abandoned(path)) if path == "wall.png"));
    }

    #[test]
    fn resolved_handle_is_ready() {
        let handle = LoadHandle::resolved(
            "shader.frag",
            Err(LoadError::Unsupported(cairn_core::ResourceType::Shader)),
        );
        assert!(matches!(
            handle.try_result(),
            Some(Err(LoadError::Unsupported(_)))
        ));
    }
}
