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

//! # Cairn Data
//!
//! In-memory storage for loaded resources.
//!
//! The containers here are plain, single-threaded data structures. Callers
//! that share them across threads wrap them in their own lock, which lets a
//! single critical section cover the cache and the placeholder table together.

#![warn(missing_docs)]

pub mod resources;
