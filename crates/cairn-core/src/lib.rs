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

//! # Cairn Core
//!
//! Foundational crate containing the resource types, handles, loader contracts
//! and configuration shared by every other Cairn crate.
//!
//! It has no knowledge of how files are decoded or how resources are cached;
//! those concerns live in `cairn-lanes` and `cairn-data` respectively.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod resource;

pub use config::{ConfigError, ResourceConfig};
pub use error::LoadError;
pub use resource::*;
