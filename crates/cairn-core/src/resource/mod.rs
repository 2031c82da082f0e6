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

//! Provides the resource model shared by the whole loading pipeline.
//!
//! The key components are:
//! - [`ResourceType`]: the closed classification of asset files.
//! - [`ResourceData`]: the decoded content of a resource, as a tagged union of
//!   the texture, mesh and audio variants.
//! - [`Resource`]: the identity-bearing shell around the content. A shell can
//!   be loaded, unloaded and reloaded in place without changing identity.
//! - [`ResourceHandle`]: the shared handle consumers hold on to.
//! - [`ResourceLoader`]: the contract every format loader implements.

mod data;
mod handle;
mod kind;
mod loader;
mod shell;

pub use data::*;
pub use handle::*;
pub use kind::*;
pub use loader::*;
pub use shell::*;
