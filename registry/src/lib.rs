// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The registry application: validates inbound catalog payloads and
//! persists them through the [`datastore::GraphStore`] seam.

pub mod config;
pub mod datastore;
mod registry;

pub use registry::Registry;
