// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Federated resource registry
//!
//! This crate implements common facilities used by the registry: the
//! HTTP-agnostic API scaffolding (result aliases, pagination, node metadata,
//! validated scalars) and the error model shared by every other crate in
//! the workspace.  Other top-level crates implement the schema layer
//! (`fedreg_types`) and the application seam (`fedreg_registry`).

pub mod api;
