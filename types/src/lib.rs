// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schema types for the registry's external API.
//!
//! Request bodies live in [`external_api::params`], response bodies in
//! [`external_api::views`], and the create-time payload validation that
//! makes a nested provider payload trustworthy lives in [`validation`].

pub mod external_api;
pub mod validation;
