// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The platform collaborator.
//!
//! Rendering a name for a concrete database requires two dialect-specific
//! operations: quoting a single identifier segment and applying the
//! dialect's case folding to unquoted identifiers. The schema model consumes
//! them through this trait and knows nothing else about the dialect.

/// A narrow view of a SQL dialect, sufficient for rendering object names.
pub trait Platform {
    /// Quotes a single identifier segment for this dialect. The input
    /// carries no quote delimiters.
    fn quote_single_identifier(&self, value: &str) -> String;

    /// Applies the dialect's unquoted-identifier normalization (typically
    /// case folding) to `value`.
    fn normalize_unquoted_identifier(&self, value: &str) -> String;
}
