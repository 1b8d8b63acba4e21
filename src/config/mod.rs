// ABOUTME: Configuration management module
// ABOUTME: Environment-only configuration; no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Environment-based server configuration
pub mod environment;
