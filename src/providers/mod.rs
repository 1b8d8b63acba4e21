// ABOUTME: Third-party health service providers
// ABOUTME: Sync orchestration over stored integration credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Google Fit integration: scopes, sync orchestration, refresh stub
pub mod google_fit;
