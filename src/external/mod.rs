// ABOUTME: External API clients
// ABOUTME: OpenAI chat completion client for profile-description suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// `OpenAI` suggestion-generation client with static fallback
pub mod openai_client;
