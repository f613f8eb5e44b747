// ABOUTME: Re-exports command modules for dovana-cli
// ABOUTME: User, token, seed and featured maintenance commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

pub mod featured;
pub mod seed;
pub mod token;
pub mod user;
