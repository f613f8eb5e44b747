// ABOUTME: Helper modules for dovana-cli
// ABOUTME: Console output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

pub mod display;
