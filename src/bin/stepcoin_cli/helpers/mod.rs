// ABOUTME: Helper modules for stepcoin-cli
// ABOUTME: Output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

pub mod display;
