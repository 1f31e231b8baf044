// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod config_tests;
mod constraint_tests;
mod fixtures;
