// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> Synchronizer --> report on stdout
//!   init, use
//! ```

pub mod init;
pub mod switch;
