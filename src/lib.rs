// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |                init / use
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |           sync            |
//!              |   initialize / switch     |
//!              '------+-------------+------'
//!                     |             |
//!                     v             v
//!                 scanner       registry
//!               .env.<name>   shopifyenv.json
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, config    |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod scanner;
pub mod sync;
