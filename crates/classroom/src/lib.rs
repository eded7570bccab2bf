#![forbid(unsafe_code)]

//! # Classroom Library
//!
//! Seven small terminal exercises built on `recordbook`: a counter, four todo
//! lists with increasingly strict forms, a GPA calculator and a persisted
//! member directory.
//!
//! This module exposes the core types so the binary and the integration
//! tests share code.
//!
//! ## Public Modules
//!
//! - [`app`] - Page router and application model
//! - [`program`] - Terminal event loop
//! - [`simulator`] - Headless driver for tests and `--self-check`
//! - [`pages`] - The seven screens
//! - [`config`] - Runtime configuration

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod key;
pub mod logging;
pub mod messages;
pub mod pages;
pub mod program;
pub mod selfcheck;
pub mod simulator;
pub mod theme;
