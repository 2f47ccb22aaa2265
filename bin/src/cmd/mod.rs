//! CLI subcommand modules.
//!
//! This module contains the implementations for all puckline CLI subcommands.

pub(crate) mod build;
pub(crate) mod columns;
pub(crate) mod prepare;
