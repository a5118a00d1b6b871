//! Command cases
//!
//! A case whose input is a shell command: the command's output becomes the
//! case's result tree.

pub mod command;
