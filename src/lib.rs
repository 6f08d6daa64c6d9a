//! Earthquake symbol map over a rotatable world projection, rendered with
//! Unicode Braille in the terminal.

pub mod app;
pub mod braille;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod map;
pub mod scale;
pub mod ui;
