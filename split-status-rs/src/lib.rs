//! Status model shared by the split-keyboard OLED widgets.
//!
//! The host firmware owns the BLE stack, USB stack and keymap. This crate
//! only describes what those subsystems report: typed [`StatusEvent`]s, the
//! [`StatusSource`] getters a widget snapshots its state from, and the
//! subscription masks that decide which widgets redraw on which events.
//!
//! [`StatusEvent`]: status::StatusEvent
//! [`StatusSource`]: status::StatusSource

#![no_std]

pub mod status;
