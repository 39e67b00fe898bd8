//! I/O port controllers for the Sega Master System and Game Gear.
//!
//! The controllers decode Z80 `IN`/`OUT` port addresses and forward them to
//! the VDP, PSG, pads and mapper supplied through [`Peripherals`]. The Game
//! Gear variant also emulates the Gear-to-Gear link cable.

pub mod bits;
mod controller;
mod diagnostics;
pub mod game_gear;
mod io_control;
pub mod master_system;
mod peripherals;

#[cfg(test)]
mod test_support;

pub use controller::{ConsolePorts, IoPorts};
pub use diagnostics::Diagnostics;
pub use game_gear::{connect, BaudRate, GameGearPorts, LinkHandle, SerialControl};
pub use io_control::IoControl;
pub use master_system::MasterSystemPorts;
pub use peripherals::Peripherals;

pub use gearlink_common as common;
