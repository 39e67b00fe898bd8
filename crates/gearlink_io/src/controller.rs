use std::cell::RefCell;
use std::io::{Read, Write};
use std::rc::Rc;

use anyhow::Result;

use crate::{GameGearPorts, MasterSystemPorts};

/// Port access contract shared by every console's I/O controller.
///
/// Reads and writes accept the full 8-bit port range and never fail;
/// addresses with nothing behind them read as `0xFF` and ignore writes.
pub trait IoPorts {
    fn reset(&mut self);
    fn read_port(&mut self, port: u8) -> u8;
    fn write_port(&mut self, port: u8, value: u8);
    fn save_state(&self, out: &mut dyn Write) -> Result<()>;
    fn load_state(&mut self, input: &mut dyn Read) -> Result<()>;
}

/// The I/O controller a console instance is built with.
///
/// The Game Gear controller is shared so that another unit can hold a link
/// to it.
pub enum ConsolePorts {
    MasterSystem(MasterSystemPorts),
    GameGear(Rc<RefCell<GameGearPorts>>),
}

impl ConsolePorts {
    pub fn game_gear(&self) -> Option<&Rc<RefCell<GameGearPorts>>> {
        match self {
            ConsolePorts::GameGear(ports) => Some(ports),
            ConsolePorts::MasterSystem(_) => None,
        }
    }

    /// Advance time-driven port state. Only the Game Gear serial port has
    /// any.
    pub fn advance(&mut self, clocks: u32) {
        if let ConsolePorts::GameGear(ports) = self {
            ports.borrow_mut().advance_serial(clocks);
        }
    }
}

impl IoPorts for ConsolePorts {
    fn reset(&mut self) {
        match self {
            ConsolePorts::MasterSystem(ports) => ports.reset(),
            ConsolePorts::GameGear(ports) => ports.borrow_mut().reset(),
        }
    }

    fn read_port(&mut self, port: u8) -> u8 {
        match self {
            ConsolePorts::MasterSystem(ports) => ports.read_port(port),
            ConsolePorts::GameGear(ports) => ports.borrow_mut().read_port(port),
        }
    }

    fn write_port(&mut self, port: u8, value: u8) {
        match self {
            ConsolePorts::MasterSystem(ports) => ports.write_port(port, value),
            ConsolePorts::GameGear(ports) => ports.borrow_mut().write_port(port, value),
        }
    }

    fn save_state(&self, out: &mut dyn Write) -> Result<()> {
        match self {
            ConsolePorts::MasterSystem(ports) => ports.save_state(out),
            ConsolePorts::GameGear(ports) => ports.borrow().save_state(out),
        }
    }

    fn load_state(&mut self, input: &mut dyn Read) -> Result<()> {
        match self {
            ConsolePorts::MasterSystem(ports) => ports.load_state(input),
            ConsolePorts::GameGear(ports) => ports.borrow_mut().load_state(input),
        }
    }
}
