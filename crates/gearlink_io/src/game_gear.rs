//! Game Gear I/O ports, including the Gear-to-Gear link cable.
//!
//! Compared to the Master System the Game Gear adds seven registers at
//! `$00..$06`: the start button / region byte, a 7-bit parallel port with
//! its direction register, and an asynchronous serial port. Two units are
//! linked by giving each a [`LinkHandle`] to the other; a completed serial
//! transfer on one side is delivered to the other side's receive register.
//!
//! Timing is driven by the host: after executing CPU work it calls
//! [`GameGearPorts::advance_serial`] with the number of clocks that elapsed.

mod dispatch;
mod link;
mod registers;
mod serial;
mod state;

use std::cell::RefCell;
use std::io::{Read, Write};
use std::rc::Rc;

use anyhow::Result;

use crate::bits::get_bit;
use crate::{IoControl, IoPorts, Peripherals};

pub use link::{connect, disconnect, LinkHandle};
pub use registers::{parallel_nmi_edge, RegisterBank, SerialControl, NINT, PC6_DIRECTION};
pub use serial::{BaudRate, SerialState, CPU_CLOCK_HZ};

pub struct GameGearPorts {
    regs: RegisterBank,
    io: IoControl,
    serial: SerialState,
    link: Option<LinkHandle>,
    peripherals: Peripherals,
}

impl GameGearPorts {
    pub fn new(peripherals: Peripherals) -> Self {
        Self {
            regs: RegisterBank::POWER_ON,
            io: IoControl::default(),
            serial: SerialState::default(),
            link: None,
            peripherals,
        }
    }

    /// Build a controller that can be linked to another one.
    pub fn new_shared(peripherals: Peripherals) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(peripherals)))
    }

    /// Power-on register values. Any transfer in flight is dropped without
    /// being delivered. The link cable stays plugged in.
    pub fn reset(&mut self) {
        self.regs = RegisterBank::POWER_ON;
        self.io = IoControl::default();
        self.serial = SerialState::default();
    }

    pub fn registers(&self) -> &RegisterBank {
        &self.regs
    }

    pub fn io_control(&self) -> &IoControl {
        &self.io
    }

    pub fn serial_state(&self) -> &SerialState {
        &self.serial
    }

    pub fn peripherals(&self) -> &Peripherals {
        &self.peripherals
    }

    pub fn baud_rate(&self) -> BaudRate {
        self.serial.baud_rate()
    }

    /// Select the serial speed from a BS1:BS0 value (bits above 1 ignored).
    pub fn set_baud_rate(&mut self, selector: u8) {
        let baud_rate = BaudRate::from_selector(selector);
        self.serial.set_baud_rate(baud_rate);
        self.peripherals.diagnostics.debug(format_args!(
            "serial baud rate {}",
            baud_rate.bits_per_second()
        ));
    }

    pub fn is_transfer_active(&self) -> bool {
        self.regs.port5.contains(SerialControl::TXFL)
    }

    /// Whether this unit drives parallel line `bit` as an output, given its
    /// own direction register and serial enables. TON claims line 4 as the
    /// transmit pin; RON claims line 5 as the receive pin.
    ///
    /// Only lines 0 to 6 exist; any other `bit` reports an input.
    pub fn is_output_bit(&self, bit: u8) -> bool {
        if bit > 6 {
            return false;
        }
        if bit == 4 && self.regs.port5.contains(SerialControl::TON) {
            return true;
        }
        if bit == 5 && self.regs.port5.contains(SerialControl::RON) {
            return false;
        }
        !get_bit(self.regs.port2, bit)
    }

    /// Let `clocks` CPU clocks pass on the serial port. When the current
    /// transfer finishes, TXFL drops and the byte goes to the linked peer.
    pub fn advance_serial(&mut self, clocks: u32) {
        let Some(byte) = self.serial.advance(clocks) else {
            return;
        };
        self.regs.port5.remove(SerialControl::TXFL);
        self.peripherals
            .diagnostics
            .debug(format_args!("serial transfer of {byte:#04X} complete"));

        let Some(peer) = self.live_peer() else {
            self.peripherals
                .diagnostics
                .debug(format_args!("no link cable, {byte:#04X} went nowhere"));
            return;
        };
        let borrowed = peer.try_borrow_mut();
        match borrowed {
            Ok(mut peer) => peer.receive_serial(byte),
            Err(_) => self.peripherals.diagnostics.warn(format_args!(
                "linked Game Gear is busy, {byte:#04X} not delivered"
            )),
        };
    }

    /// A byte arriving over the cable.
    pub fn receive_serial(&mut self, data: u8) {
        let diag = &self.peripherals.diagnostics;
        if !self.regs.port5.contains(SerialControl::RON) {
            diag.warn(format_args!("received {data:#04X} with RON clear, dropped"));
            return;
        }

        self.regs.port4 = data;
        self.regs.port5.insert(SerialControl::RXRD);
        diag.debug(format_args!(
            "received {data:#04X}, $05 now {:#04X}",
            self.regs.port5.bits()
        ));

        if self.regs.port5.contains(SerialControl::INT) {
            self.peripherals.request_nmi();
        }
    }

    fn start_transfer(&mut self) {
        let clocks = self.serial.start();
        self.regs.port5.insert(SerialControl::TXFL);
        self.peripherals.diagnostics.debug(format_args!(
            "serial transfer of {:#04X} started: {clocks} clocks at {} baud",
            self.serial.send_buffer(),
            self.serial.baud_rate().bits_per_second()
        ));
    }
}

impl IoPorts for GameGearPorts {
    fn reset(&mut self) {
        GameGearPorts::reset(self);
    }

    fn read_port(&mut self, port: u8) -> u8 {
        self.read_port_impl(port)
    }

    fn write_port(&mut self, port: u8, value: u8) {
        self.write_port_impl(port, value);
    }

    fn save_state(&self, out: &mut dyn Write) -> Result<()> {
        self.save_state_impl(out)
    }

    fn load_state(&mut self, input: &mut dyn Read) -> Result<()> {
        self.load_state_impl(input)
    }
}
