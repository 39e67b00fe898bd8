//! Port decoding shared by the Master System and Game Gear controllers: the
//! I/O control register (`$3F`) and everything at `$40` and above.

use std::io::{Read, Write};

use anyhow::{Context, Result};

use crate::Peripherals;

/// Bits of the I/O control register whose clear→set edge latches the VDP
/// H counter (TH-A and TH-B direction).
const HC_TRIGGER_BITS: [u8; 2] = [0x01, 0x08];
/// Bits of the I/O control register remembered for edge detection.
const HC_LATCH_MASK: u8 = 0x0D;

/// Shadow of the I/O control register.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct IoControl {
    /// TH-A/TH-B output levels as read back in bits 6-7 of `$DD`.
    port3f: u8,
    /// Direction bits seen on the last write, for the H counter latch.
    port3f_hc: u8,
}

impl IoControl {
    pub fn port3f(&self) -> u8 {
        self.port3f
    }

    pub fn latch_bits(&self) -> u8 {
        self.port3f_hc
    }

    pub(crate) fn write(&mut self, value: u8, japanese: bool, peripherals: &Peripherals) {
        let latch = HC_TRIGGER_BITS
            .iter()
            .any(|&bit| value & bit != 0 && self.port3f_hc & bit == 0);
        if latch {
            peripherals.video.borrow_mut().latch_h_counter();
        }
        self.port3f_hc = value & HC_LATCH_MASK;

        self.port3f = ((value & 0x80) | ((value & 0x20) << 1)) & 0xC0;
        if japanese {
            self.port3f ^= 0xC0;
        }
    }

    pub(crate) fn save(&self, out: &mut dyn Write) -> Result<()> {
        out.write_all(&[self.port3f, self.port3f_hc])
            .context("writing I/O control registers")
    }

    pub(crate) fn load(&mut self, input: &mut dyn Read) -> Result<()> {
        let mut bytes = [0u8; 2];
        input
            .read_exact(&mut bytes)
            .context("reading I/O control registers")?;
        [self.port3f, self.port3f_hc] = bytes;
        Ok(())
    }
}

/// Writes to `$00..$3F` that are not claimed by a console-specific register:
/// even ports reach the memory control register, odd ports the I/O control
/// register.
pub(crate) fn write_control_port(
    io: &mut IoControl,
    port: u8,
    value: u8,
    japanese: bool,
    peripherals: &Peripherals,
) {
    if port & 0x01 == 0 {
        peripherals
            .diagnostics
            .trace(format_args!("memory control ${port:02X} <- {value:#04X}"));
        peripherals.memory.borrow_mut().set_memory_control(value);
    } else {
        io.write(value, japanese, peripherals);
    }
}

/// Reads from `$40..$FF`.
pub(crate) fn read_upper(io: &IoControl, port: u8, peripherals: &Peripherals) -> u8 {
    match port {
        0x40..=0x7F => {
            let video = peripherals.video.borrow();
            if port & 0x01 == 0 {
                video.v_counter()
            } else {
                video.h_counter()
            }
        }
        0x80..=0xBF => {
            let mut video = peripherals.video.borrow_mut();
            if port & 0x01 == 0 {
                video.read_data()
            } else {
                video.status_flags()
            }
        }
        0xC0 | 0xDC => peripherals.input.borrow().port_a(),
        0xC1 | 0xDD => (peripherals.input.borrow().port_b() & 0x3F) | (io.port3f & 0xC0),
        _ => {
            peripherals
                .diagnostics
                .info(format_args!("read from unmapped port ${port:02X}"));
            0xFF
        }
    }
}

/// Writes to `$40..$FF`.
pub(crate) fn write_upper(port: u8, value: u8, peripherals: &Peripherals) {
    match port {
        0x40..=0x7F => peripherals.audio.borrow_mut().write_tone_register(value),
        0x80..=0xBF => {
            let mut video = peripherals.video.borrow_mut();
            if port & 0x01 == 0 {
                video.write_data(value);
            } else {
                video.write_control(value);
            }
        }
        0xDE | 0xDF => peripherals
            .diagnostics
            .info(format_args!("write to keyboard port ${port:02X} ignored: {value:#04X}")),
        0xF0..=0xF2 => peripherals
            .diagnostics
            .info(format_args!("write to FM unit port ${port:02X} ignored: {value:#04X}")),
        _ => peripherals
            .diagnostics
            .info(format_args!("write to port ${port:02X} ignored: {value:#04X}")),
    }
}
