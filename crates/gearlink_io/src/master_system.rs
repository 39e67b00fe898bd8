//! Master System I/O ports.
//!
//! The standard console has no registers of its own below `$40`: every even
//! port there is the memory control register and every odd port the I/O
//! control register, and reads return `$FF`.

use std::io::{Read, Write};

use anyhow::Result;

use crate::{io_control, IoControl, IoPorts, Peripherals};

pub struct MasterSystemPorts {
    io: IoControl,
    peripherals: Peripherals,
}

impl MasterSystemPorts {
    pub fn new(peripherals: Peripherals) -> Self {
        Self {
            io: IoControl::default(),
            peripherals,
        }
    }

    pub fn io_control(&self) -> &IoControl {
        &self.io
    }
}

impl IoPorts for MasterSystemPorts {
    fn reset(&mut self) {
        self.io = IoControl::default();
    }

    fn read_port(&mut self, port: u8) -> u8 {
        match port {
            0x00..=0x3F => {
                self.peripherals
                    .diagnostics
                    .info(format_args!("read from unmapped port ${port:02X}"));
                0xFF
            }
            // Every pair in $C0..$FF mirrors $DC/$DD.
            0xC0..=0xFF if port & 0x01 == 0 => self.peripherals.input.borrow().port_a(),
            0xC0..=0xFF => {
                (self.peripherals.input.borrow().port_b() & 0x3F) | (self.io.port3f() & 0xC0)
            }
            _ => io_control::read_upper(&self.io, port, &self.peripherals),
        }
    }

    fn write_port(&mut self, port: u8, value: u8) {
        match port {
            0x00..=0x3F => {
                let japanese = self.peripherals.region().is_japanese_master_system();
                io_control::write_control_port(
                    &mut self.io,
                    port,
                    value,
                    japanese,
                    &self.peripherals,
                );
            }
            _ => io_control::write_upper(port, value, &self.peripherals),
        }
    }

    fn save_state(&self, out: &mut dyn Write) -> Result<()> {
        self.io.save(out)
    }

    fn load_state(&mut self, input: &mut dyn Read) -> Result<()> {
        self.io.load(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Rig;
    use gearlink_common::Region;

    #[test]
    fn low_ports_read_ff_and_split_writes_by_parity() {
        let rig = Rig::new(Region::Export);
        let mut ports = MasterSystemPorts::new(rig.peripherals());

        for port in 0x00..=0x3F {
            assert_eq!(ports.read_port(port), 0xFF);
        }

        ports.write_port(0x3E, 0xAB);
        ports.write_port(0x00, 0xCD);
        assert_eq!(rig.memory.borrow().control_writes, vec![0xAB, 0xCD]);

        ports.write_port(0x3F, 0xA0);
        assert_eq!(ports.io_control().port3f(), 0xC0);
    }

    #[test]
    fn pad_ports_mirror_through_upper_range() {
        let rig = Rig::new(Region::Export);
        rig.input.borrow_mut().port_a = 0x5A;
        rig.input.borrow_mut().port_b = 0xFF;
        let mut ports = MasterSystemPorts::new(rig.peripherals());
        ports.write_port(0x3F, 0x20);

        assert_eq!(ports.read_port(0xDC), 0x5A);
        assert_eq!(ports.read_port(0xC0), 0x5A);
        assert_eq!(ports.read_port(0xFE), 0x5A);
        assert_eq!(ports.read_port(0xDD), 0x3F | 0x40);
        assert_eq!(ports.read_port(0xC1), 0x3F | 0x40);
        assert_eq!(ports.read_port(0xFF), 0x3F | 0x40);
    }

    #[test]
    fn japanese_console_inverts_nationalisation_bits() {
        let rig = Rig::new(Region::Japan);
        let mut ports = MasterSystemPorts::new(rig.peripherals());
        ports.write_port(0x3F, 0xF5);
        assert_eq!(ports.io_control().port3f(), 0x00);
        ports.write_port(0x3F, 0x05);
        assert_eq!(ports.io_control().port3f(), 0xC0);
    }

    #[test]
    fn state_round_trips_io_control() {
        let rig = Rig::new(Region::Export);
        let mut ports = MasterSystemPorts::new(rig.peripherals());
        ports.write_port(0x3F, 0x85);

        let mut saved = Vec::new();
        ports.save_state(&mut saved).unwrap();
        assert_eq!(saved, vec![0x80, 0x05]);

        let mut restored = MasterSystemPorts::new(rig.peripherals());
        restored.load_state(&mut saved.as_slice()).unwrap();
        assert_eq!(restored.io_control(), ports.io_control());
    }
}
