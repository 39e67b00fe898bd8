use crate::io_control;

use super::super::{parallel_nmi_edge, GameGearPorts, SerialControl};

impl GameGearPorts {
    pub(in crate::game_gear) fn write_port_impl(&mut self, port: u8, value: u8) {
        match port {
            0x00 => self.regs.port0 = value,
            0x01 => self.regs.port1 = value,
            0x02 => self.write_parallel_direction(value),
            0x03 => self.write_serial_data(value),

            // Receive buffer is filled by the link, never by the CPU.
            0x04 => {}

            0x05 => {
                let control = SerialControl::CONTROL.bits();
                let merged = (self.regs.port5.bits() & !control) | (value & control);
                self.regs.port5 = SerialControl::from_bits_retain(merged);
                self.set_baud_rate(value >> 6);
            }

            0x06 => self.peripherals.audio.borrow_mut().write_stereo_register(value),

            0x07..=0x3F => {
                let japanese = self.peripherals.region().is_japanese_game_gear();
                io_control::write_control_port(
                    &mut self.io,
                    port,
                    value,
                    japanese,
                    &self.peripherals,
                );
            }

            0x40..=0xFF => io_control::write_upper(port, value, &self.peripherals),
        }
    }

    fn write_parallel_direction(&mut self, value: u8) {
        if parallel_nmi_edge(self.regs.port2, value) {
            self.peripherals.diagnostics.debug(format_args!(
                "parallel NMI: $02 {:#04X} -> {value:#04X}",
                self.regs.port2
            ));
            self.peripherals.request_nmi();
        }
        self.regs.port2 = value;
    }

    fn write_serial_data(&mut self, value: u8) {
        if self.is_transfer_active() {
            self.peripherals.diagnostics.warn(format_args!(
                "write of {value:#04X} to $03 ignored, transfer in progress"
            ));
            return;
        }

        self.regs.port3 = value;
        self.serial.load(value);

        if self.regs.port5.serial_mode() {
            self.start_transfer();
        } else {
            self.peripherals
                .diagnostics
                .debug(format_args!("$03 written with serial mode off"));
        }
    }
}
