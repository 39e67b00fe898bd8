use crate::bits::{get_bit, update_bit};
use crate::io_control;

use super::super::{GameGearPorts, SerialControl};

/// For each bit of `$01` as seen here, the peer's `$01` bit wired to it.
const PEER_PARALLEL_WIRING: [u8; 7] = [2, 3, 0, 1, 5, 4, 6];

impl GameGearPorts {
    pub(in crate::game_gear) fn read_port_impl(&mut self, port: u8) -> u8 {
        match port {
            // Start button and region: bit 6 reads 1 on export units.
            0x00 => {
                let value = self.peripherals.input.borrow().misc_port();
                if self.peripherals.region().is_japanese_game_gear() {
                    value
                } else {
                    value | 0x40
                }
            }

            0x01 => self.read_parallel_data(),
            0x02 => self.regs.port2,
            0x03 => self.regs.port3,

            // Reading the receive buffer consumes it.
            0x04 => {
                self.regs.port5.remove(SerialControl::RXRD);
                self.regs.port4
            }

            0x05 => self.regs.port5.bits(),

            0x06 => 0xFF,

            0x07..=0x3F => {
                self.peripherals
                    .diagnostics
                    .info(format_args!("read from unmapped port ${port:02X}"));
                0xFF
            }

            0x40..=0xFF => io_control::read_upper(&self.io, port, &self.peripherals),
        }
    }

    /// `$01` with the cable plugged in: every line the peer drives overrides
    /// our own latch, crossed over according to the cable wiring.
    fn read_parallel_data(&mut self) -> u8 {
        let own = self.regs.port1;
        let Some(peer) = self.live_peer() else {
            return own & 0x7F;
        };
        let Ok(peer) = peer.try_borrow() else {
            self.peripherals.diagnostics.warn(format_args!(
                "linked Game Gear is busy, reading $01 unlinked"
            ));
            return own & 0x7F;
        };

        let mut result = own;
        for (bit, &source) in (0u8..).zip(PEER_PARALLEL_WIRING.iter()) {
            if peer.is_output_bit(source) {
                result = update_bit(result, bit, get_bit(peer.regs.port1, source));
            }
        }
        result & 0x7F
    }
}
