use bitflags::bitflags;

bitflags! {
    /// Serial control/status register (`$05`).
    ///
    /// Bits 0-2 are status owned by the controller; bits 3-7 are written by
    /// the CPU. BS1:BS0 select the baud rate.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct SerialControl: u8 {
        /// Transmit buffer full: a transfer is in progress.
        const TXFL = 0x01;
        /// Receive ready: `$04` holds an unread byte.
        const RXRD = 0x02;
        /// Framing error. Never raised by this emulation.
        const FRER = 0x04;
        /// Raise an NMI when a byte is received.
        const INT = 0x08;
        /// Transmit enable.
        const TON = 0x10;
        /// Receive enable.
        const RON = 0x20;
        const BS0 = 0x40;
        const BS1 = 0x80;
    }
}

impl SerialControl {
    pub const STATUS: Self = Self::TXFL.union(Self::RXRD).union(Self::FRER);
    pub const CONTROL: Self = Self::STATUS.complement();

    /// Either direction of the serial link is switched on.
    pub fn serial_mode(self) -> bool {
        self.intersects(Self::TON.union(Self::RON))
    }

    pub fn baud_selector(self) -> u8 {
        self.bits() >> 6
    }
}

/// `$02` bit 7: when clear, a falling PC6 raises an NMI.
pub const NINT: u8 = 0x80;
/// `$02` bit 6: direction of the PC6 line.
pub const PC6_DIRECTION: u8 = 0x40;

/// Whether a write of `new` over `old` to the parallel direction register
/// (`$02`) raises the parallel-mode NMI: NINT enabled and PC6 switching from
/// input to output.
pub const fn parallel_nmi_edge(old: u8, new: u8) -> bool {
    old & NINT == 0 && old & PC6_DIRECTION != 0 && new & PC6_DIRECTION == 0
}

/// The Game Gear specific registers at `$00..$06`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RegisterBank {
    pub port0: u8,
    /// Parallel data.
    pub port1: u8,
    /// Parallel data direction / NMI enable.
    pub port2: u8,
    /// Serial transmit data.
    pub port3: u8,
    /// Serial receive data.
    pub port4: u8,
    pub port5: SerialControl,
    /// Stereo output; the value itself goes to the PSG.
    pub port6: u8,
}

impl RegisterBank {
    pub const POWER_ON: Self = Self {
        port0: 0xC0,
        port1: 0x7F,
        port2: 0xFF,
        port3: 0x00,
        port4: 0xFF,
        port5: SerialControl::from_bits_retain(0xF8),
        port6: 0xFF,
    };
}

impl Default for RegisterBank {
    fn default() -> Self {
        Self::POWER_ON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_control_split_the_byte() {
        assert_eq!(SerialControl::STATUS.bits(), 0x07);
        assert_eq!(SerialControl::CONTROL.bits(), 0xF8);
    }

    #[test]
    fn nmi_edge_needs_nint_clear_and_pc6_falling() {
        assert!(parallel_nmi_edge(0x40, 0x00));
        assert!(!parallel_nmi_edge(0xC0, 0x00));
        assert!(!parallel_nmi_edge(0x00, 0x00));
        assert!(!parallel_nmi_edge(0x40, 0x40));
    }
}
