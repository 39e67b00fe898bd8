//! Pure bit helpers used by the port controllers.
//!
//! The scramble tables describe how the Gear-to-Gear cable crosses the
//! parallel data lines between two units: a bit driven on one side arrives
//! on a different pin on the other side. Bit 7 has no wire.

/// Bit `bit` of `value`. Only the low three bits of `bit` are used.
#[inline]
pub const fn get_bit(value: u8, bit: u8) -> bool {
    (value >> (bit & 7)) & 1 != 0
}

/// `value` with bit `bit` forced to `set`. Only the low three bits of `bit` are used.
#[inline]
pub const fn update_bit(value: u8, bit: u8, set: bool) -> u8 {
    let mask = 1u8 << (bit & 7);
    if set {
        value | mask
    } else {
        value & !mask
    }
}

/// Sent bit → received bit.
const SCRAMBLE_TABLE: [(u8, u8); 7] = [(0, 2), (1, 3), (2, 1), (3, 0), (4, 5), (5, 4), (6, 6)];

/// Map a byte driven on this side of the cable to the pins it arrives on.
pub const fn scramble(data: u8) -> u8 {
    let mut result = 0;
    let mut i = 0;
    while i < SCRAMBLE_TABLE.len() {
        let (from, to) = SCRAMBLE_TABLE[i];
        if get_bit(data, from) {
            result |= 1 << to;
        }
        i += 1;
    }
    result
}

/// Inverse of [`scramble`] over the seven wired bits.
pub const fn unscramble(data: u8) -> u8 {
    let mut result = 0;
    let mut i = 0;
    while i < SCRAMBLE_TABLE.len() {
        let (from, to) = SCRAMBLE_TABLE[i];
        if get_bit(data, to) {
            result |= 1 << from;
        }
        i += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_update_bit() {
        assert!(get_bit(0b0100_0000, 6));
        assert!(!get_bit(0b0100_0000, 5));
        assert_eq!(update_bit(0x00, 3, true), 0x08);
        assert_eq!(update_bit(0xFF, 3, false), 0xF7);
        assert_eq!(update_bit(0x08, 3, true), 0x08);
    }

    #[test]
    fn bit_index_wraps_within_a_byte() {
        assert!(get_bit(0x01, 8));
        assert!(!get_bit(0x01, 9));
        assert!(get_bit(0x80, 255));
        assert_eq!(update_bit(0x00, 11, true), 0x08);
        assert_eq!(update_bit(0xFF, 15, false), 0x7F);
    }

    #[test]
    fn scramble_crosses_wires() {
        assert_eq!(scramble(0x01), 0x04);
        assert_eq!(scramble(0x02), 0x08);
        assert_eq!(scramble(0x04), 0x02);
        assert_eq!(scramble(0x08), 0x01);
        assert_eq!(scramble(0x10), 0x20);
        assert_eq!(scramble(0x20), 0x10);
        assert_eq!(scramble(0x40), 0x40);
    }

    #[test]
    fn bit_seven_is_not_connected() {
        assert_eq!(scramble(0x80), 0x00);
        assert_eq!(unscramble(0x80), 0x00);
    }

    #[test]
    fn unscramble_undoes_scramble_on_wired_bits() {
        for value in 0..=0xFFu8 {
            assert_eq!(unscramble(scramble(value)), value & 0x7F, "value {value:#04X}");
        }
    }
}
