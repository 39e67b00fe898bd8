//! Interfaces of the chips and units the I/O port controller talks to.
//!
//! None of these are implemented here; the emulator core provides the real
//! VDP, PSG, pad and mapper. The port controller only holds handles to them.

/// Pad and console button state as seen on the I/O ports.
pub trait InputDevice {
    /// Joypad port A/B register (`$DC`, mirrored at `$C0`).
    fn port_a(&self) -> u8;
    /// Joypad port B/misc register (`$DD`, mirrored at `$C1`).
    fn port_b(&self) -> u8;
    /// Game Gear start button / region byte (`$00`).
    fn misc_port(&self) -> u8;
}

/// Video display processor.
///
/// Data and status reads are `&mut self` because they have side effects on
/// real hardware (read buffer refill, flag clearing).
pub trait VideoDevice {
    fn v_counter(&self) -> u8;
    fn h_counter(&self) -> u8;
    fn read_data(&mut self) -> u8;
    fn status_flags(&mut self) -> u8;
    fn write_data(&mut self, value: u8);
    fn write_control(&mut self, value: u8);
    fn latch_h_counter(&mut self);
}

/// Programmable sound generator.
pub trait AudioDevice {
    fn write_tone_register(&mut self, value: u8);
    /// Game Gear only: per-channel left/right enable (`$06`).
    fn write_stereo_register(&mut self, value: u8);
}

pub trait CartridgeInfo {
    fn region(&self) -> crate::Region;
}

pub trait InterruptController {
    fn request_nmi(&mut self);
}

/// Memory mapper side of the console.
pub trait MemoryController {
    /// Memory control register (`$3E` and its mirrors).
    fn set_memory_control(&mut self, value: u8);

    /// The CPU's interrupt input, if one is attached yet.
    fn interrupt_controller(&mut self) -> Option<&mut dyn InterruptController>;
}
