//! Stand-in devices for running the port controllers without a full
//! emulator behind them.

use gearlink_common::{
    AudioDevice, CartridgeInfo, InputDevice, InterruptController, MemoryController, Region,
    VideoDevice,
};

/// Pads with nothing pressed.
pub struct IdlePads;

impl InputDevice for IdlePads {
    fn port_a(&self) -> u8 {
        0xFF
    }

    fn port_b(&self) -> u8 {
        0xFF
    }

    fn misc_port(&self) -> u8 {
        0x80
    }
}

/// A VDP that is always at the top-left of a blank frame.
#[derive(Default)]
pub struct HeadlessVideo;

impl VideoDevice for HeadlessVideo {
    fn v_counter(&self) -> u8 {
        0
    }

    fn h_counter(&self) -> u8 {
        0
    }

    fn read_data(&mut self) -> u8 {
        0
    }

    fn status_flags(&mut self) -> u8 {
        0
    }

    fn write_data(&mut self, _value: u8) {}

    fn write_control(&mut self, _value: u8) {}

    fn latch_h_counter(&mut self) {}
}

pub struct SilentAudio;

impl AudioDevice for SilentAudio {
    fn write_tone_register(&mut self, _value: u8) {}

    fn write_stereo_register(&mut self, _value: u8) {}
}

pub struct FixedCartridge(pub Region);

impl CartridgeInfo for FixedCartridge {
    fn region(&self) -> Region {
        self.0
    }
}

/// Counts NMIs instead of delivering them to a CPU.
#[derive(Default)]
pub struct NmiCounter {
    pub count: usize,
}

impl InterruptController for NmiCounter {
    fn request_nmi(&mut self) {
        self.count += 1;
    }
}

#[derive(Default)]
pub struct HeadlessMemory {
    pub nmi: NmiCounter,
    pub last_control: Option<u8>,
}

impl MemoryController for HeadlessMemory {
    fn set_memory_control(&mut self, value: u8) {
        self.last_control = Some(value);
    }

    fn interrupt_controller(&mut self) -> Option<&mut dyn InterruptController> {
        Some(&mut self.nmi)
    }
}
