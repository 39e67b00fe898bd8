//! Recording stand-ins for the console devices, shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use gearlink_common::{
    AudioDevice, CartridgeInfo, InputDevice, InterruptController, MemoryController, Region,
    VideoDevice,
};
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::{Diagnostics, Peripherals};

#[derive(Default)]
pub(crate) struct RecordingLog {
    records: Mutex<Vec<(Level, String, String)>>,
}

impl RecordingLog {
    pub(crate) fn entries(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(level, msg, _)| (*level, msg.clone()))
            .collect()
    }

    pub(crate) fn targets(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, target)| target.clone())
            .collect()
    }

    pub(crate) fn count(&self, level: Level) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _, _)| *l == level)
            .count()
    }

    pub(crate) fn contains(&self, level: Level, needle: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .iter()
            .any(|(l, msg, _)| *l == level && msg.contains(needle))
    }
}

impl Log for RecordingLog {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.records.lock().unwrap().push((
            record.level(),
            record.args().to_string(),
            record.target().to_string(),
        ));
    }

    fn flush(&self) {}
}

#[derive(Default)]
pub(crate) struct TestInput {
    pub(crate) port_a: u8,
    pub(crate) port_b: u8,
    pub(crate) misc: u8,
}

impl InputDevice for TestInput {
    fn port_a(&self) -> u8 {
        self.port_a
    }

    fn port_b(&self) -> u8 {
        self.port_b
    }

    fn misc_port(&self) -> u8 {
        self.misc
    }
}

#[derive(Default)]
pub(crate) struct TestVideo {
    pub(crate) v_counter: u8,
    pub(crate) h_counter: u8,
    pub(crate) data: u8,
    pub(crate) status: u8,
    pub(crate) data_writes: Vec<u8>,
    pub(crate) control_writes: Vec<u8>,
    pub(crate) h_latches: usize,
}

impl VideoDevice for TestVideo {
    fn v_counter(&self) -> u8 {
        self.v_counter
    }

    fn h_counter(&self) -> u8 {
        self.h_counter
    }

    fn read_data(&mut self) -> u8 {
        self.data
    }

    fn status_flags(&mut self) -> u8 {
        self.status
    }

    fn write_data(&mut self, value: u8) {
        self.data_writes.push(value);
    }

    fn write_control(&mut self, value: u8) {
        self.control_writes.push(value);
    }

    fn latch_h_counter(&mut self) {
        self.h_latches += 1;
    }
}

#[derive(Default)]
pub(crate) struct TestAudio {
    pub(crate) tone_writes: Vec<u8>,
    pub(crate) stereo_writes: Vec<u8>,
}

impl AudioDevice for TestAudio {
    fn write_tone_register(&mut self, value: u8) {
        self.tone_writes.push(value);
    }

    fn write_stereo_register(&mut self, value: u8) {
        self.stereo_writes.push(value);
    }
}

pub(crate) struct TestCartridge {
    pub(crate) region: Region,
}

impl CartridgeInfo for TestCartridge {
    fn region(&self) -> Region {
        self.region
    }
}

#[derive(Default)]
pub(crate) struct TestInterrupts {
    pub(crate) nmi_requests: usize,
}

impl InterruptController for TestInterrupts {
    fn request_nmi(&mut self) {
        self.nmi_requests += 1;
    }
}

pub(crate) struct TestMemory {
    pub(crate) control_writes: Vec<u8>,
    pub(crate) interrupts: Option<TestInterrupts>,
}

impl Default for TestMemory {
    fn default() -> Self {
        Self {
            control_writes: Vec::new(),
            interrupts: Some(TestInterrupts::default()),
        }
    }
}

impl MemoryController for TestMemory {
    fn set_memory_control(&mut self, value: u8) {
        self.control_writes.push(value);
    }

    fn interrupt_controller(&mut self) -> Option<&mut dyn InterruptController> {
        self.interrupts
            .as_mut()
            .map(|ic| ic as &mut dyn InterruptController)
    }
}

/// One console's worth of test devices plus the log they report into.
pub(crate) struct Rig {
    pub(crate) input: Rc<RefCell<TestInput>>,
    pub(crate) video: Rc<RefCell<TestVideo>>,
    pub(crate) audio: Rc<RefCell<TestAudio>>,
    pub(crate) cartridge: Rc<RefCell<TestCartridge>>,
    pub(crate) memory: Rc<RefCell<TestMemory>>,
    pub(crate) log: Arc<RecordingLog>,
}

impl Rig {
    pub(crate) fn new(region: Region) -> Self {
        Self {
            input: Rc::new(RefCell::new(TestInput::default())),
            video: Rc::new(RefCell::new(TestVideo::default())),
            audio: Rc::new(RefCell::new(TestAudio::default())),
            cartridge: Rc::new(RefCell::new(TestCartridge { region })),
            memory: Rc::new(RefCell::new(TestMemory::default())),
            log: Arc::new(RecordingLog::default()),
        }
    }

    pub(crate) fn peripherals(&self) -> Peripherals {
        Peripherals::builder()
            .audio(self.audio.clone())
            .video(self.video.clone())
            .input(self.input.clone())
            .cartridge(self.cartridge.clone())
            .memory(self.memory.clone())
            .diagnostics(Diagnostics::new(
                self.log.clone(),
                LevelFilter::Trace,
                "test",
            ))
            .build()
    }

    pub(crate) fn nmi_requests(&self) -> usize {
        self.memory
            .borrow()
            .interrupts
            .as_ref()
            .map_or(0, |ic| ic.nmi_requests)
    }

    pub(crate) fn detach_interrupts(&self) {
        self.memory.borrow_mut().interrupts = None;
    }
}
