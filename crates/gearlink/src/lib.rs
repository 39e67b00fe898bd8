mod devices;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use gearlink_common::Region;
use gearlink_io::{
    connect, BaudRate, Diagnostics, GameGearPorts, IoPorts, Peripherals, SerialControl,
};
use log::LevelFilter;
use typed_builder::TypedBuilder;

pub use devices::{
    FixedCartridge, HeadlessMemory, HeadlessVideo, IdlePads, NmiCounter, SilentAudio,
};

/// CPU clocks in one Game Gear scanline; a natural step for the host loop.
pub const CLOCKS_PER_SCANLINE: u32 = 228;

#[derive(Clone, Debug, TypedBuilder)]
pub struct LinkSessionConfig {
    #[builder(setter(into))]
    pub payload: Vec<u8>,
    /// BS1:BS0 value written to `$05` on both units.
    #[builder(default = 0)]
    pub baud_selector: u8,
    /// Clocks advanced per host step.
    #[builder(default = CLOCKS_PER_SCANLINE)]
    pub clock_slice: u32,
    #[builder(default = Region::GameGearExport)]
    pub region: Region,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SessionReport {
    pub received: Vec<u8>,
    pub nmi_count: usize,
    pub clocks: u64,
}

/// Per-unit logging that lets through whatever the installed logger accepts.
fn unit_diagnostics(name: &str, level: LevelFilter) -> Diagnostics {
    Diagnostics::default()
        .with_level(level)
        .with_target(format!("gearlink::{name}"))
}

struct Unit {
    ports: Rc<RefCell<GameGearPorts>>,
    memory: Rc<RefCell<HeadlessMemory>>,
}

impl Unit {
    fn new(name: &str, region: Region) -> Self {
        let memory = Rc::new(RefCell::new(HeadlessMemory::default()));
        let peripherals = Peripherals::builder()
            .audio(Rc::new(RefCell::new(SilentAudio)))
            .video(Rc::new(RefCell::new(HeadlessVideo)))
            .input(Rc::new(RefCell::new(IdlePads)))
            .cartridge(Rc::new(RefCell::new(FixedCartridge(region))))
            .memory(memory.clone())
            .diagnostics(unit_diagnostics(name, log::max_level()))
            .build();
        Self {
            ports: GameGearPorts::new_shared(peripherals),
            memory,
        }
    }

    fn write(&self, port: u8, value: u8) {
        self.ports.borrow_mut().write_port(port, value);
    }

    fn read(&self, port: u8) -> u8 {
        self.ports.borrow_mut().read_port(port)
    }
}

/// Stream `payload` from one Game Gear to another over the link cable.
///
/// Unit A transmits, unit B receives with the receive interrupt enabled.
/// Time advances in `clock_slice` steps until each byte has left A.
pub fn run_link_session(config: &LinkSessionConfig) -> Result<SessionReport> {
    if config.clock_slice == 0 {
        bail!("clock slice must be at least one clock");
    }

    let a = Unit::new("a", config.region);
    let b = Unit::new("b", config.region);
    connect(&a.ports, &b.ports);

    let control = SerialControl::TON | SerialControl::RON | SerialControl::INT;
    let serial = control.bits() | ((config.baud_selector & 0x03) << 6);
    a.write(0x05, serial);
    b.write(0x05, serial);

    let baud = BaudRate::from_selector(config.baud_selector);
    let budget = u64::from(baud.transfer_clocks()) + u64::from(config.clock_slice);
    log::info!(
        "sending {} bytes at {} baud ({} clocks per byte)",
        config.payload.len(),
        baud.bits_per_second(),
        baud.transfer_clocks()
    );

    let mut report = SessionReport::default();
    for (index, &byte) in config.payload.iter().enumerate() {
        a.write(0x03, byte);

        let mut spent = 0u64;
        while a.ports.borrow().is_transfer_active() {
            if spent > budget {
                bail!("byte {index} ({byte:#04X}) still in flight after {spent} clocks");
            }
            a.ports.borrow_mut().advance_serial(config.clock_slice);
            spent += u64::from(config.clock_slice);
        }
        report.clocks += spent;

        if b.read(0x05) & SerialControl::RXRD.bits() == 0 {
            bail!("byte {index} ({byte:#04X}) did not arrive");
        }
        let received = b.read(0x04);
        log::debug!("byte {index}: sent {byte:#04X}, received {received:#04X}");
        report.received.push(received);
    }

    report.nmi_count = b.memory.borrow().nmi.count;
    if a.memory.borrow().nmi.count != 0 {
        log::warn!("transmitting unit saw {} NMIs", a.memory.borrow().nmi.count);
    }
    Ok(report)
}
