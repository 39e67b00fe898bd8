use std::cell::RefCell;
use std::rc::Rc;

use gearlink_common::{AudioDevice, CartridgeInfo, InputDevice, MemoryController, VideoDevice};
use typed_builder::TypedBuilder;

use crate::Diagnostics;

/// Handles to the rest of the console, bound once when a port controller is
/// built.
///
/// The controller shares these with the owning emulator: it never replaces
/// or drops them, and it only borrows each one for the duration of a single
/// port access. Callers must not hold a `RefCell` borrow on a device across
/// a `read_port`/`write_port` call that reaches it.
#[derive(Clone, TypedBuilder)]
pub struct Peripherals {
    pub audio: Rc<RefCell<dyn AudioDevice>>,
    pub video: Rc<RefCell<dyn VideoDevice>>,
    pub input: Rc<RefCell<dyn InputDevice>>,
    pub cartridge: Rc<RefCell<dyn CartridgeInfo>>,
    pub memory: Rc<RefCell<dyn MemoryController>>,
    #[builder(default)]
    pub diagnostics: Diagnostics,
}

impl Peripherals {
    /// Raise an NMI through the memory controller's interrupt line.
    ///
    /// When no interrupt controller is reachable the interrupt is logged and
    /// lost; there is no retry.
    pub(crate) fn request_nmi(&self) {
        let Ok(mut memory) = self.memory.try_borrow_mut() else {
            self.diagnostics
                .warn(format_args!("memory controller busy, NMI not delivered"));
            return;
        };
        match memory.interrupt_controller() {
            Some(interrupts) => {
                interrupts.request_nmi();
                self.diagnostics.debug(format_args!("NMI requested"));
            }
            None => self
                .diagnostics
                .warn(format_args!("no interrupt controller attached, NMI not delivered")),
        }
    }

    pub(crate) fn region(&self) -> gearlink_common::Region {
        self.cartridge.borrow().region()
    }
}
