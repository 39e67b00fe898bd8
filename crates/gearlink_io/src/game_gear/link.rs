use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::GameGearPorts;

/// Non-owning reference to the Game Gear at the other end of the cable.
///
/// The owning emulation context decides how long each unit lives; a handle
/// whose unit has been dropped behaves like an unplugged cable.
#[derive(Clone)]
pub struct LinkHandle {
    peer: Weak<RefCell<GameGearPorts>>,
    /// Address of the linked controller, used to reject links to self.
    identity: usize,
}

impl LinkHandle {
    pub fn new(ports: &Rc<RefCell<GameGearPorts>>) -> Self {
        Self {
            peer: Rc::downgrade(ports),
            identity: RefCell::<GameGearPorts>::as_ptr(ports) as usize,
        }
    }

    pub(super) fn refers_to(&self, ports: &GameGearPorts) -> bool {
        self.identity == ports as *const GameGearPorts as usize
    }

    pub(super) fn upgrade(&self) -> Option<Rc<RefCell<GameGearPorts>>> {
        self.peer.upgrade()
    }
}

impl fmt::Debug for LinkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkHandle")
            .field("identity", &format_args!("{:#x}", self.identity))
            .field("alive", &(self.peer.strong_count() > 0))
            .finish()
    }
}

/// Plug a cable between two units: each becomes the other's peer.
pub fn connect(a: &Rc<RefCell<GameGearPorts>>, b: &Rc<RefCell<GameGearPorts>>) {
    a.borrow_mut().set_peer(Some(LinkHandle::new(b)));
    b.borrow_mut().set_peer(Some(LinkHandle::new(a)));
}

/// Unplug the cable from both ends.
pub fn disconnect(a: &Rc<RefCell<GameGearPorts>>, b: &Rc<RefCell<GameGearPorts>>) {
    a.borrow_mut().set_peer(None);
    b.borrow_mut().set_peer(None);
}

impl GameGearPorts {
    /// Replace the linked peer. `None` unplugs the cable. A handle to this
    /// very controller is refused and the current link is left as it was.
    pub fn set_peer(&mut self, peer: Option<LinkHandle>) {
        let diag = &self.peripherals.diagnostics;
        match peer {
            Some(handle) if handle.refers_to(self) => {
                diag.info(format_args!("cannot link a Game Gear to itself"));
            }
            Some(handle) => {
                diag.info(format_args!("linked to another Game Gear"));
                self.link = Some(handle);
            }
            None => {
                if self.link.take().is_some() {
                    diag.info(format_args!("link removed"));
                }
            }
        }
    }

    /// Whether a peer is plugged in and still alive.
    pub fn is_linked(&self) -> bool {
        self.link
            .as_ref()
            .is_some_and(|handle| handle.peer.strong_count() > 0)
    }

    /// The peer, if it still exists. A dropped peer unplugs the cable.
    pub(super) fn live_peer(&mut self) -> Option<Rc<RefCell<GameGearPorts>>> {
        let handle = self.link.as_ref()?;
        match handle.upgrade() {
            Some(peer) => Some(peer),
            None => {
                self.peripherals
                    .diagnostics
                    .warn(format_args!("linked Game Gear no longer exists, unlinking"));
                self.link = None;
                None
            }
        }
    }
}
