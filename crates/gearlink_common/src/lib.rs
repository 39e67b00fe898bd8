pub mod devices;
pub mod region;

pub use devices::{
    AudioDevice, CartridgeInfo, InputDevice, InterruptController, MemoryController, VideoDevice,
};
pub use region::Region;
