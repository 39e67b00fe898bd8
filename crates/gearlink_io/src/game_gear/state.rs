use std::io::{Read, Write};

use anyhow::Result;

use super::GameGearPorts;

impl GameGearPorts {
    /// Only the I/O control shadow (`Port3F`, then its latch bits) is saved.
    /// Serial progress and the `$00..$06` registers are not part of the
    /// snapshot.
    pub(super) fn save_state_impl(&self, out: &mut dyn Write) -> Result<()> {
        self.io.save(out)
    }

    pub(super) fn load_state_impl(&mut self, input: &mut dyn Read) -> Result<()> {
        self.io.load(input)
    }
}
