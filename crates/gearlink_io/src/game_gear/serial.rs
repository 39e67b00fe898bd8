/// Z80 clock the serial divider is derived from (NTSC, 3.579545 MHz).
pub const CPU_CLOCK_HZ: u32 = 3_579_545;
/// Bit times counted per transferred byte.
const BITS_PER_TRANSFER: u32 = 8;

/// Serial link speed selected by BS1:BS0 in `$05`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum BaudRate {
    #[default]
    Baud4800,
    Baud2400,
    Baud1200,
    Baud300,
}

impl BaudRate {
    /// Only the low two bits of `selector` are looked at.
    pub const fn from_selector(selector: u8) -> Self {
        match selector & 0x03 {
            0 => BaudRate::Baud4800,
            1 => BaudRate::Baud2400,
            2 => BaudRate::Baud1200,
            _ => BaudRate::Baud300,
        }
    }

    pub const fn selector(self) -> u8 {
        match self {
            BaudRate::Baud4800 => 0,
            BaudRate::Baud2400 => 1,
            BaudRate::Baud1200 => 2,
            BaudRate::Baud300 => 3,
        }
    }

    pub const fn bits_per_second(self) -> u32 {
        match self {
            BaudRate::Baud4800 => 4800,
            BaudRate::Baud2400 => 2400,
            BaudRate::Baud1200 => 1200,
            BaudRate::Baud300 => 300,
        }
    }

    /// CPU clocks one byte takes on the wire.
    pub const fn transfer_clocks(self) -> u32 {
        CPU_CLOCK_HZ.div_ceil(self.bits_per_second()) * BITS_PER_TRANSFER
    }
}

/// Transmit side of the serial port.
///
/// `active` mirrors TXFL in `$05`; the owning controller keeps the two in
/// step.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SerialState {
    active: bool,
    clocks_remaining: u32,
    baud_rate: BaudRate,
    send_buffer: u8,
}

impl SerialState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Only meaningful while a transfer is active.
    pub fn clocks_remaining(&self) -> u32 {
        self.clocks_remaining
    }

    pub fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    pub fn send_buffer(&self) -> u8 {
        self.send_buffer
    }

    pub(super) fn set_baud_rate(&mut self, baud_rate: BaudRate) {
        self.baud_rate = baud_rate;
    }

    pub(super) fn load(&mut self, value: u8) {
        self.send_buffer = value;
    }

    /// Begin shifting out the send buffer. Returns the transfer length in
    /// CPU clocks.
    pub(super) fn start(&mut self) -> u32 {
        self.clocks_remaining = self.baud_rate.transfer_clocks();
        self.active = true;
        self.clocks_remaining
    }

    /// Count down `clocks`. Yields the byte that went out once the transfer
    /// completes, exactly once per transfer.
    pub(super) fn advance(&mut self, clocks: u32) -> Option<u8> {
        if !self.active {
            return None;
        }
        self.clocks_remaining = self.clocks_remaining.saturating_sub(clocks);
        if self.clocks_remaining != 0 {
            return None;
        }
        self.active = false;
        Some(self.send_buffer)
    }
}
