/// Cartridge region as reported by the cartridge header / database lookup.
///
/// The port controllers only care whether the cartridge is a Japanese part,
/// because that inverts the nationalisation bits read back through the I/O
/// control register. Which "Japanese" counts depends on the console: the
/// Master System checks [`Region::Japan`], the Game Gear checks
/// [`Region::GameGearJapan`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Region {
    #[default]
    Export,
    Japan,
    GameGearExport,
    GameGearJapan,
}

impl Region {
    pub const fn is_japanese_game_gear(self) -> bool {
        matches!(self, Region::GameGearJapan)
    }

    pub const fn is_japanese_master_system(self) -> bool {
        matches!(self, Region::Japan)
    }
}
