//! Builtin offset tables and status-block layouts.
//!
//! Addresses are per game version and break on every patch; an unknown
//! version must fail resolution rather than guess (see
//! [`VersionOffsetTable::resolve`]).

use crate::offsets::{LocationDescriptor, VersionOffsetTable};

/// Sword/Shield. The status block is directly addressable; the id halves sit
/// at 0xA0 and the UTF-16 profile name at 0xB0.
pub mod swsh {
    use super::*;

    pub const SWORD_ID: &str = "0100ABF008968000";
    pub const SHIELD_ID: &str = "01008DB008C2C000";

    pub const BLOCK_LEN: usize = 0x110;
    pub const ID_OFFSET: usize = 0xA0;
    pub const NAME_OFFSET: usize = 0xB0;
    pub const NAME_LEN: usize = 0x1A;

    pub const TABLE: VersionOffsetTable = VersionOffsetTable::new(&[
        ("1.0.0", LocationDescriptor::absolute(0x4293_5E48, BLOCK_LEN)),
        ("1.1", LocationDescriptor::absolute(0x4293_5E48, BLOCK_LEN)),
        ("1.3.2", LocationDescriptor::absolute(0x4506_8F18, BLOCK_LEN)),
    ]);
}

/// Brilliant Diamond / Shining Pearl. The chain lands directly on the two id
/// halves; the two titles drift apart per patch, so each has its own table.
pub mod bdsp {
    use super::*;

    pub const DIAMOND_ID: &str = "0100000011D90000";
    pub const PEARL_ID: &str = "010018E011D92000";

    pub const BLOCK_LEN: usize = 0x4;
    pub const ID_OFFSET: usize = 0x0;

    pub const DIAMOND_TABLE: VersionOffsetTable = VersionOffsetTable::new(&[
        ("1.1.1", LocationDescriptor::chain(&[0x4C1_DCF8, 0xB8, 0x10, 0xE8], BLOCK_LEN)),
        ("1.1.2", LocationDescriptor::chain(&[0x4E3_4DD0, 0xB8, 0x10, 0xE8], BLOCK_LEN)),
        ("1.1.3", LocationDescriptor::chain(&[0x4E5_9E60, 0xB8, 0x10, 0xE8], BLOCK_LEN)),
        ("1.2.0", LocationDescriptor::chain(&[0x4E3_6C58, 0xB8, 0x10, 0xE8], BLOCK_LEN)),
        ("1.3.0", LocationDescriptor::chain(&[0x4C6_4DC0, 0xB8, 0x10, 0xE8], BLOCK_LEN)),
    ]);

    pub const PEARL_TABLE: VersionOffsetTable = VersionOffsetTable::new(&[
        ("1.1.1", LocationDescriptor::chain(&[0x4E3_4DD0, 0xB8, 0x10, 0xE8], BLOCK_LEN)),
        ("1.1.2", LocationDescriptor::chain(&[0x4E3_4DD0, 0xB8, 0x10, 0xE8], BLOCK_LEN)),
        ("1.1.3", LocationDescriptor::chain(&[0x4E5_9E60, 0xB8, 0x10, 0xE8], BLOCK_LEN)),
        ("1.2.0", LocationDescriptor::chain(&[0x4E3_6C58, 0xB8, 0x10, 0xE8], BLOCK_LEN)),
        ("1.3.0", LocationDescriptor::chain(&[0x4E7_BE98, 0xB8, 0x10, 0xE8], BLOCK_LEN)),
    ]);
}

/// Legends: Arceus.
pub mod la {
    use super::*;

    pub const ARCEUS_ID: &str = "01001F5010DFA000";

    pub const BLOCK_LEN: usize = 0x40;
    pub const ID_OFFSET: usize = 0x10;

    pub const TABLE: VersionOffsetTable = VersionOffsetTable::new(&[
        ("1.0.1", LocationDescriptor::chain(&[0x427_B470, 0x218, 0x68], BLOCK_LEN)),
        ("1.0.2", LocationDescriptor::chain(&[0x427_C470, 0x218, 0x68], BLOCK_LEN)),
        ("1.1.0", LocationDescriptor::chain(&[0x42B_A6B0, 0x218, 0x68], BLOCK_LEN)),
        ("1.1.1", LocationDescriptor::chain(&[0x42B_A6B0, 0x218, 0x68], BLOCK_LEN)),
    ]);
}

/// Scarlet/Violet. The 2.x update reshuffled the heap, hence the deeper
/// chains from 2.0.1 on.
pub mod sv {
    use super::*;

    pub const SCARLET_ID: &str = "0100A3D008C5C000";
    pub const VIOLET_ID: &str = "01008F6008C5E000";

    pub const BLOCK_LEN: usize = 0x68;
    pub const ID_OFFSET: usize = 0x0;

    pub const TABLE: VersionOffsetTable = VersionOffsetTable::new(&[
        ("1.0.1", LocationDescriptor::chain(&[0x438_4B18, 0x148, 0x40], BLOCK_LEN)),
        ("1.1.0", LocationDescriptor::chain(&[0x438_4B18, 0x148, 0x40], BLOCK_LEN)),
        ("1.2.0", LocationDescriptor::chain(&[0x44A_98C8, 0x100, 0x40], BLOCK_LEN)),
        ("1.3.0", LocationDescriptor::chain(&[0x44B_FBA8, 0x100, 0x40], BLOCK_LEN)),
        ("1.3.1", LocationDescriptor::chain(&[0x44B_FBA8, 0x100, 0x40], BLOCK_LEN)),
        ("1.3.2", LocationDescriptor::chain(&[0x44C_1C18, 0x100, 0x40], BLOCK_LEN)),
        ("2.0.1", LocationDescriptor::chain(&[0x461_6648, 0xD8, 0x8, 0xB8, 0x0, 0x40], BLOCK_LEN)),
        ("2.0.2", LocationDescriptor::chain(&[0x461_7648, 0xD8, 0x8, 0xB8, 0x0, 0x40], BLOCK_LEN)),
        ("3.0.0", LocationDescriptor::chain(&[0x473_50D8, 0xD8, 0x8, 0xB8, 0x0, 0x40], BLOCK_LEN)),
        ("3.0.1", LocationDescriptor::chain(&[0x473_50D8, 0xD8, 0x8, 0xB8, 0x0, 0x40], BLOCK_LEN)),
        ("4.0.0", LocationDescriptor::chain(&[0x473_50D8, 0xD8, 0x8, 0xB8, 0x0, 0x40], BLOCK_LEN)),
    ]);
}
