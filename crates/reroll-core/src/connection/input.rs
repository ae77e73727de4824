use strum::{Display, EnumString};

/// Controller buttons, spelled the way the wire protocol wants them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Button {
    A,
    B,
    X,
    Y,
    L,
    R,
    ZL,
    ZR,
    Plus,
    Minus,
    Home,
    Capture,
    DUp,
    DDown,
    DLeft,
    DRight,
    LStick,
    RStick,
}

/// Analog sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Stick {
    Left,
    Right,
}
