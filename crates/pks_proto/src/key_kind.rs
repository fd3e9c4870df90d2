//! Key classification shared by the keyring and the chain.

/// What a key is for. Ordinals are stable because they appear in
/// persisted metadata. The `Puk*` kinds are reserved for future per-user
/// keys; no operation produces them today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KeyKind {
    Unknown = 0,
    DeviceSigning = 1,
    DeviceEncryption = 2,
    DeviceSeed = 3,
    PukSigning = 4,
    PukEncryption = 5,
    PukSeed = 6,
}

impl KeyKind {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::DeviceSigning),
            2 => Some(Self::DeviceEncryption),
            3 => Some(Self::DeviceSeed),
            4 => Some(Self::PukSigning),
            5 => Some(Self::PukEncryption),
            6 => Some(Self::PukSeed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_stable() {
        for (kind, ordinal) in [
            (KeyKind::Unknown, 0),
            (KeyKind::DeviceSigning, 1),
            (KeyKind::DeviceEncryption, 2),
            (KeyKind::DeviceSeed, 3),
            (KeyKind::PukSigning, 4),
            (KeyKind::PukEncryption, 5),
            (KeyKind::PukSeed, 6),
        ] {
            assert_eq!(kind.ordinal(), ordinal);
            assert_eq!(KeyKind::from_ordinal(ordinal), Some(kind));
        }
        assert_eq!(KeyKind::from_ordinal(7), None);
    }
}
