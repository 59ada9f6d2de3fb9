// Sherman Modifier System
// Real-time modifier masks and per-platform modifier labels

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::action::ParseError;

/// 8-bit real-time modifier mask, one bit per physical modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ModMask(pub u8);

impl ModMask {
    pub const NONE: ModMask = ModMask(0);
    pub const LCTL: ModMask = ModMask(0x01);
    pub const LSFT: ModMask = ModMask(0x02);
    pub const LALT: ModMask = ModMask(0x04);
    pub const LGUI: ModMask = ModMask(0x08);
    pub const RCTL: ModMask = ModMask(0x10);
    pub const RSFT: ModMask = ModMask(0x20);
    pub const RALT: ModMask = ModMask(0x40);
    pub const RGUI: ModMask = ModMask(0x80);

    /// Either control key
    pub const CTRL: ModMask = ModMask(0x11);
    /// Either shift key
    pub const SHIFT: ModMask = ModMask(0x22);
    /// Either alt key
    pub const ALT: ModMask = ModMask(0x44);
    /// Either gui key
    pub const GUI: ModMask = ModMask(0x88);
    /// Any right-hand modifier
    pub const RIGHT: ModMask = ModMask(0xF0);

    const NAMED: [(ModMask, &'static str); 8] = [
        (ModMask::LCTL, "LCTL"),
        (ModMask::LSFT, "LSFT"),
        (ModMask::LALT, "LALT"),
        (ModMask::LGUI, "LGUI"),
        (ModMask::RCTL, "RCTL"),
        (ModMask::RSFT, "RSFT"),
        (ModMask::RALT, "RALT"),
        (ModMask::RGUI, "RGUI"),
    ];

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any bit of `other` is set in `self`
    pub const fn intersects(self, other: ModMask) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: ModMask) -> ModMask {
        ModMask(self.0 | other.0)
    }

    /// Modifier mask for a modifier keycode name without prefix (`LSFT`)
    pub fn from_single_name(name: &str) -> Option<ModMask> {
        Self::NAMED
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(m, _)| *m)
    }
}

impl BitOr for ModMask {
    type Output = ModMask;

    fn bitor(self, rhs: ModMask) -> ModMask {
        self.union(rhs)
    }
}

impl BitOrAssign for ModMask {
    fn bitor_assign(&mut self, rhs: ModMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ModMask {
    type Output = ModMask;

    fn bitand(self, rhs: ModMask) -> ModMask {
        ModMask(self.0 & rhs.0)
    }
}

impl fmt::Display for ModMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let parts: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(m, _)| self.intersects(*m))
            .map(|(_, n)| *n)
            .collect();
        write!(f, "{}", parts.join("|"))
    }
}

impl FromStr for ModMask {
    type Err = ParseError;

    /// Parses `LCTL|LSFT`, `MOD_LSFT` or `NONE`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NONE") {
            return Ok(ModMask::NONE);
        }
        let mut mask = ModMask::NONE;
        for part in trimmed.split(['|', '+', ',']) {
            let part = part.trim();
            let name = part.strip_prefix("MOD_").unwrap_or(part);
            let bit = ModMask::from_single_name(name)
                .ok_or_else(|| ParseError::UnknownModifier(part.to_string()))?;
            mask |= bit;
        }
        Ok(mask)
    }
}

/// Host operating system as reported by the firmware's OS detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum OsVariant {
    #[default]
    #[strum(to_string = "unsure")]
    Unsure,
    #[strum(to_string = "linux")]
    Linux,
    #[strum(to_string = "windows")]
    Windows,
    #[strum(to_string = "macos", serialize = "mac")]
    MacOs,
    #[strum(to_string = "ios")]
    Ios,
}

impl OsVariant {
    /// macOS and iOS share Apple modifier conventions
    pub fn is_apple(self) -> bool {
        matches!(self, OsVariant::MacOs | OsVariant::Ios)
    }
}

/// Logical modifier family shown on the status display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModSlot {
    Shift,
    Ctrl,
    Alt,
    Gui,
}

impl ModSlot {
    /// Mask covering both sides of this modifier
    pub const fn mask(self) -> ModMask {
        match self {
            ModSlot::Shift => ModMask::SHIFT,
            ModSlot::Ctrl => ModMask::CTRL,
            ModSlot::Alt => ModMask::ALT,
            ModSlot::Gui => ModMask::GUI,
        }
    }
}

/// One labelled modifier cell on the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModLabel {
    pub label: &'static str,
    pub slot: ModSlot,
}

const fn label(label: &'static str, slot: ModSlot) -> ModLabel {
    ModLabel { label, slot }
}

const PC_LABELS: [ModLabel; 4] = [
    label("SH", ModSlot::Shift),
    label("CT", ModSlot::Ctrl),
    label("ALT", ModSlot::Alt),
    label("GUI", ModSlot::Gui),
];

const APPLE_LABELS: [ModLabel; 4] = [
    label("SH", ModSlot::Shift),
    label("CMD", ModSlot::Gui),
    label("OPT", ModSlot::Alt),
    label("CT", ModSlot::Ctrl),
];

/// Ordered modifier labels for a host OS.
///
/// Apple hosts put Command where other hosts put Control, so the second and
/// last cells swap families.
pub const fn mod_labels(os: OsVariant) -> &'static [ModLabel; 4] {
    match os {
        OsVariant::MacOs | OsVariant::Ios => &APPLE_LABELS,
        OsVariant::Unsure | OsVariant::Linux | OsVariant::Windows => &PC_LABELS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_masks() {
        assert!(ModMask::LSFT.intersects(ModMask::SHIFT));
        assert!(ModMask::RSFT.intersects(ModMask::SHIFT));
        assert!(!ModMask::LCTL.intersects(ModMask::SHIFT));
        assert_eq!(ModMask::LCTL | ModMask::RCTL, ModMask::CTRL);
    }

    #[test]
    fn test_mask_display_and_parse() {
        let mask = ModMask::LCTL | ModMask::RALT;
        assert_eq!(mask.to_string(), "LCTL|RALT");
        assert_eq!("LCTL|RALT".parse::<ModMask>().unwrap(), mask);
        assert_eq!("MOD_LSFT".parse::<ModMask>().unwrap(), ModMask::LSFT);
        assert_eq!("none".parse::<ModMask>().unwrap(), ModMask::NONE);
        assert!("HYPER".parse::<ModMask>().is_err());
    }

    #[test]
    fn test_os_variant_parse() {
        assert_eq!("macOS".parse::<OsVariant>().unwrap(), OsVariant::MacOs);
        assert_eq!("mac".parse::<OsVariant>().unwrap(), OsVariant::MacOs);
        assert_eq!("Linux".parse::<OsVariant>().unwrap(), OsVariant::Linux);
        assert!(OsVariant::Ios.is_apple());
        assert!(!OsVariant::Windows.is_apple());
    }

    #[test]
    fn test_mod_labels_swap_on_apple() {
        let pc: Vec<&str> = mod_labels(OsVariant::Linux).iter().map(|l| l.label).collect();
        assert_eq!(pc, ["SH", "CT", "ALT", "GUI"]);

        let apple = mod_labels(OsVariant::MacOs);
        assert_eq!(apple[1], label("CMD", ModSlot::Gui));
        assert_eq!(apple[2], label("OPT", ModSlot::Alt));
        assert_eq!(apple[3], label("CT", ModSlot::Ctrl));
        assert_eq!(mod_labels(OsVariant::Ios), apple);
    }
}
