use crate::foundation::core::Timestamp;

/// Width of one tier band in encoded score units.
pub const TIER_SPAN: f64 = 400.0;
/// Width of one division band inside a divisible tier.
pub const DIVISION_SPAN: f64 = 100.0;
/// Highest sub-score kept inside a division band.
pub const DIVISION_SUB_MAX: f64 = 99.0;
/// Highest sub-score kept for tiers without divisions.
pub const APEX_SUB_MAX: f64 = 999.0;

/// Divisions from lowest to highest.
pub const DIVISIONS: [&str; 4] = ["IV", "III", "II", "I"];

/// Number of top tiers that have no divisions, in every schema.
pub const APEX_TIER_COUNT: usize = 3;

const LEGACY_TIERS: &[&str] = &[
    "Iron",
    "Bronze",
    "Silver",
    "Gold",
    "Platinum",
    "Diamond",
    "Master",
    "Grandmaster",
    "Challenger",
];

const CURRENT_TIERS: &[&str] = &[
    "Iron",
    "Bronze",
    "Silver",
    "Gold",
    "Platinum",
    "Emerald",
    "Diamond",
    "Master",
    "Grandmaster",
    "Challenger",
];

/// First instant (2024-01-10T00:00:00Z) at which the current tier list applies.
pub const SCHEMA_CUTOFF: Timestamp = Timestamp(1_704_844_800_000.0);

/// Ordered tier list (lowest first) valid for a range of observation times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierSchema {
    tiers: &'static [&'static str],
}

impl TierSchema {
    pub const LEGACY: Self = Self {
        tiers: LEGACY_TIERS,
    };
    pub const CURRENT: Self = Self {
        tiers: CURRENT_TIERS,
    };

    /// Schema in effect at `t`. Switches exactly once, at [`SCHEMA_CUTOFF`].
    pub fn at(t: Timestamp) -> Self {
        if t.0 < SCHEMA_CUTOFF.0 {
            Self::LEGACY
        } else {
            Self::CURRENT
        }
    }

    pub fn tiers(self) -> &'static [&'static str] {
        self.tiers
    }

    pub fn len(self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(self) -> bool {
        self.tiers.is_empty()
    }

    pub fn last_index(self) -> usize {
        self.tiers.len().saturating_sub(1)
    }

    /// Case-insensitive tier lookup.
    pub fn tier_index(self, name: &str) -> Option<usize> {
        self.tiers.iter().position(|t| t.eq_ignore_ascii_case(name))
    }

    pub fn tier_name(self, index: usize) -> Option<&'static str> {
        self.tiers.get(index).copied()
    }

    /// Whether the tier at `index` is subdivided into [`DIVISIONS`].
    pub fn has_divisions(self, index: usize) -> bool {
        index + APEX_TIER_COUNT < self.tiers.len()
    }
}

/// Division index (0 = lowest) for a division token, case-insensitive.
pub fn division_index(name: &str) -> Option<usize> {
    DIVISIONS.iter().position(|d| d.eq_ignore_ascii_case(name))
}
