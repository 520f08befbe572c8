//! Unicode whitespace and punctuation tables.
//!
//! These decide whether a Markdown delimiter run may open or close emphasis.
//! The sets are fixed so results do not drift with the Unicode version of the
//! standard library.

/// Code points treated as whitespace next to a delimiter run.
const WHITESPACE: &[u32] = &[
    0x0009, 0x000A, 0x000C, 0x000D, 0x0020, 0x1680, 0x202F, 0x205F, 0x3000,
];

/// General punctuation space block (EN QUAD .. HAIR SPACE).
const WHITESPACE_RANGE: (u32, u32) = (0x2000, 0x200A);

/// Single punctuation code points, sorted for binary search.
const PUNCTUATION: &[u32] = &[
    0x0021, 0x0022, 0x0023, 0x0025, 0x0026, 0x0027, 0x0028, 0x0029, 0x002A, 0x002C,
    0x002D, 0x002E, 0x002F, 0x003A, 0x003B, 0x003F, 0x0040, 0x005B, 0x005C, 0x005D,
    0x005F, 0x007B, 0x007D, 0x00A1, 0x00A7, 0x00AB, 0x00B6, 0x00B7, 0x00BB, 0x00BF,
    0x037E, 0x0387, 0x055A, 0x055B, 0x055C, 0x055D, 0x055E, 0x055F, 0x0589, 0x058A,
    0x05BE, 0x05C0, 0x05C3, 0x05C6, 0x05F3, 0x05F4, 0x0609, 0x060A, 0x060C, 0x060D,
    0x061B, 0x061E, 0x061F, 0x06D4, 0x07F7, 0x07F8, 0x07F9, 0x085E, 0x0964, 0x0965,
    0x0970, 0x09FD, 0x0A76, 0x0AF0, 0x0C77, 0x0C84, 0x0DF4, 0x0E4F, 0x0E5A, 0x0E5B,
    0x0F14, 0x0F3A, 0x0F3B, 0x0F3C, 0x0F3D, 0x0F85, 0x0FD9, 0x0FDA, 0x10FB, 0x1400,
    0x166E, 0x169B, 0x169C, 0x16EB, 0x16EC, 0x16ED, 0x1735, 0x1736, 0x17D4, 0x17D5,
    0x17D6, 0x17D8, 0x17D9, 0x17DA, 0x1806, 0x1944, 0x1945, 0x1A1E, 0x1A1F, 0x1C7E,
    0x1C7F, 0x1CD3, 0x2016, 0x2017, 0x2018, 0x2019, 0x201A, 0x201B, 0x201C, 0x201D,
    0x201E, 0x201F, 0x2039, 0x203A, 0x203F, 0x2040, 0x2041, 0x2042, 0x2043, 0x2045,
    0x2046, 0x2053, 0x2054, 0x207D, 0x207E, 0x208D, 0x208E, 0x2308, 0x2309, 0x230A,
    0x230B, 0x2329, 0x232A, 0x2768, 0x2769, 0x276A, 0x276B, 0x276C, 0x276D, 0x276E,
    0x276F, 0x2770, 0x2771, 0x2772, 0x2773, 0x2774, 0x2775, 0x27C5, 0x27C6, 0x27E6,
    0x27E7, 0x27E8, 0x27E9, 0x27EA, 0x27EB, 0x27EC, 0x27ED, 0x27EE, 0x27EF, 0x2983,
    0x2984, 0x2985, 0x2986, 0x2987, 0x2988, 0x2989, 0x298A, 0x298B, 0x298C, 0x298D,
    0x298E, 0x298F, 0x2990, 0x2991, 0x2992, 0x2993, 0x2994, 0x2995, 0x2996, 0x2997,
    0x2998, 0x29D8, 0x29D9, 0x29DA, 0x29DB, 0x29FC, 0x29FD, 0x2E02, 0x2E03, 0x2E04,
    0x2E05, 0x2E09, 0x2E0A, 0x2E0C, 0x2E0D, 0x2E17, 0x2E1A, 0x2E1C, 0x2E1D, 0x2E20,
    0x2E21, 0x2E22, 0x2E23, 0x2E24, 0x2E25, 0x2E26, 0x2E27, 0x2E28, 0x2E29, 0x2E3A,
    0x2E3B, 0x2E40, 0x2E42, 0x3008, 0x3009, 0x300A, 0x300B, 0x300C, 0x300D, 0x300E,
    0x300F, 0x3010, 0x3011, 0x3014, 0x3015, 0x3016, 0x3017, 0x3018, 0x3019, 0x301A,
    0x301B, 0x301C, 0x301D, 0x301E, 0x301F, 0x3030, 0x30A0, 0xFD3E, 0xFD3F, 0xFE17,
    0xFE18, 0xFE31, 0xFE32, 0xFE33, 0xFE34, 0xFE35, 0xFE36, 0xFE37, 0xFE38, 0xFE39,
    0xFE3A, 0xFE3B, 0xFE3C, 0xFE3D, 0xFE3E, 0xFE3F, 0xFE40, 0xFE41, 0xFE42, 0xFE43,
    0xFE44, 0xFE47, 0xFE48, 0xFE4D, 0xFE4E, 0xFE4F, 0xFE58, 0xFE59, 0xFE5A, 0xFE5B,
    0xFE5C, 0xFE5D, 0xFE5E, 0xFE63, 0xFF08, 0xFF09, 0xFF0D, 0xFF3B, 0xFF3D, 0xFF3F,
    0xFF5B, 0xFF5D, 0xFF5F, 0xFF60, 0xFF62, 0xFF63, 0x10EAD,
];

/// Inclusive punctuation ranges, sorted by start.
const PUNCTUATION_RANGES: &[(u32, u32)] = &[
    (0x066A, 0x066D),
    (0x0700, 0x070D),
    (0x0830, 0x083E),
    (0x0F04, 0x0F12),
    (0x0FD0, 0x0FD4),
    (0x104A, 0x104F),
    (0x1360, 0x1368),
    (0x1800, 0x1805),
    (0x1807, 0x180A),
    (0x1AA0, 0x1AA6),
    (0x1AA8, 0x1AAD),
    (0x1B5A, 0x1B60),
    (0x1BFC, 0x1BFF),
    (0x1C3B, 0x1C3F),
    (0x1CC0, 0x1CC7),
    (0x2010, 0x2015),
    (0x2020, 0x2021),
    (0x2030, 0x2038),
    (0x203B, 0x203E),
    (0x2047, 0x2051),
    (0x2055, 0x205E),
    (0x2CF9, 0x2CFF),
];

/// Check if a character counts as whitespace for delimiter flanking
pub fn is_whitespace(c: char) -> bool {
    let code = c as u32;
    WHITESPACE.contains(&code) || (WHITESPACE_RANGE.0..=WHITESPACE_RANGE.1).contains(&code)
}

/// Check if a character counts as punctuation for delimiter flanking
pub fn is_punctuation(c: char) -> bool {
    let code = c as u32;
    if PUNCTUATION.binary_search(&code).is_ok() {
        return true;
    }
    PUNCTUATION_RANGES
        .iter()
        .take_while(|(start, _)| *start <= code)
        .any(|(_, end)| code <= *end)
}

/// Classification of the character on one side of a delimiter run.
///
/// A missing character (start or end of a text node) is neither whitespace
/// nor punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flank {
    pub whitespace: bool,
    pub punctuation: bool,
}

impl Flank {
    /// Classify an optional neighbouring character
    pub fn of(c: Option<char>) -> Self {
        match c {
            Some(c) => Self {
                whitespace: is_whitespace(c),
                punctuation: is_punctuation(c),
            },
            None => Self::default(),
        }
    }

    /// Whether a run with `self` before it and `after` after it can open emphasis
    pub fn can_open(self, after: Flank) -> bool {
        !after.whitespace && (!after.punctuation || self.whitespace || self.punctuation)
    }

    /// Whether a run with `self` before it and `after` after it can close emphasis
    pub fn can_close(self, after: Flank) -> bool {
        !self.whitespace && (!self.punctuation || after.whitespace || after.punctuation)
    }
}
