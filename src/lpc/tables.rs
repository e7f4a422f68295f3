//! LPC coefficient lookup tables
//!
//! Quantized reflection coefficients, energy levels, pitch periods and the
//! voiced chirp waveform for the two emulated speech chips. Each table holds
//! two sets, indexed by [`super::ChipVariant::table_index`]:
//! set 0 = TMS5220, set 1 = TMS5100.
//!
//! The values are scaled fixed-point numbers; their exact widths and shift
//! amounts in the lattice filter are what makes the output bit-exact.
//! K1/K2 carry 16-bit precision and dominate the sound; K3..K10 are 8-bit
//! and only decoded for voiced frames.

/// K1 reflection coefficient, 5-bit indices (interpreted as i16)
pub const K1: [[u16; 32]; 2] = [
    [
        0x82C0, 0x8380, 0x83C0, 0x8440, 0x84C0, 0x8540, 0x8600, 0x8780, 0x8880, 0x8980, 0x8AC0,
        0x8C00, 0x8D40, 0x8F00, 0x90C0, 0x92C0, 0x9900, 0xA140, 0xAB80, 0xB840, 0xC740, 0xD8C0,
        0xEBC0, 0x0000, 0x1440, 0x2740, 0x38C0, 0x47C0, 0x5480, 0x5EC0, 0x6700, 0x6D40,
    ],
    [
        0x82C0, 0x83C0, 0x84C0, 0x8600, 0x8800, 0x8A40, 0x8D00, 0x9080, 0x9540, 0x9AC0, 0xA180,
        0xAA00, 0xB3C0, 0xBF40, 0xCC80, 0xDB00, 0xEA80, 0xFAC0, 0x0B40, 0x1B80, 0x2AC0, 0x38C0,
        0x4540, 0x5000, 0x5940, 0x6100, 0x6740, 0x6C80, 0x70C0, 0x7400, 0x7680, 0x7C80,
    ],
];

/// K2 reflection coefficient, 5-bit indices (interpreted as i16)
pub const K2: [[u16; 32]; 2] = [
    [
        0xAE00, 0xB480, 0xBB80, 0xC340, 0xCB80, 0xD440, 0xDDC0, 0xE780, 0xF180, 0xFBC0, 0x0600,
        0x1040, 0x1A40, 0x2400, 0x2D40, 0x3600, 0x3E40, 0x45C0, 0x4CC0, 0x5300, 0x5880, 0x5DC0,
        0x6240, 0x6640, 0x69C0, 0x6CC0, 0x6F80, 0x71C0, 0x73C0, 0x7580, 0x7700, 0x7E80,
    ],
    [
        0xA8C0, 0xAE00, 0xB3C0, 0xBA00, 0xC100, 0xC840, 0xD000, 0xD880, 0xE100, 0xEA00, 0xF340,
        0xFC80, 0x05C0, 0x0F00, 0x1840, 0x2140, 0x29C0, 0x31C0, 0x3980, 0x40C0, 0x4780, 0x4D80,
        0x5340, 0x5880, 0x5D00, 0x6140, 0x6500, 0x6840, 0x6B40, 0x6DC0, 0x7040, 0x7E80,
    ],
];

/// K3 reflection coefficient, 4-bit indices (interpreted as i8)
pub const K3: [[u8; 16]; 2] = [
    [
        0x92, 0x9F, 0xAD, 0xBA, 0xC8, 0xD5, 0xE3, 0xF0, 0xFE, 0x0B, 0x19, 0x26, 0x34, 0x41, 0x4F,
        0x5C,
    ],
    [
        0x9E, 0xA6, 0xAF, 0xBA, 0xC8, 0xD6, 0xE7, 0xF8, 0x09, 0x1A, 0x2A, 0x39, 0x46, 0x52, 0x5B,
        0x63,
    ],
];

/// K4 reflection coefficient, 4-bit indices (interpreted as i8)
pub const K4: [[u8; 16]; 2] = [
    [
        0xAE, 0xBC, 0xCA, 0xD8, 0xE6, 0xF4, 0x01, 0x0F, 0x1D, 0x2B, 0x39, 0x47, 0x55, 0x63, 0x71,
        0x7E,
    ],
    [
        0xA5, 0xAD, 0xB8, 0xC4, 0xD1, 0xE0, 0xF0, 0x00, 0x10, 0x20, 0x2F, 0x3D, 0x49, 0x53, 0x5C,
        0x63,
    ],
];

/// K5 reflection coefficient, 4-bit indices, voiced frames only
pub const K5: [[u8; 16]; 2] = [
    [
        0xAE, 0xBA, 0xC5, 0xD1, 0xDD, 0xE8, 0xF4, 0xFF, 0x0B, 0x17, 0x22, 0x2E, 0x39, 0x45, 0x51,
        0x5C,
    ],
    [
        0xB1, 0xB9, 0xC2, 0xCC, 0xD7, 0xE2, 0xEE, 0xFB, 0x06, 0x12, 0x1E, 0x2A, 0x35, 0x3E, 0x47,
        0x50,
    ],
];

/// K6 reflection coefficient, 4-bit indices, voiced frames only
pub const K6: [[u8; 16]; 2] = [
    [
        0xC0, 0xCB, 0xD6, 0xE1, 0xEC, 0xF7, 0x03, 0x0E, 0x19, 0x24, 0x2F, 0x3A, 0x45, 0x50, 0x5B,
        0x66,
    ],
    [
        0xB8, 0xC2, 0xCD, 0xD8, 0xE4, 0xF1, 0xFF, 0x0B, 0x18, 0x25, 0x31, 0x3C, 0x46, 0x4E, 0x56,
        0x5D,
    ],
];

/// K7 reflection coefficient, 4-bit indices, voiced frames only
pub const K7: [[u8; 16]; 2] = [
    [
        0xB3, 0xBF, 0xCB, 0xD7, 0xE3, 0xEF, 0xFB, 0x07, 0x13, 0x1F, 0x2B, 0x37, 0x43, 0x4F, 0x5A,
        0x66,
    ],
    [
        0xB8, 0xC1, 0xCB, 0xD5, 0xE1, 0xED, 0xF9, 0x05, 0x11, 0x1D, 0x29, 0x34, 0x3E, 0x47, 0x4F,
        0x56,
    ],
];

/// K8 reflection coefficient, 3-bit indices, voiced frames only
pub const K8: [[u8; 8]; 2] = [
    [0xC0, 0xD8, 0xF0, 0x07, 0x1F, 0x37, 0x4F, 0x66],
    [0xCA, 0xE0, 0xF7, 0x0F, 0x26, 0x3B, 0x4C, 0x5A],
];

/// K9 reflection coefficient, 3-bit indices, voiced frames only
pub const K9: [[u8; 8]; 2] = [
    [0xC0, 0xD4, 0xE8, 0xFC, 0x10, 0x25, 0x39, 0x4D],
    [0xC8, 0xDA, 0xEC, 0x00, 0x13, 0x26, 0x37, 0x46],
];

/// K10 reflection coefficient, 3-bit indices, voiced frames only
pub const K10: [[u8; 8]; 2] = [
    [0xCD, 0xDF, 0xF1, 0x04, 0x16, 0x20, 0x3B, 0x4D],
    [0xD4, 0xE2, 0xF2, 0x00, 0x10, 0x1F, 0x2D, 0x3A],
];

/// Voiced excitation waveform, one pitch period, shared by both chips
pub const CHIRP: [u8; 41] = [
    0x00, 0x2A, 0xD4, 0x32, 0xB2, 0x12, 0x25, 0x14, 0x02, 0xE1, 0xC5, 0x02, 0x5F, 0x5A, 0x05,
    0x0F, 0x26, 0xFC, 0xA5, 0xA5, 0xD6, 0xDD, 0xDC, 0xFC, 0x25, 0x2B, 0x22, 0x21, 0x0F, 0xFF,
    0xF8, 0xEE, 0xED, 0xEF, 0xF7, 0xF6, 0xFA, 0x00, 0x03, 0x02, 0x01,
];

/// Energy levels, 4-bit indices; index 0 is a silence frame, 15 a stop frame
pub const ENERGY: [[u8; 16]; 2] = [
    [
        0x00, 0x02, 0x03, 0x04, 0x05, 0x07, 0x0A, 0x0F, 0x14, 0x20, 0x29, 0x39, 0x51, 0x72, 0xA1,
        0xFF,
    ],
    [
        0x00, 0x00, 0x01, 0x01, 0x02, 0x03, 0x05, 0x07, 0x0A, 0x0E, 0x15, 0x1E, 0x2B, 0x3D, 0x56,
        0x00,
    ],
];

/// Pitch period values; period 0 selects unvoiced (noise) excitation
///
/// TMS5220 uses 6-bit indices (all 64 entries); TMS5100 uses 5-bit indices,
/// the upper half is padding so both sets share one shape.
pub const PERIOD: [[u8; 64]; 2] = [
    [
        0x00, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D,
        0x1E, 0x1F, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x2B, 0x2D,
        0x2F, 0x31, 0x33, 0x35, 0x36, 0x39, 0x3B, 0x3D, 0x3F, 0x42, 0x45, 0x47, 0x49, 0x4D, 0x4F,
        0x51, 0x55, 0x57, 0x5C, 0x5F, 0x63, 0x66, 0x6A, 0x6E, 0x73, 0x77, 0x7B, 0x80, 0x85, 0x8A,
        0x8F, 0x95, 0x9A, 0xA0,
    ],
    [
        0x00, 0x29, 0x2B, 0x2D, 0x2F, 0x31, 0x33, 0x35, 0x37, 0x3A, 0x3C, 0x3F, 0x42, 0x46, 0x49,
        0x4C, 0x4F, 0x53, 0x57, 0x5A, 0x5E, 0x63, 0x67, 0x6B, 0x70, 0x76, 0x7B, 0x81, 0x86, 0x8C,
        0x93, 0x99, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
    ],
];
