use std::fmt;

use serde::{Serialize, Serializer};

/// A 24-bit `0xRRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Dark text colors, readable on a white background.
pub const PALETTE: [Rgb; 16] = [
    Rgb(0xDC143C), // crimson
    Rgb(0x1E90FF), // dodger blue
    Rgb(0x228B22), // forest green
    Rgb(0xFF8C00), // dark orange
    Rgb(0x9370DB), // medium purple
    Rgb(0xFF1493), // deep pink
    Rgb(0x00CED1), // dark turquoise
    Rgb(0xDAA520), // goldenrod
    Rgb(0xC71585), // medium violet red
    Rgb(0x32CD32), // lime green
    Rgb(0xBA55D3), // medium orchid
    Rgb(0xFF6347), // tomato
    Rgb(0x4169E1), // royal blue
    Rgb(0x9ACD32), // yellow green
    Rgb(0xFF69B4), // hot pink
    Rgb(0x4682B4), // steel blue
];

pub const CONFERENCE_COLOR: Rgb = Rgb(0x000000);

pub fn color_for(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}
