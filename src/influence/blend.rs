//! Colour blending of the two influence percentages

use num_traits::ToPrimitive;

/// Scale from a percentage to an 8-bit channel value
const PERCENT_TO_CHANNEL: f64 = 2.55;

/// RGB colour of a single intersection
///
/// White influence drives the red channel, Black influence the green one.
/// Blue is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlendedColour {
    /// White influence channel
    pub red: u8,
    /// Black influence channel
    pub green: u8,
    /// Unused channel
    pub blue: u8,
}

impl BlendedColour {
    /// Channels as an `[r, g, b]` array
    pub const fn to_rgb(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Channels as an `[r, g, b, a]` array with the given alpha
    pub const fn to_rgba(self, alpha: u8) -> [u8; 4] {
        let [red, green, blue] = self.to_rgb();
        [red, green, blue, alpha]
    }
}

/// Blend Black and White influence percentages into a colour
///
/// Each channel is scaled independently and never renormalized against the
/// other, so both reaching 100 would give full yellow.
pub fn blend(black_pct: f64, white_pct: f64) -> BlendedColour {
    BlendedColour {
        red: channel(white_pct),
        green: channel(black_pct),
        blue: 0,
    }
}

// Half-way values round to even: 42.5 maps to 42, not 43
fn channel(pct: f64) -> u8 {
    let scaled = (pct * PERCENT_TO_CHANNEL).round_ties_even();
    num_traits::clamp(scaled, 0.0, f64::from(u8::MAX))
        .to_u8()
        .unwrap_or(0)
}
