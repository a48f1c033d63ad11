//! Gamma table codec for the kgamma wire format.
//!
//! The driver exposes each channel as one line of ten whitespace-separated
//! decimal integers: a leading checksum followed by nine curve values. The
//! 6th and 7th tokens are user-adjustable amplitudes; the other curve values
//! are fixed per panel.

use crate::error::GammaError;

/// Number of fields in a serialized gamma table, checksum included.
pub const FIELD_COUNT: usize = 10;

/// Maximum value the driver accepts for a tunable amplitude.
pub const MAX_AMP: u32 = 31;

/// Value written to both amplitudes by the factory-default reset action.
pub const RESET_AMP: u32 = 0;

const AMP0_INDEX: usize = 5;
const AMP1_INDEX: usize = 6;

/// One of the two user-tunable amplitude positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amp {
    /// The first amplitude (6th whitespace-separated token).
    Amp0,
    /// The second amplitude (7th whitespace-separated token).
    Amp1,
}

impl Amp {
    fn index(self) -> usize {
        match self {
            Amp::Amp0 => AMP0_INDEX,
            Amp::Amp1 => AMP1_INDEX,
        }
    }
}

/// A parsed gamma table for one color channel.
///
/// Holds all ten parsed fields. The stored checksum field is kept only so
/// an untouched table can be inspected; [`encode`](GammaTable::encode)
/// always recomputes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaTable {
    fields: [u32; FIELD_COUNT],
}

impl GammaTable {
    /// Parse a raw device line.
    ///
    /// Fails if fewer than [`FIELD_COUNT`] numeric fields are present.
    /// The positional layout is load-bearing, so there is no partial
    /// recovery: a short line means the driver speaks a different format
    /// and the device should be treated as unsupported. Fields past the
    /// tenth are ignored.
    pub fn parse(raw: &str) -> Result<Self, GammaError> {
        let mut fields = [0u32; FIELD_COUNT];
        let mut found = 0;
        for (index, token) in raw.split_whitespace().take(FIELD_COUNT).enumerate() {
            fields[index] = token.parse().map_err(|_| GammaError::InvalidField {
                index,
                token: token.to_owned(),
            })?;
            found += 1;
        }
        if found < FIELD_COUNT {
            return Err(GammaError::MalformedTable { found });
        }
        Ok(Self { fields })
    }

    /// Current value of one tunable amplitude.
    pub fn amp(&self, amp: Amp) -> u32 {
        self.fields[amp.index()]
    }

    /// Both tunable amplitudes, as (amp0, amp1).
    pub fn amps(&self) -> (u32, u32) {
        (self.fields[AMP0_INDEX], self.fields[AMP1_INDEX])
    }

    /// Replace one tunable amplitude.
    ///
    /// Range enforcement (0 to [`MAX_AMP`]) is the caller's contract;
    /// slider frontends clamp before calling.
    pub fn set_amp(&mut self, amp: Amp, value: u32) {
        debug_assert!(value <= MAX_AMP);
        self.fields[amp.index()] = value;
    }

    /// Serialize back to the driver's wire format.
    ///
    /// The checksum is recomputed from the nine trailing values on every
    /// call; the checksum that was parsed in is never carried over.
    pub fn encode(&self) -> String {
        let sum: u32 = self.fields[1..].iter().sum();
        let mut out = sum.to_string();
        for value in &self.fields[1..] {
            out.push(' ');
            out.push_str(&value.to_string());
        }
        out
    }
}
