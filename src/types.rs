//! Type aliases and common types.

use nalgebra::{SMatrix, SVector};

/// 2x2 mixing matrix for the fluorescence spillover transform.
pub type Matrix2 = SMatrix<f64, 2, 2>;

/// 2-dimensional vector for a (FL1, FL2) fluorescence pair.
pub type Vector2 = SVector<f64, 2>;

/// Measurement channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Forward scatter; proxy for cell size.
    Fsc,
    /// Side scatter; proxy for internal complexity.
    Ssc,
    /// First fluorescence detection channel.
    Fl1,
    /// Second fluorescence detection channel.
    Fl2,
}

impl Channel {
    /// All channels in column order.
    pub const ALL: [Channel; 4] = [Channel::Fsc, Channel::Ssc, Channel::Fl1, Channel::Fl2];

    /// Stable column name, as exposed to downstream consumers.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Fsc => "FSC",
            Channel::Ssc => "SSC",
            Channel::Fl1 => "FL1",
            Channel::Fl2 => "FL2",
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FSC" => Ok(Channel::Fsc),
            "SSC" => Ok(Channel::Ssc),
            "FL1" => Ok(Channel::Fl1),
            "FL2" => Ok(Channel::Fl2),
            other => Err(format!("unknown channel: {other:?}")),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
