//! Channel identifiers and the kgamma sysfs node set.

use std::path::{Path, PathBuf};

/// Sysfs directory of the LG MIPI panel driver on supported devices.
const DEFAULT_SYSFS_DIR: &str = "/sys/devices/platform/mipi_lgit.1537";

const CTRL_FILE: &str = "kgamma_apply";

/// One display color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red channel.
    Red,
    /// Green channel.
    Green,
    /// Blue channel.
    Blue,
}

impl Channel {
    /// All channels. Order carries no meaning; channels are independent.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Short channel name for logging.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Channel::Red => "kgamma_r",
            Channel::Green => "kgamma_g",
            Channel::Blue => "kgamma_b",
        }
    }
}

/// The four sysfs nodes the driver exposes: one data file per channel plus
/// the shared apply trigger.
#[derive(Debug, Clone)]
pub struct GammaPaths {
    red: PathBuf,
    green: PathBuf,
    blue: PathBuf,
    ctrl: PathBuf,
}

impl GammaPaths {
    /// Build the standard node set under an arbitrary directory.
    ///
    /// Useful for bring-up on devices with a relocated driver and for
    /// tests that fake the interface in a scratch directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            red: dir.join(Channel::Red.file_name()),
            green: dir.join(Channel::Green.file_name()),
            blue: dir.join(Channel::Blue.file_name()),
            ctrl: dir.join(CTRL_FILE),
        }
    }

    /// Data file for one channel.
    pub fn data_path(&self, channel: Channel) -> &Path {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// The shared apply/control file.
    pub fn ctrl_path(&self) -> &Path {
        &self.ctrl
    }

    /// Whether the full kgamma interface is present.
    ///
    /// All four nodes must exist. A partial set means an incompatible
    /// driver and is treated the same as no driver at all.
    pub fn is_supported(&self) -> bool {
        self.red.exists() && self.green.exists() && self.blue.exists() && self.ctrl.exists()
    }
}

impl Default for GammaPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_SYSFS_DIR)
    }
}
