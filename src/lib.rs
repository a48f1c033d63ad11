//! Unofficial Rust API for LG MIPI panel gamma calibration.
//!
//! This crate drives the `kgamma` sysfs interface exposed by the
//! `mipi_lgit` panel driver: one gamma table per color channel, each with
//! two user-tunable amplitudes, plus a shared apply trigger that latches a
//! just-written table. Confirmed settings are persisted to a JSON store
//! and replayed at boot, since the driver forgets written values across
//! restarts.
//!
//! # Requirements
//!
//! - A kernel exposing `kgamma_r`/`kgamma_g`/`kgamma_b`/`kgamma_apply`
//!   (LG MIPI panels, e.g. the Nexus 4)
//! - Write access to those nodes (usually root)
//!
//! # Example
//!
//! ```no_run
//! use kgamma_core::{Amp, Channel, EditSession, GammaDevice, JsonStore, SysfsDevice};
//!
//! fn main() -> Result<(), kgamma_core::GammaError> {
//!     let device = SysfsDevice::default();
//!     let mut store = JsonStore::open("/data/misc/display/gamma.json")?;
//!
//!     if !device.is_supported() {
//!         return Ok(());
//!     }
//!
//!     // Replay settings confirmed before the last reboot.
//!     kgamma_core::restore(&device, &store);
//!
//!     // Open an edit session on the red channel and drag a slider.
//!     let mut session = EditSession::open(&device, Channel::Red)?;
//!     session.set_amp(Amp::Amp0, 17)?;
//!     session.commit(&mut store)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! Use [`MockDevice`] and [`MemoryStore`] to test without hardware:
//!
//! ```
//! use kgamma_core::{Amp, Channel, EditSession, MockDevice};
//!
//! let mock = MockDevice::new();
//! let mut session = EditSession::open(&mock, Channel::Red).unwrap();
//! session.set_amp(Amp::Amp0, 10).unwrap();
//! assert_eq!(mock.line(Channel::Red), "38 1 2 3 4 10 6 3 4 5");
//! ```
//!
//! # Disclaimer
//!
//! This is an **unofficial** library built against the observed behavior of
//! the driver. Writing bad calibration values can make the panel unreadable
//! until the next cancel/reset. Use at your own risk.

#![warn(missing_docs)]

mod channel;
mod controller;
mod error;
mod mock;
mod state;
mod store;
mod table;

// Re-export public API
pub use channel::{Channel, GammaPaths};
pub use controller::{EditSession, GammaDevice, SysfsDevice, restore};
pub use error::GammaError;
pub use mock::{MemoryStore, MockDevice};
pub use state::SessionState;
pub use store::{JsonStore, SettingsStore};
pub use table::{Amp, FIELD_COUNT, GammaTable, MAX_AMP, RESET_AMP};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_live_preview_writes_each_tick() {
        let mock = MockDevice::new();
        let mut session = EditSession::open(&mock, Channel::Red).unwrap();
        assert_eq!(session.state().amp0, 5);
        assert_eq!(session.state().amp1, 6);

        session.set_amp(Amp::Amp0, 10).unwrap();
        assert_eq!(mock.line(Channel::Red), "38 1 2 3 4 10 6 3 4 5");

        session.set_amp(Amp::Amp1, 0).unwrap();
        assert_eq!(mock.line(Channel::Red), "32 1 2 3 4 10 0 3 4 5");

        // One latch per tick.
        assert_eq!(mock.pulse_count(), 2);
    }

    #[test]
    fn test_sessions_touch_only_their_channel() {
        let mock = MockDevice::new();
        let mut session = EditSession::open(&mock, Channel::Green).unwrap();
        session.set_amp(Amp::Amp0, 31).unwrap();

        assert_eq!(mock.line(Channel::Red), MockDevice::DEFAULT_LINE);
        assert_eq!(mock.line(Channel::Blue), MockDevice::DEFAULT_LINE);
    }

    #[test]
    fn test_commit_persists_reread_device_contents() {
        let mock = MockDevice::new();
        let mut store = MemoryStore::new();

        let mut session = EditSession::open(&mock, Channel::Red).unwrap();
        session.set_amp(Amp::Amp0, 7).unwrap();
        session.commit(&mut store).unwrap();

        assert_eq!(
            store.get(&mock.persist_key(Channel::Red)),
            Some("35 1 2 3 4 7 6 3 4 5")
        );
    }

    #[test]
    fn test_commit_stores_what_the_device_holds() {
        let mock = MockDevice::new();
        let mut store = MemoryStore::new();

        let session = EditSession::open(&mock, Channel::Green).unwrap();
        // Something else wrote the node mid-session; commit re-reads
        // rather than trusting the in-memory encoding.
        mock.set_line(Channel::Green, "45 9 9 9 9 1 2 3 4 5");
        session.commit(&mut store).unwrap();

        assert_eq!(
            store.get(&mock.persist_key(Channel::Green)),
            Some("45 9 9 9 9 1 2 3 4 5")
        );
    }

    #[test]
    fn test_cancel_rewrites_original_verbatim() {
        let mock = MockDevice::new();
        let mut session = EditSession::open(&mock, Channel::Red).unwrap();

        session.set_amp(Amp::Amp0, 25).unwrap();
        assert_ne!(mock.line(Channel::Red), MockDevice::DEFAULT_LINE);

        session.cancel().unwrap();
        // The stale checksum from the snapshot comes back too.
        assert_eq!(mock.line(Channel::Red), MockDevice::DEFAULT_LINE);
    }

    #[test]
    fn test_reset_zeroes_amps_through_apply_path() {
        let mock = MockDevice::new();
        let mut session = EditSession::open(&mock, Channel::Blue).unwrap();

        session.reset().unwrap();
        assert_eq!(mock.line(Channel::Blue), "22 1 2 3 4 0 0 3 4 5");
        assert_eq!(mock.pulse_count(), 2);
        assert_eq!(session.amp(Amp::Amp0), 0);
        assert_eq!(session.amp(Amp::Amp1), 0);
    }

    #[test]
    fn test_failed_write_keeps_session_alive() {
        let mock = MockDevice::new();
        let mut session = EditSession::open(&mock, Channel::Red).unwrap();

        mock.fail_writes(true);
        assert!(session.set_amp(Amp::Amp0, 10).is_err());
        // The table did not advance past the failed tick.
        assert_eq!(session.amp(Amp::Amp0), 5);

        mock.fail_writes(false);
        session.set_amp(Amp::Amp1, 1).unwrap();
        assert_eq!(mock.line(Channel::Red), "28 1 2 3 4 5 1 3 4 5");
    }

    #[test]
    fn test_open_fails_on_malformed_line() {
        let mock = MockDevice::new();
        mock.set_line(Channel::Red, "1 2 3");

        assert!(matches!(
            EditSession::open(&mock, Channel::Red),
            Err(GammaError::MalformedTable { found: 3 })
        ));
    }

    #[test]
    fn test_restore_applies_persisted_lines_verbatim() {
        let mock = MockDevice::new();
        let mut store = MemoryStore::new();
        store.put(&mock.persist_key(Channel::Red), "38 1 2 3 4 10 6 3 4 5");

        restore(&mock, &store);

        assert_eq!(mock.line(Channel::Red), "38 1 2 3 4 10 6 3 4 5");
        assert_eq!(mock.line(Channel::Green), MockDevice::DEFAULT_LINE);
        assert_eq!(mock.line(Channel::Blue), MockDevice::DEFAULT_LINE);
        assert_eq!(mock.pulse_count(), 1);
    }

    #[test]
    fn test_restore_with_no_entries_is_noop() {
        let mock = MockDevice::new();
        let store = MemoryStore::new();

        restore(&mock, &store);

        assert_eq!(mock.line(Channel::Red), MockDevice::DEFAULT_LINE);
        assert_eq!(mock.pulse_count(), 0);
    }

    #[test]
    fn test_restore_skips_unsupported_device() {
        let mock = MockDevice::unsupported();
        let mut store = MemoryStore::new();
        store.put(&mock.persist_key(Channel::Red), "38 1 2 3 4 10 6 3 4 5");

        restore(&mock, &store);

        assert_eq!(mock.line(Channel::Red), MockDevice::DEFAULT_LINE);
        assert_eq!(mock.pulse_count(), 0);
    }

    #[test]
    fn test_restore_swallows_write_failures() {
        let mock = MockDevice::new();
        mock.fail_writes(true);

        let mut store = MemoryStore::new();
        store.put(&mock.persist_key(Channel::Red), "38 1 2 3 4 10 6 3 4 5");
        store.put(&mock.persist_key(Channel::Blue), "22 1 2 3 4 0 0 3 4 5");

        // Must not panic or abort on the first failure.
        restore(&mock, &store);
        assert_eq!(mock.line(Channel::Red), MockDevice::DEFAULT_LINE);
        assert_eq!(mock.line(Channel::Blue), MockDevice::DEFAULT_LINE);
    }
}
