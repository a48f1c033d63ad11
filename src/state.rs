//! Edit session snapshot.

use crate::channel::Channel;

/// A snapshot of one channel's editing state.
///
/// This is the view a frontend binds its two sliders to.
/// Use [`EditSession::state`](crate::EditSession::state) to obtain one.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The channel being edited.
    pub channel: Channel,
    /// Current first amplitude (0-31).
    pub amp0: u32,
    /// Current second amplitude (0-31).
    pub amp1: u32,
    /// The raw device line captured when the session opened.
    pub original: String,
}
