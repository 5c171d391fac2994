// src/carousel/remote.rs

use serde_json::json;
use tokio::sync::mpsc::UnboundedSender;

/// Narrow remote-control surface over an embedded, cross-origin player.
/// Commands are fire-and-forget: no acknowledgment, no retry.
pub trait PlayerRemote {
    fn play(&self);
    fn pause(&self);
    fn mute(&self);
    fn unmute(&self);
}

/// Serializes player commands as JSON frames over a message channel, the
/// way a page posts into an embedded iframe. Delivery failures are dropped.
pub struct MessageChannelRemote {
    tx: UnboundedSender<String>,
}

impl MessageChannelRemote {
    pub fn new(tx: UnboundedSender<String>) -> Self {
        Self { tx }
    }

    fn post(&self, func: &str) {
        let frame = json!({
            "event": "command",
            "func": func,
            "args": [],
        })
        .to_string();
        let _ = self.tx.send(frame);
    }
}

impl PlayerRemote for MessageChannelRemote {
    fn play(&self) {
        self.post("playVideo");
    }

    fn pause(&self) {
        self.post("pauseVideo");
    }

    fn mute(&self) {
        self.post("mute");
    }

    fn unmute(&self) {
        self.post("unMute");
    }
}
