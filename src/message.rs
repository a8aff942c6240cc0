use std::time::Duration;
use tokio::time::Instant;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

// One line of feedback for the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub kind: MessageKind,
    pub expires_at: Option<Instant>,
}

// The single message slot; a new message always replaces the old one and its expiry
#[derive(Debug, Clone, Default)]
pub struct MessageArea {
    current: Option<Banner>,
}


impl MessageArea {
    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }

    // `None` or a zero duration keeps the message until replaced
    pub fn show(
        &mut self,
        text: impl Into<String>,
        kind: MessageKind,
        duration: Option<Duration>,
        now: Instant,
    ) {
        let expires_at = duration.filter(|d| !d.is_zero()).map(|d| now + d);
        self.current = Some(Banner {
            text: text.into(),
            kind,
            expires_at,
        });
    }

    // Returns true when a message was cleared
    pub fn expire(&mut self, now: Instant) -> bool {
        let due = self
            .current
            .as_ref()
            .and_then(|banner| banner.expires_at)
            .is_some_and(|at| at <= now);
        if due {
            self.current = None;
        }
        due
    }
}
