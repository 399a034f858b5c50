//! User-visible notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Upload, stream and channel failures all end up here; the tray component
//! renders the queue and the pages never surface errors any other way.

#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

use std::time::Duration;

use leptos::prelude::*;

use crate::error::AppError;

/// Oldest notices are dropped beyond this many.
pub const MAX_VISIBLE_NOTICES: usize = 4;

/// How long a notice stays on screen in the browser.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub message: String,
    pub tone: Tone,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_tone(Tone::Info, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_tone(Tone::Error, title, message)
    }

    fn with_tone(tone: Tone, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            message: message.into(),
            tone,
        }
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        Self::error(err.title(), err.to_string())
    }
}

/// Queue of notices currently on screen, oldest first.
#[derive(Clone, Debug, Default)]
pub struct NoticeState {
    pub items: Vec<Notice>,
}

impl NoticeState {
    /// Append a notice and return its id.
    pub fn push(&mut self, notice: Notice) -> String {
        let id = notice.id.clone();
        self.items.push(notice);
        if self.items.len() > MAX_VISIBLE_NOTICES {
            let overflow = self.items.len() - MAX_VISIBLE_NOTICES;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: &str) {
        self.items.retain(|n| n.id != id);
    }
}

/// Show `notice`. In the browser it is dismissed again after [`NOTICE_TTL`].
pub fn notify(notices: RwSignal<NoticeState>, notice: Notice) {
    let id = notices.try_update(|q| q.push(notice));
    #[cfg(feature = "hydrate")]
    if let Some(id) = id {
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(NOTICE_TTL).await;
            notices.try_update(|q| q.dismiss(&id));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}
