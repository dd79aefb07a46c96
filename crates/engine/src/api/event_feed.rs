//! JSON-lines event feed.
//!
//! Each line is one inbound message, internally tagged on `type`:
//!
//! ```text
//! {"type":"progressUpdated","mission":{...},"region":{...}}
//! {"type":"regionCompleted","region":{...}}
//! {"type":"onboarding","active":true}
//! {"type":"dialogDismissed"}
//! ```

use serde::Deserialize;
use sidewalk_domain::{DomainError, Mission, ProgressUpdated, Region, RegionCompleted};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::app::App;
use crate::infrastructure::ports::MissionRegistryPort;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    ProgressUpdated { mission: Mission, region: Region },
    RegionCompleted { region: Region },
    Onboarding { active: bool },
    /// The user closed the mission complete dialog
    DialogDismissed,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid message: {0}")]
    Invalid(#[from] DomainError),
}

/// Parse one feed line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<InboundMessage>, FeedError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let message: InboundMessage = serde_json::from_str(line)?;
    if let InboundMessage::ProgressUpdated { mission, .. } = &message {
        mission.validate()?;
    }
    Ok(Some(message))
}

/// Counts reported when the feed ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub handled: usize,
    pub skipped: usize,
}

/// Drives the app from inbound messages.
pub struct EventFeed<'a> {
    app: &'a App,
}

impl<'a> EventFeed<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    pub fn handle(&self, message: InboundMessage) {
        match message {
            InboundMessage::ProgressUpdated { mission, region } => {
                self.app.registry.set_current(mission.clone(), region.clone());
                // Publish what the registry holds so an earlier completion sticks.
                let mission = self.app.registry.current_mission().unwrap_or(mission);
                self.app
                    .bus
                    .publish_progress_updated(&ProgressUpdated { mission, region });
            }
            InboundMessage::RegionCompleted { region } => {
                let is_current = self
                    .app
                    .registry
                    .current_region()
                    .is_some_and(|current| current.id == region.id);
                if is_current {
                    self.app.registry.set_region(region.clone());
                }
                self.app
                    .bus
                    .publish_region_completed(&RegionCompleted { region });
            }
            InboundMessage::Onboarding { active } => {
                self.app.coordinator().set_onboarding(active);
            }
            InboundMessage::DialogDismissed => {
                self.app.presenter.dismiss();
            }
        }
    }

    /// Read lines until EOF. Bad lines are logged and skipped; only I/O
    /// errors end the feed early.
    pub async fn run<R>(&self, reader: R) -> anyhow::Result<FeedStats>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut stats = FeedStats::default();
        let mut lines = reader.lines();
        let mut line_no = 0usize;

        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            match parse_line(&line) {
                Ok(Some(message)) => {
                    self.handle(message);
                    stats.handled += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(line = line_no, error = %e, "Skipping feed line");
                    stats.skipped += 1;
                }
            }
        }

        tracing::info!(
            handled = stats.handled,
            skipped = stats.skipped,
            "Event feed ended"
        );
        Ok(stats)
    }
}
