//! API layer - inbound entry points.

pub mod event_feed;

pub use event_feed::{parse_line, EventFeed, FeedError, FeedStats, InboundMessage};
