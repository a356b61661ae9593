//! # overlap-engine
//!
//! Find meeting times that work for people spread across time zones.
//!
//! Every participant is rated in their own local time, and candidate slots
//! are ranked by the average rating across the group. Time zone math uses the
//! IANA database bundled with `chrono-tz`, so daylight-saving transitions are
//! resolved for the exact instant being scored.
//!
//! ## Modules
//!
//! - [`zone`] — Instant → local civil time, `HH:mm` / `MMM dd, yyyy HH:mm` formatting
//! - [`suitability`] — Per-participant convenience score for one instant
//! - [`search`] — Horizon scan producing the top-ranked meeting slots
//! - [`participant`] — Participant records
//! - [`proposal`] — Proposals with scores frozen at creation
//! - [`store`] — Session-scoped participant and proposal collections
//! - [`catalog`] — Common zones and cities
//! - [`export`] — Summary text, calendar links, file names
//! - [`error`] — Error types

pub mod catalog;
pub mod error;
pub mod export;
pub mod participant;
pub mod proposal;
pub mod search;
pub mod store;
pub mod suitability;
pub mod zone;

pub use error::OverlapError;
pub use export::{download_file_name, format_duration, google_calendar_url, meeting_text};
pub use participant::{Importance, NewParticipant, Participant, ParticipantUpdate};
pub use proposal::MeetingProposal;
pub use search::{
    find_optimal_slots, find_optimal_slots_in, find_optimal_slots_with_options, DateRange,
    OptimalTimeSlot, SearchOptions, DEFAULT_HORIZON_DAYS,
};
pub use store::{ParticipantStore, ProposalStore};
pub use suitability::{score_in_zone, score_suitability, SuitabilityLevel, SuitabilityScore};
pub use zone::{
    local_date_time_string, local_time_string, parse_instant, parse_time_zone, to_local,
    LocalCivilTime,
};
