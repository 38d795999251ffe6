//! Calendar event model, date normalization and presentation.
//!
//! Everything here except [`service`] is pure: no I/O and no shared state.

pub mod gateway;
pub mod models;
pub mod normalize;
pub mod present;
pub mod service;
pub mod time;

pub use gateway::{CalendarGateway, ListQuery};
pub use models::{
    DateRange, EventRecord, EventTimePayload, ExternalEventPayload, DEFAULT_EVENT_COLOR,
    UNTITLED_EVENT,
};
pub use normalize::{build_insert_payload, parse_external_event};
pub use present::{format_for_grid, format_for_list, CaptionKind, DisplayGroup, GridEvent};
