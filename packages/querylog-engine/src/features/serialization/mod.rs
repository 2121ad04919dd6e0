//! Serialization Layer
//!
//! Two renderings of a [`LogItem`](crate::shared::models::LogItem), both
//! emitted previous-epoch leftovers first:
//!
//! - legacy: one document per pass with `diffResults` or `snapshot`
//! - events: one document per row with `columns` and `action`
//!
//! Render switches come in as [`RenderOptions`](crate::config::RenderOptions).

mod deserialize;
mod events;
mod fields;
mod legacy;

pub use deserialize::{
    deserialize_diff_results, deserialize_query_log_item, deserialize_query_log_item_json,
};
pub use events::{serialize_query_log_item_as_events, serialize_query_log_item_as_events_json};
pub use fields::{serialize_diff_results, serialize_row};
pub use legacy::{serialize_query_log_item, serialize_query_log_item_json};
