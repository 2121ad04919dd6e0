//! Row, result and log-item models

pub mod diff_results;
pub mod log_item;
pub mod result_set;
pub mod row;

pub use diff_results::DiffResults;
pub use log_item::LogItem;
pub use result_set::ResultSet;
pub use row::{
    deserialize_query_data_json, query_data_from_json, query_data_to_json,
    serialize_query_data_json, ColumnValue, QueryData, Row, RowTyped,
};
