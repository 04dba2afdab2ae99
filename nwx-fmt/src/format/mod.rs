//! Field formatters
//!
//! Pure functions turning item values into wire field text. Lookup tables
//! (place names, wire-service credits, ranking labels, ordinal suffixes) live
//! next to the formatter that uses them.

pub mod codes;
pub mod credit;
pub mod dateline;
pub mod datetime;
pub mod ordinal;
pub mod ranking;
pub mod text;

pub use codes::{dedup_filter, filter_indexes, join_keywords};
pub use credit::format_credit;
pub use dateline::{format_dateline, FormattedDateline};
pub use datetime::{format_relative, format_timestamp_field};
pub use ordinal::{ordinal, ordinal_for, WritethruKind};
pub use ranking::{effective_urgency, ranking_label};
pub use text::{html_to_text, truncate_at_word_boundary};
