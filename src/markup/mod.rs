//! Ruby (furigana) extraction and visible-index accounting.
//!
//! Only `ruby` and `rt` carry meaning; every other `<...>` run is opaque markup that is passed
//! through and never counted as content.

pub(crate) mod ruby;
pub(crate) mod tags;
