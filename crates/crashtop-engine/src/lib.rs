// Engine module - the crash-report pipeline core
// Query descriptor building, RLE response decoding, regression analysis,
// and ranking. Pure functions throughout; the transport lives elsewhere.

pub mod compare;
pub mod decode;
pub mod query;
pub mod rank;
pub mod sanitize;

pub use compare::compare_windows;
pub use decode::{DecodeOptions, decode_response};
pub use query::{FOLDS, FoldSpec, QuerySpec, build_query};
pub use rank::{SortOrder, sort_and_rank};
pub use sanitize::{MAX_FRAME_LENGTH, redact_paths, sanitize_frame};
