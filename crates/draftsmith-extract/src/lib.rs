pub mod draft;
pub mod parse;
pub mod title;
pub mod tags;
pub mod extract;

pub use draft::{DraftRecord, UNTITLED_TITLE};
pub use extract::{extract_draft, derive_from_text, draft_from_value, RepairModel};
pub use parse::parse_any;
pub use tags::merge_tags;
pub use title::sanitize_title;
