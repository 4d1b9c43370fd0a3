//! Camera Raw preset output.

pub mod id;
pub mod summary;
pub mod xmp;

pub use id::{FixedId, IdSource, RandomId};
pub use summary::quick_summary;
pub use xmp::{PresetDocument, serialize};
