//! URL modeling: filename extraction, base-URL derivation, and safe on-disk
//! names for manifest-supplied filenames.

mod base;
mod path;
mod sanitize;

pub use base::base_url;
pub use path::filename_from_url;
pub use sanitize::sanitize_segment_filename;
