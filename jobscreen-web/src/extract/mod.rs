//! Text feature extraction
//!
//! Two independent single-pass transforms over the raw posting text:
//! - [`fields`]: display fields (title, location, contacts, links, word count)
//! - [`meta`]: keyword-derived meta features and their numeric encoding

pub mod fields;
pub mod meta;

pub use fields::{extract_fields, ExtractedFields};
pub use meta::{derive_meta_features, encode_meta, MetaFeatures, MetaVector, META_VECTOR_LEN};
