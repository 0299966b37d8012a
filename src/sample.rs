//! Struct `Sample` represents a batch sample.  

// Provides attributes and feature columns.
pub(crate) mod feature;
// Provides sample struct.
pub(crate) mod sample_struct;

// Provides a struct that reads a file.
pub(crate) mod sample_reader;


pub use sample_reader::SampleReader;
pub use sample_struct::Sample;
pub use feature::{
    Attribute,
    AttributeKind,
    Feature,
    MISSING,
    is_missing,
};
