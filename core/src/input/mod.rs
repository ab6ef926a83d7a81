//! Input collection
//!
//! Gathers indicators from manual text and uploaded files. `.json` files are
//! parsed as a single document; everything else goes through the line parser.

mod collect;

pub use collect::{collect_items, decode_bytes, InputFile};
