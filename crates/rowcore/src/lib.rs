pub mod document;
pub mod row;

pub use document::Document;
pub use row::{Row, TAB_STOP};
