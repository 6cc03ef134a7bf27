pub mod fdx_parser;
pub mod properties;

pub use fdx_parser::FdxParser;
pub use fdx_parser::{ParseOutput, ParseFailure, ParseWarning, WarningKind, Classified, classify_paragraph};
pub use properties::{parse_location, record_element};
