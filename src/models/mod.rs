pub mod script_element;
pub mod paragraph;
pub mod location;
pub mod screenplay_properties;
pub mod conf;

pub use script_element::{ScriptElement, ElementKind};
pub use paragraph::{Paragraph, ParagraphKind};
pub use location::Location;
pub use screenplay_properties::ScreenplayProperties;
pub use conf::Conf;
