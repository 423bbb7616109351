//! Configuration module

mod site;
mod topics;

pub use site::BlogConfig;
pub use site::HighlightConfig;
pub use site::ProfileConfig;
pub use site::ProfileLink;
pub use site::SiteConfig;
pub use topics::{TopicCategory, TopicEntry, TopicSection, TopicTables};
