pub mod explorer;
pub mod matcher;

pub use explorer::DirectoryExplorer;
pub use matcher::IncludeMatcher;
