pub mod facet;
pub mod module;
pub mod workspace;
