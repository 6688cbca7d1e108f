mod builder;
mod document;
mod listing;
mod output;
mod paths;
mod pipeline;
mod registry;
mod sequence;
mod source;

pub use builder::Builder;
pub use paths::base_path_from_config;
pub use registry::Redirect;
