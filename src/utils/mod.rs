pub mod extractor;
pub mod grade;
pub mod parameter_error_handler;
pub mod sql;
pub mod validate;

pub use extractor::SafeIDI64;
pub use parameter_error_handler::{
    json_config, json_error_handler, path_error_response, query_error_handler,
};
pub use sql::escape_like_pattern;
