pub mod environment;
pub mod logging;
pub mod paths;
pub mod terminal;

pub use environment::{DATA_DIR_ENV, get_data_dir};
pub use logging::{LogTarget, init_logging};
pub use paths::{format_path_with_tilde, read_source, validate_file_size};
pub use terminal::sanitize_remote_text;
