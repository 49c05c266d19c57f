pub mod date_format;
pub mod forms;
pub mod tabs;
pub mod test_utils;
