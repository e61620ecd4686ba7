pub mod app_loop;
pub mod frame_input;
pub mod library_file;
pub mod render;
pub mod seed;
pub mod window_config;

pub const APP_NAME: &str = "Athenaeum";
