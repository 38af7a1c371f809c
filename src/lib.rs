pub mod api;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod ffmpeg;
pub mod init;
pub mod pipeline;
pub mod subtitle;
pub mod tts;
