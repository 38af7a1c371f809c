pub mod deepseek;
pub mod pexels;
