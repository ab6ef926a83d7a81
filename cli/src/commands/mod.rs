pub mod cli;
pub mod feed;
pub mod input;
pub mod submit;
