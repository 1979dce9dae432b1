pub mod command;
pub mod document;
pub mod render;
pub mod romaji;
pub mod settings;
pub mod storage;
pub mod unicode;
