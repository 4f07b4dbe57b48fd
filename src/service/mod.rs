pub mod catalog;
pub mod data_manager;
pub mod download;
pub mod gameapi;
pub mod preview;
pub mod reveal;
