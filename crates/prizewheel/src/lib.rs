pub mod config;
pub mod events;
pub mod form;
pub mod gui;
pub mod sys;
