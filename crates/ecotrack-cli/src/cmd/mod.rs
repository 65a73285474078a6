pub mod action;
pub mod serve;
