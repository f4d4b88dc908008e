pub mod args;
pub mod discover;
pub mod logging;
pub mod run;
