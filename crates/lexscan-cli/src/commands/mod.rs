pub mod analyze;
pub mod extract;
pub mod prompt;
pub mod rules;
pub mod serve;
pub mod show;
