pub mod exam;
pub mod module;
pub mod question;
pub mod result;
pub mod user;
