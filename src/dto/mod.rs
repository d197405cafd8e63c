pub mod admin_dto;
pub mod auth_dto;
pub mod lecturer_dto;
pub mod student_dto;
