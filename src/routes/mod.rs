pub mod students;

pub mod subjects;

pub mod system;

pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
