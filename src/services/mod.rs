pub mod students;
pub mod subjects;
pub mod system;

pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
