pub use classroom_models::enrollments::*;
