pub use classroom_models::sections::*;
