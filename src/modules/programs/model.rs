pub use classroom_models::programs::*;
