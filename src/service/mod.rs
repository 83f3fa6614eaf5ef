//! BlogService: resolver semantics over a shared repository.

mod blog;
pub use blog::BlogService;
