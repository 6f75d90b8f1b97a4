/// Database access layer
///
/// Repositories are free functions over `&PgPool`, one module per
/// aggregate. They return `sqlx::Error`; the service layer converts to
/// `AppError`.
pub mod category_repo;
pub mod comment_repo;
pub mod location_repo;
pub mod post_repo;
pub mod user_repo;
