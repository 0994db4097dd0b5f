//! Request extractors and access policies.
//!
//! - [`auth`]: bearer-token validation and the [`auth::Actor`] extractor
//! - [`policy`]: collection and object level permission checks
//!
//! # Request flow
//!
//! 1. `Actor` validates the JWT and loads the account, its student profile
//!    and enrolled sections.
//! 2. The handler calls [`policy::authorize`], looks the target up within
//!    [`auth::Actor::scope`] and calls [`policy::authorize_object`].
//!
//! ```ignore
//! async fn get_section(actor: Actor, ...) -> Result<Json<Section>, AppError> {
//!     authorize::<Section, _>(&EnrolledStudentOrAdmin, &actor, Operation::Read)?;
//!     let section = SectionService::get(&db, actor.scope(), id).await?;
//!     authorize_object(&EnrolledStudentOrAdmin, &actor, Operation::Read, &section)?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod policy;
