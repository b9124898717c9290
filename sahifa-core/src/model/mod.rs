//! Domain model for the content site.
//!
//! Everything durable lives in one versioned [`Aggregate`]; users, posts,
//! polls, newsletter subscribers, and ratings are plain serde types with
//! camelCase wire names so the persisted JSON matches the request surface.

mod aggregate;
mod poll;
mod post;
mod seed;
mod types;
mod user;

pub use aggregate::{Aggregate, DATA_VERSION};
pub use poll::{Poll, PollOption};
pub use post::{Post, RatingEntry};
pub use seed::seed;
pub use types::{PollId, PostId, PostStatus, Role, UserId};
pub use user::{PublicUser, User};
