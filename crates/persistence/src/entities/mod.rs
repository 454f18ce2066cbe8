//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod admin_user;
pub mod blog_post;
pub mod contact_message;
pub mod event;
pub mod kids;
pub mod ministry;
pub mod prayer_request;
pub mod sermon;
pub mod setting;
pub mod testimonial;
pub mod zone;

pub use admin_user::AdminUserEntity;
pub use blog_post::BlogPostEntity;
pub use contact_message::ContactMessageEntity;
pub use event::EventEntity;
pub use kids::{KidsClassEntity, KidsGalleryItemEntity};
pub use ministry::MinistryEntity;
pub use prayer_request::PrayerRequestEntity;
pub use sermon::SermonEntity;
pub use setting::SettingEntity;
pub use testimonial::TestimonialEntity;
pub use zone::ZoneEntity;
