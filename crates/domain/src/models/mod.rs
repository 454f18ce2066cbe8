//! Content models for the church site.

pub mod admin_user;
pub mod blog_post;
pub mod contact_message;
pub mod event;
pub mod kids_class;
pub mod kids_gallery;
pub mod ministry;
pub mod prayer_request;
pub mod sermon;
pub mod setting;
pub mod testimonial;
pub mod zone;

pub use admin_user::{AdminProfile, AdminUser};
pub use blog_post::{BlogPost, BlogPostDraft};
pub use contact_message::{ContactMessage, ContactMessageDraft};
pub use event::{Event, EventDraft};
pub use kids_class::{KidsClass, KidsClassDraft};
pub use kids_gallery::{KidsGalleryItem, KidsGalleryItemDraft};
pub use ministry::{Leader, Ministry, MinistryDraft};
pub use prayer_request::{PrayerRequest, PrayerRequestDraft};
pub use sermon::{Sermon, SermonDraft};
pub use setting::{Setting, SettingError, SettingKey};
pub use testimonial::{Testimonial, TestimonialDraft};
pub use zone::{Zone, ZoneDraft};
