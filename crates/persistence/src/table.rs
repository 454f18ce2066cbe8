//! Table descriptions binding domain resources to PostgreSQL.

use domain::models::{
    BlogPost, ContactMessage, Event, KidsClass, KidsGalleryItem, Ministry, PrayerRequest, Sermon,
    Testimonial, Zone,
};
use domain::Resource;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::types::Json;
use sqlx::{FromRow, Postgres};

use crate::entities::{
    BlogPostEntity, ContactMessageEntity, EventEntity, KidsClassEntity, KidsGalleryItemEntity,
    MinistryEntity, PrayerRequestEntity, SermonEntity, TestimonialEntity, ZoneEntity,
};

pub type EntityQuery<'q, E> = QueryAs<'q, Postgres, E, PgArguments>;

/// How a resource is stored.
///
/// `COLUMNS` lists the writable columns in the order [`Table::bind_draft`]
/// binds them. Every table also has `id`, `created_at` and `updated_at`.
pub trait Table: Resource {
    type Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + Into<Self>;

    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// SQL predicate selecting publicly visible rows.
    const PUBLIC_FILTER: Option<&'static str> = None;

    fn bind_draft<'q>(
        query: EntityQuery<'q, Self::Entity>,
        draft: Self::Draft,
    ) -> EntityQuery<'q, Self::Entity>;
}

impl Table for Event {
    type Entity = EventEntity;

    const TABLE: &'static str = "events";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "date",
        "time",
        "location",
        "category",
        "description",
        "image_url",
        "featured",
    ];

    fn bind_draft<'q>(
        query: EntityQuery<'q, EventEntity>,
        d: Self::Draft,
    ) -> EntityQuery<'q, EventEntity> {
        query
            .bind(d.title)
            .bind(d.date)
            .bind(d.time)
            .bind(d.location)
            .bind(d.category)
            .bind(d.description)
            .bind(d.image_url)
            .bind(d.featured)
    }
}

impl Table for Sermon {
    type Entity = SermonEntity;

    const TABLE: &'static str = "sermons";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "date",
        "speaker",
        "description",
        "youtube_url",
        "youtube_id",
        "thumbnail_url",
        "featured",
    ];

    fn bind_draft<'q>(
        query: EntityQuery<'q, SermonEntity>,
        d: Self::Draft,
    ) -> EntityQuery<'q, SermonEntity> {
        query
            .bind(d.title)
            .bind(d.date)
            .bind(d.speaker)
            .bind(d.description)
            .bind(d.youtube_url)
            .bind(d.youtube_id)
            .bind(d.thumbnail_url)
            .bind(d.featured)
    }
}

impl Table for Ministry {
    type Entity = MinistryEntity;

    const TABLE: &'static str = "ministries";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "features",
        "leaders",
        "hero_title",
        "story_content",
        "image_url",
        "active",
    ];
    const PUBLIC_FILTER: Option<&'static str> = Some("active = TRUE");

    fn bind_draft<'q>(
        query: EntityQuery<'q, MinistryEntity>,
        d: Self::Draft,
    ) -> EntityQuery<'q, MinistryEntity> {
        query
            .bind(d.title)
            .bind(d.description)
            .bind(d.features)
            .bind(Json(d.leaders))
            .bind(d.hero_title)
            .bind(d.story_content)
            .bind(d.image_url)
            .bind(d.active)
    }
}

impl Table for Zone {
    type Entity = ZoneEntity;

    const TABLE: &'static str = "zones";
    const COLUMNS: &'static [&'static str] = &[
        "name", "day", "time", "location", "leader", "focus", "members", "active",
    ];
    const PUBLIC_FILTER: Option<&'static str> = Some("active = TRUE");

    fn bind_draft<'q>(
        query: EntityQuery<'q, ZoneEntity>,
        d: Self::Draft,
    ) -> EntityQuery<'q, ZoneEntity> {
        query
            .bind(d.name)
            .bind(d.day)
            .bind(d.time)
            .bind(d.location)
            .bind(d.leader)
            .bind(d.focus)
            .bind(d.members)
            .bind(d.active)
    }
}

impl Table for BlogPost {
    type Entity = BlogPostEntity;

    const TABLE: &'static str = "blog_posts";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "slug",
        "content",
        "excerpt",
        "author",
        "image_url",
        "published",
    ];
    const PUBLIC_FILTER: Option<&'static str> = Some("published = TRUE");

    fn bind_draft<'q>(
        query: EntityQuery<'q, BlogPostEntity>,
        d: Self::Draft,
    ) -> EntityQuery<'q, BlogPostEntity> {
        query
            .bind(d.title)
            .bind(d.slug)
            .bind(d.content)
            .bind(d.excerpt)
            .bind(d.author)
            .bind(d.image_url)
            .bind(d.published)
    }
}

impl Table for PrayerRequest {
    type Entity = PrayerRequestEntity;

    const TABLE: &'static str = "prayer_requests";
    const COLUMNS: &'static [&'static str] =
        &["name", "email", "request", "anonymous", "urgent", "answered"];
    const PUBLIC_FILTER: Option<&'static str> = Some("FALSE");

    fn bind_draft<'q>(
        query: EntityQuery<'q, PrayerRequestEntity>,
        d: Self::Draft,
    ) -> EntityQuery<'q, PrayerRequestEntity> {
        query
            .bind(d.name)
            .bind(d.email)
            .bind(d.request)
            .bind(d.anonymous)
            .bind(d.urgent)
            .bind(d.answered)
    }
}

impl Table for ContactMessage {
    type Entity = ContactMessageEntity;

    const TABLE: &'static str = "contact_messages";
    const COLUMNS: &'static [&'static str] = &["name", "email", "subject", "message"];
    const PUBLIC_FILTER: Option<&'static str> = Some("FALSE");

    fn bind_draft<'q>(
        query: EntityQuery<'q, ContactMessageEntity>,
        d: Self::Draft,
    ) -> EntityQuery<'q, ContactMessageEntity> {
        query
            .bind(d.name)
            .bind(d.email)
            .bind(d.subject)
            .bind(d.message)
    }
}

impl Table for Testimonial {
    type Entity = TestimonialEntity;

    const TABLE: &'static str = "testimonials";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "role",
        "content",
        "rating",
        "image_url",
        "email",
        "featured",
    ];

    fn bind_draft<'q>(
        query: EntityQuery<'q, TestimonialEntity>,
        d: Self::Draft,
    ) -> EntityQuery<'q, TestimonialEntity> {
        query
            .bind(d.name)
            .bind(d.role)
            .bind(d.content)
            .bind(d.rating)
            .bind(d.image_url)
            .bind(d.email)
            .bind(d.featured)
    }
}

impl Table for KidsClass {
    type Entity = KidsClassEntity;

    const TABLE: &'static str = "kids_classes";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "age_range",
        "description",
        "teacher",
        "schedule",
        "image_url",
        "active",
    ];
    const PUBLIC_FILTER: Option<&'static str> = Some("active = TRUE");

    fn bind_draft<'q>(
        query: EntityQuery<'q, KidsClassEntity>,
        d: Self::Draft,
    ) -> EntityQuery<'q, KidsClassEntity> {
        query
            .bind(d.name)
            .bind(d.age_range)
            .bind(d.description)
            .bind(d.teacher)
            .bind(d.schedule)
            .bind(d.image_url)
            .bind(d.active)
    }
}

impl Table for KidsGalleryItem {
    type Entity = KidsGalleryItemEntity;

    const TABLE: &'static str = "kids_gallery";
    const COLUMNS: &'static [&'static str] = &["title", "image_url", "caption", "sort_order"];

    fn bind_draft<'q>(
        query: EntityQuery<'q, KidsGalleryItemEntity>,
        d: Self::Draft,
    ) -> EntityQuery<'q, KidsGalleryItemEntity> {
        query
            .bind(d.title)
            .bind(d.image_url)
            .bind(d.caption)
            .bind(d.sort_order)
    }
}
