//! Demo content generation.
//!
//! Everything here is driven by the supplied RNG, so a fixed seed reproduces
//! the same posts.

use chrono::{DateTime, Duration, Utc};
use quill_core::domain::PostStatus;
use rand::Rng;
use rand::seq::SliceRandom;

/// `(username, email, first name, last name)` of the demo authors.
pub const AUTHORS: [(&str, &str, &str, &str); 5] = [
    ("john_blogger", "john@example.com", "John", "Doe"),
    ("jane_writer", "jane@example.com", "Jane", "Smith"),
    ("mike_author", "mike@example.com", "Mike", "Johnson"),
    ("sarah_editor", "sarah@example.com", "Sarah", "Wilson"),
    ("alex_creator", "alex@example.com", "Alex", "Brown"),
];

const TITLES: &[&str] = &[
    "Getting Started with REST APIs",
    "Best Practices for Web Development",
    "Understanding Database Optimization",
    "Building Scalable Services",
    "Modern Frontend Development Techniques",
    "Containers for Backend Developers",
    "Testing Strategies for Web Applications",
    "Component Design Patterns",
    "PostgreSQL Performance Tuning Guide",
    "CI/CD Pipeline Implementation",
    "The Future of Remote Work Technology",
    "Digital Transformation in Small Business",
    "Cybersecurity Best Practices for Teams",
    "Data Privacy in the Modern Web",
    "Open Source Software Benefits",
    "Cloud Computing Cost Optimization",
    "Mobile App Development Trends",
    "Machine Learning Applications",
    "Software Architecture Principles",
    "How to Build a REST API",
    "Step-by-Step Project Setup",
    "Creating Interactive Web Forms",
    "Database Migration Best Practices",
    "Setting Up a Development Environment",
    "Git Workflow for Team Projects",
    "Debugging Production Applications",
    "Code Review Process Implementation",
    "Automated Testing Setup Guide",
    "Performance Monitoring Setup",
];

const TAGLINES: &[&str] = &[
    "Lessons Learned",
    "A Practical Approach",
    "What Nobody Tells You",
    "From Zero to Production",
    "Revisited",
    "The Hard Parts",
];

const TOPICS: &[&str] = &[
    "Incremental Delivery",
    "Observability Pipelines",
    "Schema Evolution",
    "Zero Downtime Deploys",
    "Edge Caching",
    "Event Driven Design",
    "Type Driven Development",
    "Connection Pooling",
];

const TEMPLATES: &[&str] = &[
    "Understanding {topic} has become more important than ever.\n\n\
     ## Key Benefits\n\n\
     - Improved performance and efficiency\n\
     - Better code maintainability\n\
     - Scalable architecture\n\n\
     ## Implementation Steps\n\n\
     1. **Planning**: analyse the current setup.\n\
     2. **Setup**: configure the tools you need.\n\
     3. **Testing**: test at every stage.\n\n\
     ## Conclusion\n\n\
     Mastering {topic} will make your applications *more robust*.",
    "{topic} is one of the more significant advances in recent years.\n\n\
     ## Core Concepts\n\n\
     ### Architecture\n\n\
     Modularity and reuse make applications easier to maintain.\n\n\
     ### Security\n\n\
     Security is part of the design, not an afterthought.\n\n\
     > Start small and iterate.\n\n\
     Read more on [the project site](https://example.com/{slug}).",
    "Exploring {topic} opens up new possibilities.\n\n\
     ## Why {topic} Matters\n\n\
     Adopting proven tools delivers results.\n\n\
     ## Workflow\n\n\
     ```\n\
     input -> validate -> transform -> store\n\
     ```\n\n\
     ## Troubleshooting\n\n\
     - Configuration errors: check environment variables\n\
     - Bottlenecks: profile, then optimize",
];

const EXTRA_NOTES: &str = "\n\n## Additional Notes\n\n\
    These notes were added after the first draft and may change.";

const PUBLISHED_RATIO: f64 = 0.7;
const TAGLINE_RATIO: f64 = 0.3;
const EXTRA_NOTES_RATIO: f64 = 0.3;

/// How far back creation dates reach.
pub const HISTORY_DAYS: i64 = 180;

/// One generated post, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoPost {
    /// Index into [`AUTHORS`].
    pub author: usize,
    pub title: String,
    pub body: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    /// Set for published posts; never earlier than `created_at`.
    pub published_at: Option<DateTime<Utc>>,
}

pub fn generate(rng: &mut impl Rng, now: DateTime<Utc>) -> DemoPost {
    let mut title = pick(rng, TITLES).to_string();
    if rng.gen_bool(TAGLINE_RATIO) {
        title = format!("{title} - {}", pick(rng, TAGLINES));
    }

    let topic = pick(rng, TOPICS);
    let slug_hint = topic.to_lowercase().replace(' ', "-");
    let mut body = pick(rng, TEMPLATES)
        .replace("{topic}", topic)
        .replace("{slug}", &slug_hint);
    if rng.gen_bool(EXTRA_NOTES_RATIO) {
        body.push_str(EXTRA_NOTES);
    }

    let created_at = now - Duration::seconds(rng.gen_range(0..=HISTORY_DAYS * 86_400));
    let (status, published_at) = if rng.gen_bool(PUBLISHED_RATIO) {
        let window = (now - created_at).num_seconds();
        let published = created_at + Duration::seconds(rng.gen_range(0..=window));
        (PostStatus::Published, Some(published))
    } else {
        (PostStatus::Draft, None)
    };

    DemoPost {
        author: rng.gen_range(0..AUTHORS.len()),
        title,
        body,
        status,
        created_at,
        published_at,
    }
}

fn pick<'a>(rng: &mut impl Rng, items: &'a [&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 12, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_same_seed_same_posts() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(generate(&mut a, now()), generate(&mut b, now()));
        }
    }

    #[test]
    fn test_generated_posts_are_consistent() {
        let mut rng = StdRng::seed_from_u64(42);
        let earliest = now() - Duration::days(HISTORY_DAYS);
        let posts: Vec<DemoPost> = (0..200).map(|_| generate(&mut rng, now())).collect();

        for post in &posts {
            assert!(post.author < AUTHORS.len());
            assert!(!post.title.trim().is_empty());
            assert!(!post.body.contains("{topic}"));
            assert!(post.created_at >= earliest && post.created_at <= now());
            match post.status {
                PostStatus::Published => {
                    let published = post.published_at.unwrap();
                    assert!(published >= post.created_at && published <= now());
                }
                _ => assert!(post.published_at.is_none()),
            }
        }

        let published = posts
            .iter()
            .filter(|p| p.status == PostStatus::Published)
            .count();
        assert!(published > 100 && published < 180, "published: {published}");
    }
}
