//! The catalogs the bot ships with

use gembot_types::CatalogEntry;

/// Activities that earn gems, in display order
pub fn useful_activities() -> Vec<CatalogEntry> {
    vec![
        // Self-development
        CatalogEntry::new("yoga", "Yoga (15 minutes)", 1),
        CatalogEntry::new("meditation", "Meditation (15 minutes)", 1),
        CatalogEntry::new("language", "Learning a foreign language (15 minutes)", 1),
        CatalogEntry::new("swimming", "Swimming (15 minutes)", 1),
        CatalogEntry::new("walk", "Walk (15 minutes)", 1),
        CatalogEntry::new("chores", "Chores", 1),
        // Work
        CatalogEntry::new("work_learning", "Studying work materials (15 minutes)", 1),
        CatalogEntry::new("portfolio_work", "Working on a portfolio project (15 minutes)", 1),
        CatalogEntry::new("resume_edit", "Resume editing (15 minutes)", 1),
        // Creativity
        CatalogEntry::new("creative", "Creative creation (15 minutes)", 1),
        CatalogEntry::new("reading", "Reading fiction literature (15 minutes)", 1),
    ]
}

/// Rewards that cost gems, in display order
pub fn rewards() -> Vec<CatalogEntry> {
    vec![
        // Entertainment
        CatalogEntry::new("watch_series", "Watching a series (1 episode)", 10),
        CatalogEntry::new("watch_movie", "Watching a movie (1 item)", 30),
        CatalogEntry::new("social_nets", "Browsing social networks (30 minutes)", 10),
        // Food
        CatalogEntry::new("eat_sweets", "300 kcal of sweets", 60),
    ]
}
