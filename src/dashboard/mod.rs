//! Server-rendered browsing page for the article collection.

pub mod render;
pub mod view;

pub use render::{StandingsPanel, escape_html, render_dashboard};
pub use view::{Carousel, DashboardQuery, carousel, filter_articles};
