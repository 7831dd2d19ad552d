mod dashboard;
mod recommendations;
pub mod views;

pub use recommendations::{recommendation_for, PillarRecommendation};
pub use views::DiagnosisDashboard;
