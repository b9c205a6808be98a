use crate::weekday::ScheduleDay;

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Workout {
    pub id: i64,
    pub day: String,
    pub day_order: i64,
    pub time: String,
    pub class_name: String,
    pub coach: String,
}

#[derive(Debug, Clone)]
pub struct Price {
    pub id: i64,
    pub title: String,
    pub cost: String,
    pub frequency: String,
    /// Comma separated, see [`Price::feature_list`]
    pub features: String,
    pub is_featured: bool,
}

impl Price {
    pub fn feature_list(&self) -> Vec<&str> {
        split_features(&self.features)
    }
}

pub fn split_features(features: &str) -> Vec<&str> {
    features
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

#[derive(Debug, Clone)]
pub struct Coach {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub photo_url: String,
}

// -- Insert payloads --

#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub day: ScheduleDay,
    pub time: String,
    pub class_name: String,
    pub coach: String,
}

#[derive(Debug, Clone)]
pub struct NewPrice {
    pub title: String,
    pub cost: String,
    pub frequency: String,
    pub features: String,
    pub is_featured: bool,
}

#[derive(Debug, Clone)]
pub struct NewCoach {
    pub name: String,
    pub title: String,
    pub photo_url: String,
}
