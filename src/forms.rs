//! Admin form payloads, their validation, and the field list the shared
//! create-content template renders.
//!
//! Validation only checks that required fields are present after trimming
//! and that select values are one of the offered choices.

use std::collections::HashMap;

use serde::Deserialize;

use crate::db::models::{NewCoach, NewPrice, NewWorkout};
use crate::weekday::{ScheduleDay, SCHEDULE_DAYS};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";

#[derive(Debug, Default)]
pub struct FormErrors(HashMap<&'static str, &'static str>);

impl FormErrors {
    fn require<'a>(&mut self, field: &'static str, value: &'a str) -> &'a str {
        let value = value.trim();
        if value.is_empty() {
            self.0.insert(field, REQUIRED);
        }
        value
    }

    fn invalid_choice(&mut self, field: &'static str) {
        self.0.insert(field, INVALID_CHOICE);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

// -- Template view --

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    TextArea,
    Select,
}

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub error: Option<&'static str>,
    pub options: Vec<SelectOption>,
}

impl FieldView {
    fn text(name: &'static str, label: &'static str, value: &str, errors: &FormErrors) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            value: value.to_string(),
            error: errors.get(name),
            options: Vec::new(),
        }
    }

    fn textarea(name: &'static str, label: &'static str, value: &str, errors: &FormErrors) -> Self {
        Self {
            kind: FieldKind::TextArea,
            ..Self::text(name, label, value, errors)
        }
    }

    fn select(
        name: &'static str,
        label: &'static str,
        choices: &[(&str, &str)],
        value: &str,
        errors: &FormErrors,
    ) -> Self {
        let options = choices
            .iter()
            .map(|(option, text)| SelectOption {
                value: option.to_string(),
                label: text.to_string(),
                selected: *option == value,
            })
            .collect();
        Self {
            kind: FieldKind::Select,
            options,
            ..Self::text(name, label, value, errors)
        }
    }

    pub fn is_select(&self) -> bool {
        self.kind == FieldKind::Select
    }

    pub fn is_textarea(&self) -> bool {
        self.kind == FieldKind::TextArea
    }

    pub fn input_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Password => "password",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormView {
    pub heading: &'static str,
    pub action: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FieldView>,
}

/// A create form for one content table.
pub trait ContentForm: Default {
    type Record;

    fn validate(&self) -> Result<Self::Record, FormErrors>;

    fn view(&self, errors: &FormErrors) -> FormView;
}

// -- Workout --

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WorkoutForm {
    pub day: String,
    pub time: String,
    pub class_name: String,
    pub coach: String,
}

impl ContentForm for WorkoutForm {
    type Record = NewWorkout;

    fn validate(&self) -> Result<NewWorkout, FormErrors> {
        let mut errors = FormErrors::default();
        let day = ScheduleDay::from_code(&self.day);
        if day.is_none() {
            errors.invalid_choice("day");
        }
        let time = errors.require("time", &self.time);
        let class_name = errors.require("class_name", &self.class_name);
        let coach = errors.require("coach", &self.coach);

        errors.into_result(|| NewWorkout {
            day: day.unwrap_or(SCHEDULE_DAYS[0]),
            time: time.to_string(),
            class_name: class_name.to_string(),
            coach: coach.to_string(),
        })
    }

    fn view(&self, errors: &FormErrors) -> FormView {
        let days: Vec<(&str, &str)> = SCHEDULE_DAYS.iter().map(|d| (d.code, d.label)).collect();
        let selected = if self.day.is_empty() { "1" } else { self.day.as_str() };
        FormView {
            heading: "ADD CLASS",
            action: "/admin/workout/new",
            submit_label: "Save Class",
            fields: vec![
                FieldView::select("day", "Day", &days, selected, errors),
                FieldView::text("time", "Time (e.g. 19:00)", &self.time, errors),
                FieldView::text("class_name", "Class Name", &self.class_name, errors),
                FieldView::text("coach", "Coach Name", &self.coach, errors),
            ],
        }
    }
}

// -- Price --

const FEATURED_CHOICES: &[(&str, &str)] = &[("0", "No"), ("1", "Yes")];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PriceForm {
    pub title: String,
    pub cost: String,
    pub frequency: String,
    pub features: String,
    pub is_featured: String,
}

impl ContentForm for PriceForm {
    type Record = NewPrice;

    fn validate(&self) -> Result<NewPrice, FormErrors> {
        let mut errors = FormErrors::default();
        let title = errors.require("title", &self.title);
        let cost = errors.require("cost", &self.cost);
        let frequency = errors.require("frequency", &self.frequency);
        let features = errors.require("features", &self.features);
        let is_featured = match self.is_featured.trim() {
            "" | "0" => false,
            "1" => true,
            _ => {
                errors.invalid_choice("is_featured");
                false
            }
        };

        errors.into_result(|| NewPrice {
            title: title.to_string(),
            cost: cost.to_string(),
            frequency: frequency.to_string(),
            features: features.to_string(),
            is_featured,
        })
    }

    fn view(&self, errors: &FormErrors) -> FormView {
        let featured = if self.is_featured.is_empty() { "0" } else { self.is_featured.as_str() };
        FormView {
            heading: "ADD PRICE",
            action: "/admin/price/new",
            submit_label: "Save Plan",
            fields: vec![
                FieldView::text("title", "Plan Title", &self.title, errors),
                FieldView::text("cost", "Cost (e.g. 150 GEL)", &self.cost, errors),
                FieldView::text("frequency", "Frequency (e.g. / Month)", &self.frequency, errors),
                FieldView::textarea(
                    "features",
                    "Features (comma separated)",
                    &self.features,
                    errors,
                ),
                FieldView::select("is_featured", "Highlight?", FEATURED_CHOICES, featured, errors),
            ],
        }
    }
}

// -- Coach --

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CoachForm {
    pub name: String,
    pub title: String,
    pub photo_url: String,
}

impl ContentForm for CoachForm {
    type Record = NewCoach;

    fn validate(&self) -> Result<NewCoach, FormErrors> {
        let mut errors = FormErrors::default();
        let name = errors.require("name", &self.name);
        let title = errors.require("title", &self.title);
        let photo_url = errors.require("photo_url", &self.photo_url);

        errors.into_result(|| NewCoach {
            name: name.to_string(),
            title: title.to_string(),
            photo_url: photo_url.to_string(),
        })
    }

    fn view(&self, errors: &FormErrors) -> FormView {
        FormView {
            heading: "ADD COACH",
            action: "/admin/coach/new",
            submit_label: "Save Coach",
            fields: vec![
                FieldView::text("name", "Coach Name", &self.name, errors),
                FieldView::text("title", "Title", &self.title, errors),
                FieldView::text("photo_url", "Photo URL", &self.photo_url, errors),
            ],
        }
    }
}

// -- Login --

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

impl LoginForm {
    /// Trimmed username and the raw password, or the missing fields.
    pub fn credentials(&self) -> Result<(&str, &str), FormErrors> {
        let mut errors = FormErrors::default();
        let username = errors.require("username", &self.username);
        if self.password.is_empty() {
            errors.0.insert("password", REQUIRED);
        }
        errors.into_result(|| (username, self.password.as_str()))
    }

    pub fn fields(&self, errors: &FormErrors) -> Vec<FieldView> {
        vec![
            FieldView::text("username", "Username", &self.username, errors),
            FieldView {
                kind: FieldKind::Password,
                ..FieldView::text("password", "Password", "", errors)
            },
        ]
    }
}
