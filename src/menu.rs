use serde::Serialize;

use crate::model::{Course, WeeklyMenuDay};


#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuType {
    Day,
    #[default]
    Week,
}

impl MenuType {
    // Anything other than "day" (including garbage) selects the weekly menu.
    pub fn from_selector(value: &str) -> Self {
        if value == "day" { MenuType::Day } else { MenuType::Week }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MenuContent {
    Daily(Vec<Course>),
    Weekly(Vec<WeeklyMenuDay>),
}

impl MenuContent {
    // Structured text shown in the menu modal: pretty-printed JSON of the course or day list.
    pub fn to_display_text(&self) -> String {
        // Serializing plain strings and vectors cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
