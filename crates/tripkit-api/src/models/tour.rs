// ── Tour records ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, Writable};
use crate::types::EntityId;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TourStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub destination_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub duration_days: u32,
    pub price: f64,
    #[serde(default)]
    pub max_participants: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub status: TourStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub start_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl Tour {
    /// The earliest departure on or after `today`.
    pub fn next_departure(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.start_dates.iter().copied().filter(|d| *d >= today).min()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDraft {
    pub title: String,
    pub destination_id: EntityId,
    #[serde(default)]
    pub description: String,
    pub duration_days: u32,
    pub price: f64,
    #[serde(default)]
    pub max_participants: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub start_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_dates: Option<Vec<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
}

impl Resource for Tour {
    const PATH: &'static str = "tours";
    const NAME: &'static str = "tour";
}

impl Writable for Tour {
    type Draft = TourDraft;
    type Patch = TourPatch;
}
