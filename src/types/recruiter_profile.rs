// src/types/recruiter_profile.rs
use serde::{Deserialize, Serialize};

use super::wire::comma_list;

pub const ROLE_OPTIONS: [&str; 3] = ["Software Engineer", "Product Manager", "Designer"];
pub const EXPERIENCE_OPTIONS: [&str; 3] = ["Entry Level", "Mid Level", "Senior"];
pub const LOCATION_OPTIONS: [&str; 3] = ["Remote", "On-site", "Hybrid"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

/// Lists in memory; comma-joined strings on the wire in both directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_id: Option<i64>,
    #[serde(with = "comma_list", default)]
    pub roles: Vec<String>,
    #[serde(with = "comma_list", default)]
    pub experience_levels: Vec<String>,
    #[serde(with = "comma_list", default)]
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceGroup {
    Roles,
    ExperienceLevels,
    Locations,
}

impl HiringPreferences {
    pub fn group_mut(&mut self, group: PreferenceGroup) -> &mut Vec<String> {
        match group {
            PreferenceGroup::Roles => &mut self.roles,
            PreferenceGroup::ExperienceLevels => &mut self.experience_levels,
            PreferenceGroup::Locations => &mut self.locations,
        }
    }

    pub fn group(&self, group: PreferenceGroup) -> &[String] {
        match group {
            PreferenceGroup::Roles => &self.roles,
            PreferenceGroup::ExperienceLevels => &self.experience_levels,
            PreferenceGroup::Locations => &self.locations,
        }
    }

    /// Add the item if absent, remove it if present. Returns the new membership.
    pub fn toggle(&mut self, group: PreferenceGroup, item: &str) -> bool {
        let items = self.group_mut(group);
        if let Some(index) = items.iter().position(|existing| existing == item) {
            items.remove(index);
            false
        } else {
            items.push(item.to_string());
            true
        }
    }

    pub fn is_selected(&self, group: PreferenceGroup, item: &str) -> bool {
        self.group(group).iter().any(|existing| existing == item)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecruiterProfile {
    pub recruiter: RecruiterInfo,
    pub company: CompanyInfo,
    pub preferences: HiringPreferences,
}
