//! Core domain types for the macro calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - The biometric profile and its enums
//! - Estimate snapshots
//! - Weight log entries
//! - Display theme

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Profile Types
// ============================================================================

/// Sex used by the Mifflin-St Jeor offset
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

/// Activity level scaling BMR into total daily expenditure
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    #[serde(alias = "very_active")]
    VeryActive,
}

impl ActivityLevel {
    /// Every level, least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// Name accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "veryActive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Lightly active",
            ActivityLevel::Moderate => "Moderately active",
            ActivityLevel::Active => "Active",
            ActivityLevel::VeryActive => "Very active",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise, desk job.",
            ActivityLevel::Light => "Light exercise or sports 1-3 days/week.",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week.",
            ActivityLevel::Active => "Hard exercise 6-7 days/week.",
            ActivityLevel::VeryActive => {
                "Very hard exercise & physical job or training twice daily."
            }
        }
    }
}

/// Biometric profile, persisted as the last-used input
///
/// Numeric fields are `None` until the user has entered them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Profile {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub sex: Sex,
    /// Body weight in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
    /// Height in centimeters
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

// ============================================================================
// Estimate Types
// ============================================================================

/// Daily targets derived from a profile
///
/// A snapshot: it reflects the profile at computation time only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EstimateResult {
    /// Total daily energy expenditure, kcal/day
    pub energy_target: i64,
    pub protein_grams: i64,
    pub fat_grams: i64,
    /// May be negative for extreme inputs; left unclamped
    pub carb_grams: i64,
    pub water_liters: f64,
    pub salt_grams: f64,
}

// ============================================================================
// Weight Log Types
// ============================================================================

/// A dated body weight observation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub date: NaiveDate,
    /// Body weight in kilograms
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One point of the weight trend
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub weight: f64,
}

// ============================================================================
// Display Types
// ============================================================================

/// Display theme, persisted as a dark-mode flag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// ANSI colours for terminal rendering
    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                accent: "\x1b[34m",
                secondary: "\x1b[90m",
                danger: "\x1b[31m",
            },
            Theme::Dark => Palette {
                accent: "\x1b[94m",
                secondary: "\x1b[37m",
                danger: "\x1b[91m",
            },
        }
    }
}

/// Terminal colour codes for one theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub accent: &'static str,
    pub secondary: &'static str,
    pub danger: &'static str,
}

impl Palette {
    pub const RESET: &'static str = "\x1b[0m";
}
