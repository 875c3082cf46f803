//! Energy, macronutrient and hydration targets from a biometric profile.
//!
//! - BMR: Mifflin-St Jeor
//! - TDEE: BMR scaled by the activity multiplier
//! - Macros: fixed protein per kg, a quarter of TDEE from fat, carbs fill the rest
//! - Water and salt: bodyweight and activity based guidelines
//!
//! Every function here is pure. Rounding happens once, on the final values.

use crate::{ActivityLevel, Error, EstimateResult, Profile, Result, Sex};

const PROTEIN_G_PER_KG: f64 = 1.6;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;
const FAT_SHARE_OF_TDEE: f64 = 0.25;

const WATER_L_PER_KG: f64 = 0.035;

const BASE_SALT_G: f64 = 2.3;
const SALT_STEP_KCAL: f64 = 500.0;
const SALT_PER_STEP_G: f64 = 0.5;

const MISSING_INPUT: &str = "Please enter valid numbers for age, weight, and height.";

/// Profile values that passed validation
#[derive(Clone, Copy, Debug)]
struct Biometrics {
    age: f64,
    weight: f64,
    height: f64,
    sex: Sex,
    activity: ActivityLevel,
}

impl Biometrics {
    fn from_profile(profile: &Profile) -> Result<Self> {
        let age = profile.age.filter(|a| *a > 0).map(f64::from);
        let weight = profile.weight.filter(|w| w.is_finite() && *w > 0.0);
        let height = profile.height.filter(|h| h.is_finite() && *h > 0.0);

        match (age, weight, height) {
            (Some(age), Some(weight), Some(height)) => Ok(Self {
                age,
                weight,
                height,
                sex: profile.sex,
                activity: profile.activity_level,
            }),
            _ => Err(Error::validation(MISSING_INPUT)),
        }
    }

    fn bmr(&self) -> f64 {
        let base = 10.0 * self.weight + 6.25 * self.height - 5.0 * self.age;
        match self.sex {
            Sex::Male => base + 5.0,
            Sex::Female => base - 161.0,
        }
    }

    fn tdee(&self) -> f64 {
        self.bmr() * self.activity.multiplier()
    }
}

/// Unrounded calorie split of TDEE across the three macros
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacroCalories {
    pub protein: f64,
    pub fat: f64,
    /// Whatever remains after protein and fat; negative when they exceed TDEE
    pub carbs: f64,
}

impl MacroCalories {
    pub fn total(&self) -> f64 {
        self.protein + self.fat + self.carbs
    }
}

/// Basal metabolic rate in kcal/day
pub fn bmr(profile: &Profile) -> Result<f64> {
    Ok(Biometrics::from_profile(profile)?.bmr())
}

/// Total daily energy expenditure in kcal/day
pub fn tdee(profile: &Profile) -> Result<f64> {
    Ok(Biometrics::from_profile(profile)?.tdee())
}

/// Calorie split before conversion to grams
pub fn macro_calories(profile: &Profile) -> Result<MacroCalories> {
    let bio = Biometrics::from_profile(profile)?;
    Ok(split_calories(&bio, bio.tdee()))
}

fn split_calories(bio: &Biometrics, tdee: f64) -> MacroCalories {
    let protein = bio.weight * PROTEIN_G_PER_KG * KCAL_PER_G_PROTEIN;
    let fat = tdee * FAT_SHARE_OF_TDEE;
    MacroCalories {
        protein,
        fat,
        carbs: tdee - (protein + fat),
    }
}

/// Compute the full set of daily targets for a profile
///
/// # Errors
///
/// `Error::Validation` when age, weight or height is missing, zero or not a
/// positive finite number.
pub fn estimate(profile: &Profile) -> Result<EstimateResult> {
    let bio = Biometrics::from_profile(profile)?;
    let bmr = bio.bmr();
    let tdee = bio.tdee();

    let calories = split_calories(&bio, tdee);
    let protein_grams = calories.protein / KCAL_PER_G_PROTEIN;
    let fat_grams = calories.fat / KCAL_PER_G_FAT;
    let carb_grams = calories.carbs / KCAL_PER_G_CARB;

    let water_liters = round_2dp(bio.weight * WATER_L_PER_KG);

    // Surcharge is measured against sedentary expenditure whatever the level.
    let sedentary_tdee = bmr * ActivityLevel::Sedentary.multiplier();
    let extra_salt = ((tdee - sedentary_tdee) / SALT_STEP_KCAL).max(0.0) * SALT_PER_STEP_G;
    let salt_grams = round_2dp(BASE_SALT_G + extra_salt);

    if carb_grams < 0.0 {
        tracing::debug!(
            "Protein and fat exceed TDEE ({:.1} kcal); carbohydrate target is negative",
            tdee
        );
    }

    Ok(EstimateResult {
        energy_target: round_half_up(tdee),
        protein_grams: round_half_up(protein_grams),
        fat_grams: round_half_up(fat_grams),
        carb_grams: round_half_up(carb_grams),
        water_liters,
        salt_grams,
    })
}

/// Nearest integer, halves rounded towards positive infinity
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Round to two decimal places
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
