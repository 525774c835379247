//! Diet plans and their per-meal-time preparation state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patient::PatientSummary;

/// One of the three daily meal slots.
///
/// Variants are declared in serving order, so `Ord` sorts chronologically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealTime {
    Morning,
    Evening,
    Night,
}

impl MealTime {
    /// All slots in serving order.
    pub const ALL: [MealTime; 3] = [MealTime::Morning, MealTime::Evening, MealTime::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealTime::Morning => "morning",
            MealTime::Evening => "evening",
            MealTime::Night => "night",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(MealTime::Morning),
            "evening" => Some(MealTime::Evening),
            "night" => Some(MealTime::Night),
            _ => None,
        }
    }
}

impl std::fmt::Display for MealTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preparation status of a single meal slot.
///
/// Transitions between these are not restricted; pantry staff may move a
/// slot in any direction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealStatus {
    #[default]
    Pending,
    Preparing,
    Delivered,
}

impl MealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealStatus::Pending => "pending",
            MealStatus::Preparing => "preparing",
            MealStatus::Delivered => "delivered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(MealStatus::Pending),
            "preparing" => Some(MealStatus::Preparing),
            "delivered" => Some(MealStatus::Delivered),
            _ => None,
        }
    }
}

impl std::fmt::Display for MealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dish in a meal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MealItem {
    pub name: String,
    pub ingredients: Vec<String>,
    pub special_instructions: Vec<String>,
}

/// One meal slot: ordered items plus preparation status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub items: Vec<MealItem>,
    pub status: MealStatus,
}

impl Meal {
    pub fn new(items: Vec<MealItem>) -> Self {
        Self {
            items,
            status: MealStatus::Pending,
        }
    }
}

/// The three slots of a day. Every diet carries all of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Meals {
    pub morning: Meal,
    pub evening: Meal,
    pub night: Meal,
}

impl Meals {
    pub fn get(&self, meal_time: MealTime) -> &Meal {
        match meal_time {
            MealTime::Morning => &self.morning,
            MealTime::Evening => &self.evening,
            MealTime::Night => &self.night,
        }
    }

    pub fn get_mut(&mut self, meal_time: MealTime) -> &mut Meal {
        match meal_time {
            MealTime::Morning => &mut self.morning,
            MealTime::Evening => &mut self.evening,
            MealTime::Night => &mut self.night,
        }
    }

    /// Slots paired with their meal time, in serving order.
    pub fn iter(&self) -> impl Iterator<Item = (MealTime, &Meal)> {
        MealTime::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

/// A patient's meal plan for one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diet {
    /// Local UUID
    pub diet_id: String,
    /// Patient local ID
    pub patient_id: String,
    /// Calendar day the plan covers
    pub date: NaiveDate,
    pub meals: Meals,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Diet creation input. Any status carried in `meals` is discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDiet {
    pub patient_id: String,
    pub date: NaiveDate,
    pub meals: Meals,
}

impl Diet {
    /// Build a diet from creation input with every slot reset to pending.
    pub fn new(input: NewDiet) -> Self {
        let now = super::now_timestamp();
        let NewDiet {
            patient_id,
            date,
            meals,
        } = input;
        Self {
            diet_id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            date,
            meals: Meals {
                morning: Meal::new(meals.morning.items),
                evening: Meal::new(meals.evening.items),
                night: Meal::new(meals.night.items),
            },
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn meal_status(&self, meal_time: MealTime) -> MealStatus {
        self.meals.get(meal_time).status
    }

    /// True if any slot has not started preparation.
    pub fn has_pending_meal(&self) -> bool {
        self.meals
            .iter()
            .any(|(_, meal)| meal.status == MealStatus::Pending)
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = super::now_timestamp();
    }
}

/// A diet as listed on the pantry board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPreparation {
    pub diet: Diet,
    pub patient: PatientSummary,
}
