use std::fmt;

use serde::{Serialize, Serializer};

/// Every weekly entry belongs to the single built-in student account.
pub const DEFAULT_USER_ID: i32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySurveyEntry {
    pub user_id: i32,
    pub study_hours: f64,
    pub sleep_hours: f64,
    pub assignments: f64,
    pub stress_level: f64,
    pub week: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BurnoutLevel {
    Low,
    Medium,
    High,
}

impl BurnoutLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BurnoutLevel::Low => "LOW",
            BurnoutLevel::Medium => "MEDIUM",
            BurnoutLevel::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StudyPressureLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl StudyPressureLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyPressureLevel::Low => "Low",
            StudyPressureLevel::Moderate => "Moderate",
            StudyPressureLevel::High => "High",
            StudyPressureLevel::VeryHigh => "Very High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeManagementLevel {
    Good,
    Unstable,
    Chaotic,
}

impl TimeManagementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeManagementLevel::Good => "Good",
            TimeManagementLevel::Unstable => "Unstable",
            TimeManagementLevel::Chaotic => "Chaotic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AcademicPressureLevel {
    Low,
    Moderate,
    High,
}

impl AcademicPressureLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcademicPressureLevel::Low => "Low",
            AcademicPressureLevel::Moderate => "Moderate",
            AcademicPressureLevel::High => "High",
        }
    }
}

macro_rules! display_via_as_str {
    ($($level:ty),+) => {
        $(impl fmt::Display for $level {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_via_as_str!(
    BurnoutLevel,
    StudyPressureLevel,
    TimeManagementLevel,
    AcademicPressureLevel
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkloadAssessment {
    #[serde(serialize_with = "serialize_score")]
    pub workload_score: f64,
    pub burnout_level: BurnoutLevel,
}

/// A classification label paired with the message shown to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment<L> {
    pub level: L,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcademicGoal {
    Consistency,
    Performance,
    Placements,
}

impl AcademicGoal {
    /// Selector values match exactly; anything else means "no academic goal".
    pub fn from_selector(value: Option<&str>) -> Option<Self> {
        match value? {
            "consistency" => Some(AcademicGoal::Consistency),
            "performance" => Some(AcademicGoal::Performance),
            "placements" => Some(AcademicGoal::Placements),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthGoal {
    Sleep,
    Stress,
    Balance,
}

impl HealthGoal {
    pub fn from_selector(value: Option<&str>) -> Option<Self> {
        match value? {
            "sleep" => Some(HealthGoal::Sleep),
            "stress" => Some(HealthGoal::Stress),
            "balance" => Some(HealthGoal::Balance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsRoadmap {
    pub academic_plan: Vec<&'static str>,
    pub health_plan: Vec<&'static str>,
    pub weekly_rule: &'static str,
}

/// Whole scores render as integers, NaN as null.
fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if score.is_finite() && score.fract() == 0.0 && score.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*score as i64)
    } else {
        serializer.serialize_f64(*score)
    }
}
