use std::fmt;

use serde::{Deserialize, Serialize};

pub const HW_TOTAL_HRS: i32 = 3;
pub const HW_HRS_PER_DAY: i32 = 1;
pub const QUIZ_TOTAL_HRS: i32 = 5;
pub const QUIZ_HRS_PER_DAY: i32 = 1;
pub const TEST_TOTAL_HRS: i32 = 10;
pub const TEST_HRS_PER_DAY: i32 = 3;
pub const CW_TOTAL_HRS: i32 = 4;
pub const CW_HRS_PER_DAY: i32 = 1;
pub const LAB_TOTAL_HRS: i32 = 5;
pub const LAB_HRS_PER_DAY: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Homework,
    Quiz,
    Test,
    Classwork,
    Lab,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Homework => "homework",
            Category::Quiz => "quiz",
            Category::Test => "test",
            Category::Classwork => "classwork",
            Category::Lab => "lab",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "homework" => Some(Category::Homework),
            "quiz" => Some(Category::Quiz),
            "test" => Some(Category::Test),
            "classwork" => Some(Category::Classwork),
            "lab" => Some(Category::Lab),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected effort for one deadline: total hours and the pace in hours per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hours {
    pub total: i32,
    pub per_day: i32,
}

impl Hours {
    pub const fn new(total: i32, per_day: i32) -> Self {
        Self { total, per_day }
    }

    /// Whole days needed to finish at this pace, rounded up.
    pub fn days_needed(&self) -> i64 {
        let total = i64::from(self.total);
        let per_day = i64::from(self.per_day.max(1));
        (total + per_day - 1).div_euclid(per_day)
    }
}

/// Per-course workload defaults, stored under `assignmentTimeTaken`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkloadProfile {
    pub hw_total_hrs: i32,
    pub hw_hrs_per_day: i32,
    pub quiz_total_hrs: i32,
    pub quiz_hrs_per_day: i32,
    pub test_total_hrs: i32,
    pub test_hrs_per_day: i32,
    pub cw_total_hrs: i32,
    pub cw_hrs_per_day: i32,
    pub lab_total_hrs: i32,
    pub lab_hrs_per_day: i32,
}

impl Default for WorkloadProfile {
    fn default() -> Self {
        Self {
            hw_total_hrs: HW_TOTAL_HRS,
            hw_hrs_per_day: HW_HRS_PER_DAY,
            quiz_total_hrs: QUIZ_TOTAL_HRS,
            quiz_hrs_per_day: QUIZ_HRS_PER_DAY,
            test_total_hrs: TEST_TOTAL_HRS,
            test_hrs_per_day: TEST_HRS_PER_DAY,
            cw_total_hrs: CW_TOTAL_HRS,
            cw_hrs_per_day: CW_HRS_PER_DAY,
            lab_total_hrs: LAB_TOTAL_HRS,
            lab_hrs_per_day: LAB_HRS_PER_DAY,
        }
    }
}

impl WorkloadProfile {
    pub fn get(&self, category: Category) -> Hours {
        match category {
            Category::Homework => Hours::new(self.hw_total_hrs, self.hw_hrs_per_day),
            Category::Quiz => Hours::new(self.quiz_total_hrs, self.quiz_hrs_per_day),
            Category::Test => Hours::new(self.test_total_hrs, self.test_hrs_per_day),
            Category::Classwork => Hours::new(self.cw_total_hrs, self.cw_hrs_per_day),
            Category::Lab => Hours::new(self.lab_total_hrs, self.lab_hrs_per_day),
        }
    }

    /// Hours for a possibly unclassified deadline; unclassified falls back to homework.
    pub fn hours_for(&self, category: Option<Category>) -> Hours {
        self.get(category.unwrap_or(Category::Homework))
    }

    pub fn set(&mut self, category: Category, hours: Hours) {
        let (total, per_day) = match category {
            Category::Homework => (&mut self.hw_total_hrs, &mut self.hw_hrs_per_day),
            Category::Quiz => (&mut self.quiz_total_hrs, &mut self.quiz_hrs_per_day),
            Category::Test => (&mut self.test_total_hrs, &mut self.test_hrs_per_day),
            Category::Classwork => (&mut self.cw_total_hrs, &mut self.cw_hrs_per_day),
            Category::Lab => (&mut self.lab_total_hrs, &mut self.lab_hrs_per_day),
        };
        *total = hours.total;
        *per_day = hours.per_day;
    }
}
