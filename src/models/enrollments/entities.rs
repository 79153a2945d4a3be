use serde::{Deserialize, Serialize};

// 选课模式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentMode {
    Audit, // 旁听
    Honor, // 认证
    Beta,  // 内测
}

impl std::fmt::Display for EnrollmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentMode::Audit => write!(f, "audit"),
            EnrollmentMode::Honor => write!(f, "honor"),
            EnrollmentMode::Beta => write!(f, "beta"),
        }
    }
}

impl std::str::FromStr for EnrollmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audit" => Ok(EnrollmentMode::Audit),
            "honor" => Ok(EnrollmentMode::Honor),
            "beta" | "BETA" => Ok(EnrollmentMode::Beta),
            _ => Err(format!("Invalid enrollment mode: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub mode: EnrollmentMode,
    pub date_enrolled: chrono::DateTime<chrono::Utc>,
    pub rating: Option<f64>,
}
