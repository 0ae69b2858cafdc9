//! AUDIT-C screening: three answers, each mapped on a fixed ordinal scale.

use crate::core::entry::InputError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Answer to "how often do you have a drink" and "how often do you have six
/// or more drinks on one occasion". The scale skips 3 on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frequency {
    Never,
    Monthly,
    Weekly,
    Daily,
}

impl Frequency {
    pub fn points(self) -> u8 {
        match self {
            Self::Never => 0,
            Self::Monthly => 1,
            Self::Weekly => 2,
            Self::Daily => 4,
        }
    }
}

impl FromStr for Frequency {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "monthly" => Ok(Self::Monthly),
            "weekly" => Ok(Self::Weekly),
            "daily" => Ok(Self::Daily),
            _ => Err(InputError::UnknownAnswer {
                question: "frequency",
                answer: s.to_string(),
                expected: "Never, Monthly, Weekly, Daily",
            }),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "Never"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Daily => write!(f, "Daily"),
        }
    }
}

/// Answer to "how many drinks on a typical drinking day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Quantity {
    #[serde(rename = "1–2")]
    OneToTwo,
    #[serde(rename = "3–4")]
    ThreeToFour,
    #[serde(rename = "5–6")]
    FiveToSix,
    #[serde(rename = "7+")]
    SevenPlus,
}

impl Quantity {
    pub fn points(self) -> u8 {
        match self {
            Self::OneToTwo => 0,
            Self::ThreeToFour => 1,
            Self::FiveToSix => 2,
            Self::SevenPlus => 3,
        }
    }
}

impl FromStr for Quantity {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // en dash in the questionnaire, plain hyphen from a keyboard
        match s.trim().replace('–', "-").as_str() {
            "1-2" => Ok(Self::OneToTwo),
            "3-4" => Ok(Self::ThreeToFour),
            "5-6" => Ok(Self::FiveToSix),
            "7+" => Ok(Self::SevenPlus),
            _ => Err(InputError::UnknownAnswer {
                question: "quantity",
                answer: s.to_string(),
                expected: "1–2, 3–4, 5–6, 7+",
            }),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneToTwo => write!(f, "1–2"),
            Self::ThreeToFour => write!(f, "3–4"),
            Self::FiveToSix => write!(f, "5–6"),
            Self::SevenPlus => write!(f, "7+"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    Low,
    Increasing,
    High,
}

impl RiskTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => Self::Low,
            4..=7 => Self::Increasing,
            _ => Self::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low risk",
            Self::Increasing => "Increasing risk",
            Self::High => "High risk",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditAnswers {
    pub frequency: Frequency,
    pub quantity: Quantity,
    pub six_plus_frequency: Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuditResult {
    pub score: u8,
    pub tier: RiskTier,
}

pub fn audit_c_score(frequency: Frequency, quantity: Quantity, six_plus: Frequency) -> u8 {
    frequency.points() + quantity.points() + six_plus.points()
}

pub fn screen(answers: AuditAnswers) -> AuditResult {
    let score = audit_c_score(
        answers.frequency,
        answers.quantity,
        answers.six_plus_frequency,
    );
    AuditResult {
        score,
        tier: RiskTier::from_score(score),
    }
}
