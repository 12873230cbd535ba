//! Result types shared across the analytics pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::PeriodKey;

/// Kind of a recommendation, which drives how it is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Warning,
    Alert,
    Success,
    Info,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Alert => "alert",
            Self::Success => "success",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecommendationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Self::Warning),
            "alert" => Ok(Self::Alert),
            "success" => Ok(Self::Success),
            "info" => Ok(Self::Info),
            _ => Err(format!("Unknown recommendation kind: {}", s)),
        }
    }
}

/// Expected impact of acting on a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
    Positive,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity attached to a flagged anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    /// Unusual income month
    Medium,
    /// Unusual expense month
    High,
}

impl AnomalySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for AnomalySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What triggered a spending spike alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpikeSource {
    /// One of the most recent months exceeded the average by the spike ratio
    RecentMonths,
    /// The anomaly detector flagged an above-average expense month
    Anomaly,
}

/// Rule-specific payload of a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RecommendationDetail {
    LowSavingsRate {
        savings_rate: f64,
    },
    SpendingSpike {
        period: PeriodKey,
        amount: f64,
        average: f64,
        spike_ratio: f64,
        source: SpikeSource,
    },
    ExcellentSavingsRate {
        savings_rate: f64,
    },
    SeasonalPeak {
        period: PeriodKey,
        phase: usize,
        deviation: f64,
    },
}

/// Advisory record produced by the recommendation rules
///
/// Title, kind, impact and wording are fixed by the detail variant, so a
/// recommendation is only ever built from its detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub actionable: bool,
    pub detail: RecommendationDetail,
}

impl From<RecommendationDetail> for Recommendation {
    fn from(detail: RecommendationDetail) -> Self {
        let (kind, title, impact, actionable, description) = match &detail {
            RecommendationDetail::LowSavingsRate { savings_rate } => (
                RecommendationKind::Warning,
                "Low Savings Rate",
                Impact::High,
                true,
                format!(
                    "Your current savings rate is {:.1}%. Consider reducing expenses or increasing income.",
                    savings_rate
                ),
            ),
            RecommendationDetail::SpendingSpike {
                period,
                amount,
                average,
                spike_ratio,
                source,
            } => (
                RecommendationKind::Alert,
                "Spending Spike Detected",
                Impact::Medium,
                true,
                match source {
                    SpikeSource::RecentMonths => format!(
                        "Recent expenses are {:.0}% above average. Review recent transactions for optimization opportunities.",
                        (spike_ratio - 1.0) * 100.0
                    ),
                    SpikeSource::Anomaly => format!(
                        "Spending in {} (${:.0}) is well above your monthly average of ${:.0}. Review that month's transactions for one-off costs.",
                        period, amount, average
                    ),
                },
            ),
            RecommendationDetail::ExcellentSavingsRate { savings_rate } => (
                RecommendationKind::Success,
                "Excellent Savings Rate",
                Impact::Positive,
                true,
                format!(
                    "Your {:.1}% savings rate is excellent. Consider investing surplus funds for growth.",
                    savings_rate
                ),
            ),
            RecommendationDetail::SeasonalPeak { period, .. } => (
                RecommendationKind::Info,
                "Seasonal Spending Pattern",
                Impact::Low,
                false,
                format!(
                    "Your highest spending typically occurs in {}. Plan ahead to manage cash flow.",
                    period.month_name()
                ),
            ),
        };

        Self {
            kind,
            title: title.to_string(),
            description,
            impact,
            actionable,
            detail,
        }
    }
}
