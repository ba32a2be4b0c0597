//! Fine policies: daily penalty rate and borrow period per material type

use rust_decimal::Decimal;
use serde::Serialize;

use super::enums::MaterialType;
use crate::error::{AppError, AppResult};

/// Standard policy table: (material, daily rate, borrow period in days)
const STANDARD_POLICIES: [(MaterialType, i64, i64); 3] = [
    (MaterialType::Book, 10, 28),
    (MaterialType::Cd, 20, 7),
    (MaterialType::Journal, 15, 21),
];

/// Validated rate/period pair shared by every fine strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinePolicy {
    daily_rate: Decimal,
    borrow_period_days: u32,
}

impl FinePolicy {
    /// Build a policy, rejecting a missing or negative rate and a non-positive period
    pub fn new(daily_rate: Option<Decimal>, borrow_period_days: i64) -> AppResult<Self> {
        let daily_rate = daily_rate
            .ok_or_else(|| AppError::Validation("daily rate is required".to_string()))?;
        if daily_rate < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "daily rate must not be negative (got {})",
                daily_rate
            )));
        }
        if borrow_period_days <= 0 {
            return Err(AppError::Validation(format!(
                "borrow period must be at least one day (got {})",
                borrow_period_days
            )));
        }
        let borrow_period_days = u32::try_from(borrow_period_days).map_err(|_| {
            AppError::Validation(format!("borrow period {} is too large", borrow_period_days))
        })?;

        Ok(Self {
            daily_rate,
            borrow_period_days,
        })
    }

    pub fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    pub fn borrow_period_days(&self) -> u32 {
        self.borrow_period_days
    }

    /// Fine for the given number of overdue days. Zero or negative days cost nothing.
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn calculate_fine(&self, overdue_days: i64) -> Decimal {
        if overdue_days <= 0 {
            return Decimal::ZERO;
        }
        self.daily_rate.saturating_mul(Decimal::from(overdue_days))
    }
}

/// Fine strategy bound to one material type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FineStrategy {
    material_type: MaterialType,
    policy: FinePolicy,
}

impl FineStrategy {
    /// Strategy from the standard policy table
    pub fn for_material(material_type: MaterialType) -> AppResult<Self> {
        let (_, rate, period) = STANDARD_POLICIES
            .iter()
            .find(|(m, _, _)| *m == material_type)
            .ok_or_else(|| {
                AppError::Configuration(format!("no fine policy for material type {}", material_type))
            })?;

        Ok(Self {
            material_type,
            policy: FinePolicy::new(Some(Decimal::from(*rate)), *period)?,
        })
    }

    /// Strategy for a material type given by name (e.g. read from a data file)
    pub fn from_name(name: &str) -> AppResult<Self> {
        Self::for_material(name.parse()?)
    }

    /// Strategy with an explicit policy, for libraries running non-standard rates
    pub fn with_policy(material_type: MaterialType, policy: FinePolicy) -> Self {
        Self {
            material_type,
            policy,
        }
    }

    pub fn material_type(&self) -> MaterialType {
        self.material_type
    }

    pub fn policy(&self) -> &FinePolicy {
        &self.policy
    }

    pub fn daily_rate(&self) -> Decimal {
        self.policy.daily_rate()
    }

    pub fn borrow_period_days(&self) -> u32 {
        self.policy.borrow_period_days()
    }

    pub fn calculate_fine(&self, overdue_days: i64) -> Decimal {
        self.policy.calculate_fine(overdue_days)
    }
}
