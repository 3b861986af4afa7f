// ==========================================
// 纺织原料采购计划系统 - 供应风险分级
// ==========================================
// 依据: DESIGN.md - 风险分级
// ==========================================
// reliability >= 0.85 -> low
// 0.70 <= reliability < 0.85 -> medium
// reliability < 0.70 -> high
// 阈值可配置; 拆单时取各供应商最差等级
// ==========================================

use crate::config::planning_config::RiskThresholds;
use crate::domain::types::RiskFlag;

pub struct RiskClassifier {
    thresholds: RiskThresholds,
}

impl RiskClassifier {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// 按可靠性评分分级
    pub fn classify(&self, reliability: f64) -> RiskFlag {
        if !reliability.is_finite() {
            return RiskFlag::High;
        }
        if reliability >= self.thresholds.low_min_reliability {
            RiskFlag::Low
        } else if reliability >= self.thresholds.medium_min_reliability {
            RiskFlag::Medium
        } else {
            RiskFlag::High
        }
    }

    /// 多个等级取最差（空集合视为高风险）
    pub fn worst<I>(&self, flags: I) -> RiskFlag
    where
        I: IntoIterator<Item = RiskFlag>,
    {
        flags.into_iter().max().unwrap_or(RiskFlag::High)
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new(RiskThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_inclusive() {
        let classifier = RiskClassifier::default();
        assert_eq!(classifier.classify(0.85), RiskFlag::Low);
        assert_eq!(classifier.classify(0.8499), RiskFlag::Medium);
        assert_eq!(classifier.classify(0.7), RiskFlag::Medium);
        assert_eq!(classifier.classify(0.6999), RiskFlag::High);
        assert_eq!(classifier.classify(f64::NAN), RiskFlag::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = RiskClassifier::new(RiskThresholds {
            low_min_reliability: 0.95,
            medium_min_reliability: 0.8,
        });
        assert_eq!(classifier.classify(0.9), RiskFlag::Medium);
    }

    #[test]
    fn test_worst() {
        let classifier = RiskClassifier::default();
        assert_eq!(
            classifier.worst([RiskFlag::Low, RiskFlag::Medium]),
            RiskFlag::Medium
        );
        assert_eq!(classifier.worst(Vec::new()), RiskFlag::High);
    }
}
