use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Outcome of the therapy goal as submitted by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    #[serde(rename = "erreicht")]
    Erreicht,
    #[serde(rename = "nicht-erreicht")]
    NichtErreicht,
}

impl GoalStatus {
    /// Wire/template value, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Erreicht => "erreicht",
            GoalStatus::NichtErreicht => "nicht-erreicht",
        }
    }

    /// Human-readable label used in prompts and reports.
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::Erreicht => "Ziel erreicht",
            GoalStatus::NichtErreicht => "Ziel nicht erreicht",
        }
    }

    /// Traffic-light marker shown next to the label.
    pub fn traffic_light(&self) -> &'static str {
        match self {
            GoalStatus::Erreicht => "🟢",
            GoalStatus::NichtErreicht => "🔴",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compliance {
    Ja,
    Nein,
}

impl Compliance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Compliance::Ja => "ja",
            Compliance::Nein => "nein",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Compliance::Ja => "Ja",
            Compliance::Nein => "Nein",
        }
    }

    pub fn traffic_light(&self) -> &'static str {
        match self {
            Compliance::Ja => "🟢",
            Compliance::Nein => "🔴",
        }
    }
}

/// One submitted therapy session outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    /// Session time, `HH:MM`.
    pub time: String,
    pub goal_status: GoalStatus,
    pub compliance: Compliance,
    pub therapy_goal: String,
    pub hypothesis: String,
    /// Required (non-empty) when the goal was not reached.
    #[serde(default)]
    pub reason: Option<String>,
}

impl FormRecord {
    /// Checks the required free-text fields before anything else runs.
    /// Messages match the original form wording.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.time.trim().is_empty() {
            return Err(AppError::Validation(
                "Bitte geben Sie die Behandlungszeit an.".to_string(),
            ));
        }
        if self.therapy_goal.trim().is_empty() {
            return Err(AppError::Validation(
                "Bitte geben Sie das Therapieziel ein.".to_string(),
            ));
        }
        if self.hypothesis.trim().is_empty() {
            return Err(AppError::Validation(
                "Bitte geben Sie die Hypothese ein.".to_string(),
            ));
        }
        if self.goal_status == GoalStatus::NichtErreicht
            && self.reason.as_deref().map_or(true, |r| r.trim().is_empty())
        {
            return Err(AppError::Validation(
                "Bitte geben Sie eine Begründung für die Nicht-Erreichung des Ziels ein."
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// The reason line is only meaningful when the goal was missed.
    pub fn effective_reason(&self) -> Option<&str> {
        match self.goal_status {
            GoalStatus::NichtErreicht => {
                self.reason.as_deref().map(str::trim).filter(|r| !r.is_empty())
            }
            GoalStatus::Erreicht => None,
        }
    }

    /// Flat key/value projection consumed by the template engine.
    /// Enum fields carry their wire strings so templates compare against
    /// the same values the form submits.
    pub fn template_vars(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert("time".to_string(), self.time.clone());
        vars.insert("goalStatus".to_string(), self.goal_status.as_str().to_string());
        vars.insert("compliance".to_string(), self.compliance.as_str().to_string());
        vars.insert("therapyGoal".to_string(), self.therapy_goal.clone());
        vars.insert("hypothesis".to_string(), self.hypothesis.clone());
        if let Some(reason) = self.effective_reason() {
            vars.insert("reason".to_string(), reason.to_string());
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> FormRecord {
        FormRecord {
            time: "14:30".to_string(),
            goal_status: GoalStatus::Erreicht,
            compliance: Compliance::Ja,
            therapy_goal: "Schmerzfreie Schulterflexion über 90°".to_string(),
            hypothesis: "Impingement-Syndrom rechts".to_string(),
            reason: None,
        }
    }

    #[test]
    fn test_deserializes_camel_case_wire_form() {
        let json = r#"{
            "time": "09:15",
            "goalStatus": "nicht-erreicht",
            "compliance": "nein",
            "therapyGoal": "Treppensteigen ohne Hilfsmittel",
            "hypothesis": "Gonarthrose links",
            "reason": "Zu wenige Einheiten"
        }"#;
        let record: FormRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.goal_status, GoalStatus::NichtErreicht);
        assert_eq!(record.compliance, Compliance::Nein);
        assert_eq!(record.reason.as_deref(), Some("Zu wenige Einheiten"));
    }

    #[test]
    fn test_rejects_unknown_goal_status() {
        let json = r#"{
            "time": "09:15",
            "goalStatus": "achieved",
            "compliance": "ja",
            "therapyGoal": "x",
            "hypothesis": "y"
        }"#;
        assert!(serde_json::from_str::<FormRecord>(json).is_err());
    }

    #[test]
    fn test_labels_follow_form_values() {
        assert_eq!(GoalStatus::Erreicht.label(), "Ziel erreicht");
        assert_eq!(GoalStatus::NichtErreicht.label(), "Ziel nicht erreicht");
        assert_eq!(Compliance::Ja.label(), "Ja");
        assert_eq!(Compliance::Nein.label(), "Nein");
    }

    #[test]
    fn test_validate_requires_reason_when_goal_missed() {
        let mut record = sample_record();
        record.goal_status = GoalStatus::NichtErreicht;
        record.reason = Some("   ".to_string());
        let err = record.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Begründung")));
    }

    #[test]
    fn test_validate_ignores_reason_when_goal_reached() {
        let record = sample_record();
        assert!(record.validate().is_ok());
        assert_eq!(record.effective_reason(), None);
    }

    #[test]
    fn test_template_vars_use_wire_strings() {
        let mut record = sample_record();
        record.goal_status = GoalStatus::NichtErreicht;
        record.reason = Some("Compliance unzureichend".to_string());
        let vars = record.template_vars();
        assert_eq!(vars.get("goalStatus").unwrap(), "nicht-erreicht");
        assert_eq!(vars.get("compliance").unwrap(), "ja");
        assert_eq!(vars.get("reason").unwrap(), "Compliance unzureichend");
    }

    #[test]
    fn test_template_vars_omit_absent_reason() {
        let vars = sample_record().template_vars();
        assert!(!vars.contains_key("reason"));
        assert_eq!(vars.len(), 5);
    }
}
