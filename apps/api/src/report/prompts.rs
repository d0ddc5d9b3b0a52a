// Prompt assembly for report generation. The system prompt is admin-owned
// (template engine); the user prompt is fixed structure.

use crate::models::form::FormRecord;
use crate::template;

/// The two messages of one chat-completion request.
#[derive(Debug, Clone)]
pub struct Prompts {
    pub system: String,
    pub user: String,
}

/// User prompt skeleton. Replace every `{...}` slot before sending.
const USER_PROMPT_TEMPLATE: &str = r#"Erstelle einen Physiotherapie-Abschlussbericht mit folgenden Informationen:

Zeit: {time}
Physiotherapie-Ziel Status: {goal_status} {goal_light}
Compliance: {compliance} {compliance_light}
Therapieziel: {therapy_goal}
Hypothese: {hypothesis}
{reason_line}"#;

/// Fixed report structure appended after the form data.
const USER_PROMPT_STRUCTURE: &str = r#"
Bitte strukturiere den Bericht in folgende Abschnitte:

WICHTIG: Beginne den Bericht mit einer Zusammenfassung der Formularinformationen in einer Box, die exakt die oben genannten Informationen enthält, inklusive der Ampel-Symbole (🟢 für positive und 🔴 für negative Antworten).

Danach folgen diese Abschnitte:
1. Patienteninformationen und Behandlungszeitraum
2. Ursprüngliche Diagnose und Befund
3. Therapieziele und Maßnahmen
4. Behandlungsverlauf
5. Ergebnisse und aktueller Status
6. Empfehlungen für weitere Maßnahmen

Der Bericht sollte professionell, detailliert und für medizinisches Fachpersonal geeignet sein.
"#;

/// Builds the system and user prompts for one form submission.
/// No escaping happens here; the HTTP layer JSON-encodes the messages.
pub fn build_prompts(data: &FormRecord, system_template: &str) -> Prompts {
    Prompts {
        system: template::render(system_template, &data.template_vars()),
        user: build_user_prompt(data),
    }
}

fn build_user_prompt(data: &FormRecord) -> String {
    let reason_line = match data.effective_reason() {
        Some(reason) => format!("Begründung für Nicht-Erreichung des Ziels: {reason}\n"),
        None => String::new(),
    };

    let mut prompt = USER_PROMPT_TEMPLATE
        .replace("{time}", &data.time)
        .replace("{goal_status}", data.goal_status.label())
        .replace("{goal_light}", data.goal_status.traffic_light())
        .replace("{compliance}", data.compliance.label())
        .replace("{compliance_light}", data.compliance.traffic_light())
        .replace("{therapy_goal}", &data.therapy_goal)
        .replace("{hypothesis}", &data.hypothesis)
        .replace("{reason_line}", &reason_line);

    prompt.push_str(USER_PROMPT_STRUCTURE);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::{Compliance, FormRecord, GoalStatus};

    fn record(goal_status: GoalStatus, reason: Option<&str>) -> FormRecord {
        FormRecord {
            time: "14:30".to_string(),
            goal_status,
            compliance: Compliance::Ja,
            therapy_goal: "Schmerzfreie Schulterflexion".to_string(),
            hypothesis: "Impingement rechts".to_string(),
            reason: reason.map(str::to_string),
        }
    }

    #[test]
    fn test_user_prompt_embeds_every_field() {
        let prompts = build_prompts(&record(GoalStatus::Erreicht, None), "egal");
        assert!(prompts.user.contains("Zeit: 14:30"));
        assert!(prompts.user.contains("Physiotherapie-Ziel Status: Ziel erreicht 🟢"));
        assert!(prompts.user.contains("Compliance: Ja 🟢"));
        assert!(prompts.user.contains("Therapieziel: Schmerzfreie Schulterflexion"));
        assert!(prompts.user.contains("Hypothese: Impingement rechts"));
        assert!(prompts.user.contains("6. Empfehlungen für weitere Maßnahmen"));
    }

    #[test]
    fn test_reason_line_only_when_goal_missed() {
        let with = build_prompts(
            &record(GoalStatus::NichtErreicht, Some("Zu wenige Einheiten")),
            "egal",
        );
        assert!(with.user.contains("Begründung für Nicht-Erreichung des Ziels: Zu wenige Einheiten"));

        let without = build_prompts(&record(GoalStatus::Erreicht, Some("ignoriert")), "egal");
        assert!(!without.user.contains("Begründung"));
    }

    #[test]
    fn test_no_reason_line_for_empty_reason() {
        let prompts = build_prompts(&record(GoalStatus::NichtErreicht, Some("  ")), "egal");
        assert!(!prompts.user.contains("Begründung"));
    }

    #[test]
    fn test_system_prompt_goes_through_template_engine() {
        let template = r#"Ziel: {therapyGoal}, Status: {goalStatus === "erreicht" ? "top" : "offen"}"#;
        let prompts = build_prompts(&record(GoalStatus::Erreicht, None), template);
        assert_eq!(prompts.system, "Ziel: Schmerzfreie Schulterflexion, Status: top");
    }

    #[test]
    fn test_traffic_lights_follow_answers() {
        let mut data = record(GoalStatus::NichtErreicht, Some("Grund"));
        data.compliance = Compliance::Nein;
        let prompts = build_prompts(&data, "egal");
        assert!(prompts.user.contains("Ziel nicht erreicht 🔴"));
        assert!(prompts.user.contains("Compliance: Nein 🔴"));
    }
}
