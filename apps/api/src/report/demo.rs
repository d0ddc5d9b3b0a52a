// Deterministic fallback report. Used when no API key is configured and when
// the upstream call fails. Must stay a pure function of the record (no
// clock, no randomness) so identical submissions yield identical reports.

use crate::models::form::{Compliance, FormRecord, GoalStatus};

const DEMO_NOTICE: &str = "**DEMO-MODUS**: Dies ist ein Beispielbericht für Testzwecke. \
Um echte KI-generierte Berichte zu erhalten, hinterlegen Sie bitte einen OpenRouter \
API-Schlüssel in den Admin-Einstellungen.";

/// Builds the canned report from the submitted record.
pub fn demo_report(data: &FormRecord) -> String {
    let goal = data.goal_status;
    let compliance = data.compliance;

    let verlauf = match compliance {
        Compliance::Ja => {
            "Der Patient zeigte eine gute Mitarbeit und regelmäßige Teilnahme an den Therapiesitzungen."
        }
        Compliance::Nein => {
            "Der Patient zeigte Schwierigkeiten bei der regelmäßigen Teilnahme an den Therapiesitzungen."
        }
    };

    let status = match goal {
        GoalStatus::Erreicht => {
            "Der Patient kann die Bewegungen schmerzfrei durchführen und zeigt eine deutliche Verbesserung der Funktionalität."
        }
        GoalStatus::NichtErreicht => {
            "Der Patient zeigt eine teilweise Verbesserung, benötigt jedoch weitere Therapie zur vollständigen Zielerreichung."
        }
    };

    let empfehlung = match goal {
        GoalStatus::Erreicht => {
            "Regelmäßige Eigenübungen zur Erhaltung der erreichten Funktionalität. Kontrolle in 3 Monaten empfohlen."
        }
        GoalStatus::NichtErreicht => {
            "Fortsetzung der Therapie mit 2 Einheiten pro Woche für weitere 6 Wochen. Anpassung des Heimübungsprogramms."
        }
    };

    let mut summary = format!(
        "**Zeit:** {time}\n\
         **Physiotherapie-Ziel Status:** {goal_label} {goal_light}\n\
         **Compliance:** {compliance_label} {compliance_light}\n\
         **Therapieziel:** {therapy_goal}\n\
         **Hypothese:** {hypothesis}\n",
        time = data.time,
        goal_label = goal.label(),
        goal_light = goal.traffic_light(),
        compliance_label = compliance.label(),
        compliance_light = compliance.traffic_light(),
        therapy_goal = data.therapy_goal,
        hypothesis = data.hypothesis,
    );
    if let Some(reason) = data.effective_reason() {
        summary.push_str(&format!("**Begründung für Nicht-Erreichung des Ziels:** {reason}\n"));
    }

    let begruendung = match data.effective_reason() {
        Some(reason) => format!("**Begründung für Nicht-Erreichung:** {reason}\n"),
        None => String::new(),
    };

    format!(
        "{DEMO_NOTICE}\n\n\
         {summary}\n\
         ### Physiotherapeutischer Abschlussbericht\n\n\
         #### 1. Patienteninformationen und Behandlungszeitraum\n\
         **Patient:** Max Mustermann\n\
         **Behandlungszeit:** {time} Uhr\n\n\
         #### 2. Ursprüngliche Diagnose und Befund\n\
         {hypothesis}\n\n\
         #### 3. Therapieziele und Maßnahmen\n\
         **Hauptziel:** {therapy_goal}\n\
         **Maßnahmen:** Mobilisation, Kräftigung, Propriozeptionstraining, Gangschule\n\n\
         #### 4. Behandlungsverlauf\n\
         **Compliance:** {compliance_label}\n\
         **Verlauf:** {verlauf}\n\n\
         #### 5. Ergebnisse und aktueller Status\n\
         **Zielerreichung:** {goal_label}\n\
         {begruendung}\
         **Aktueller Status:** {status}\n\n\
         #### 6. Empfehlungen für weitere Maßnahmen\n\
         {empfehlung}\n\n\
         **Unterschrift Therapeut/in:** _______________________\n",
        time = data.time,
        hypothesis = data.hypothesis,
        therapy_goal = data.therapy_goal,
        compliance_label = compliance.label(),
        goal_label = goal.label(),
    )
}
