use serde::{Deserialize, Serialize};

/// Default model when the admin never saved a selection.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3-opus";

/// Built-in system prompt. Demonstrates both template grammars so the admin
/// editor has a working example to start from.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Du bist ein erfahrener Physiotherapeut, der professionelle Abschlussberichte verfasst. \
Deine Berichte sind klar strukturiert, fachlich korrekt und verwenden physiotherapeutische Fachsprache.\n\n\
Aktuelles Therapieziel: {therapyGoal}\n\
Zielerreichung: {goalStatus === \"erreicht\" ? \"Das Ziel wurde erreicht\" : \"Das Ziel wurde nicht erreicht\"}\n\
Compliance: {compliance === \"ja\" ? \"gut\" : \"verbesserungswürdig\"}";

/// Admin-edited configuration record. Persisted as a whole; the wire and
/// file form both use the camelCase keys below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub system_prompt: String,
    pub model: String,
    /// Empty string means "no key": report generation stays in demo mode.
    #[serde(default)]
    pub api_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
        }
    }
}

impl Settings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// An entry of the admin model picker.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
}

/// Models offered in the admin panel. Any OpenRouter model id works via PUT;
/// this list only feeds the picker.
pub const AVAILABLE_MODELS: &[ModelInfo] = &[
    ModelInfo { id: "openai/gpt-3.5-turbo", name: "GPT-3.5 Turbo" },
    ModelInfo { id: "openai/gpt-4", name: "GPT-4" },
    ModelInfo { id: "anthropic/claude-2", name: "Claude 2" },
    ModelInfo { id: "anthropic/claude-instant-v1", name: "Claude Instant" },
    ModelInfo { id: "anthropic/claude-3-opus", name: "Claude 3 Opus" },
    ModelInfo { id: "google/palm-2-chat-bison", name: "PaLM 2 Chat" },
    ModelInfo { id: "meta-llama/llama-2-13b-chat", name: "Llama 2 13B Chat" },
];
