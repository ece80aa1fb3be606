use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::RagflowClient;
use crate::error::{Result, ServiceError};
use crate::payload::assemble_payload;
use crate::prompt::{build_prompt, PromptSections};
use crate::sections::{format_goals, format_personal_info, format_resources, or_not_provided};
use crate::timeframe::Timeframe;
use crate::value::{format_value, has_content, StructuredValue};

/// Body of `POST /api/ragflow/woop`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default)]
    pub personal_info: StructuredValue,
    #[serde(default)]
    pub current_skill: StructuredValue,
    #[serde(default)]
    pub goals: StructuredValue,
    #[serde(default)]
    pub timeframe: Option<StructuredValue>,
    #[serde(default)]
    pub resources: StructuredValue,
    #[serde(default)]
    pub payload_config: Option<StructuredValue>,
}

/// Everything produced before the backend is contacted.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedReport {
    pub timeframe: Timeframe,
    pub prompt: String,
    pub payload: Value,
}

impl ReportRequest {
    // Names the first empty field, in this fixed order.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("personalInfo", &self.personal_info),
            ("currentSkill", &self.current_skill),
            ("goals", &self.goals),
        ];
        match required.iter().find(|(_, value)| !has_content(value)) {
            Some((field, _)) => Err(ServiceError::validation(format!("{field} is required."))),
            None => Ok(()),
        }
    }

    fn timeframe_input(&self) -> Option<String> {
        match &self.timeframe {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    pub fn prepare(&self) -> Result<PreparedReport> {
        self.validate()?;
        let timeframe = Timeframe::normalize(self.timeframe_input().as_deref())?;

        let sections = PromptSections {
            personal_info: or_not_provided(format_personal_info(&self.personal_info)),
            current_skill: or_not_provided(format_value(&self.current_skill)),
            goals: or_not_provided(format_goals(&self.goals)),
            resources: format_resources(&self.resources),
        };
        let prompt = build_prompt(timeframe, &sections);
        let payload = assemble_payload(self.payload_config.as_ref(), &prompt);

        Ok(PreparedReport {
            timeframe,
            prompt,
            payload,
        })
    }
}

/// Build the WOOP prompt for `request` and forward it. The reply is passed through as-is.
pub async fn generate_report(client: &RagflowClient, request: &ReportRequest) -> Result<Value> {
    let prepared = request.prepare()?;
    info!(timeframe = %prepared.timeframe, prompt_chars = prepared.prompt.len(), "dispatching WOOP report");
    debug!(payload = %prepared.payload, "WOOP payload");

    client.run_query(&prepared.payload).await
}
