use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEEPSEEK_URL: &str = "https://api.deepseek.com/v1/chat/completions";
const MODEL: &str = "deepseek-chat";
const SYSTEM_PROMPT: &str = "You are a creative script writer for short videos. \
    Create engaging, detailed scripts with scene descriptions and dialogue.";

pub const FIRST_SCRIPT_INSTRUCTION: &str =
    "Create a detailed script for a short video based on this concept: ";
pub const SECOND_SCRIPT_INSTRUCTION: &str =
    "Create an alternative creative script for a short video using this concept: ";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

pub struct ScriptGenerator {
    pub client: Client,
    api_key: String,
}

impl ScriptGenerator {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .context("failed to build reqwest client")?;
        Ok(Self { client, api_key })
    }

    pub fn with_client(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// One chat-completion round trip: `instruction` is prepended to the
    /// user's prompt, the first choice's content is the script.
    pub async fn generate_script(&self, base_prompt: &str, instruction: &str) -> Result<String> {
        let full_prompt = format!("{instruction}{base_prompt}");
        let body = ChatRequest {
            model: MODEL,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: &full_prompt,
                },
            ],
            temperature: 0.7,
            max_tokens: 2000,
        };

        let resp = self
            .client
            .post(DEEPSEEK_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("error sending request to DeepSeek API")?;

        let raw = resp
            .text()
            .await
            .context("error reading DeepSeek response")?;
        parse_script_response(&raw)
    }
}

fn parse_script_response(raw: &str) -> Result<String> {
    let parsed: ChatResponse =
        serde_json::from_str(raw).context("error parsing DeepSeek response")?;

    if let Some(err) = parsed.error {
        anyhow::bail!("DeepSeek API error: {}", err.message);
    }

    let first = parsed
        .choices
        .into_iter()
        .next()
        .context("no script generated by DeepSeek")?;
    Ok(first.message.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_first_choice() {
        let raw = r#"{"choices":[
            {"message":{"content":"Scene 1: the script"}},
            {"message":{"content":"unused second choice"}}
        ]}"#;
        assert_eq!(parse_script_response(raw).unwrap(), "Scene 1: the script");
    }

    #[test]
    fn surfaces_the_api_error_field() {
        let raw = r#"{"error":{"message":"insufficient quota"}}"#;
        let err = parse_script_response(raw).unwrap_err();
        assert!(err.to_string().contains("DeepSeek API error"));
        assert!(err.to_string().contains("insufficient quota"));
    }

    #[test]
    fn empty_choices_is_an_error() {
        let err = parse_script_response(r#"{"choices":[]}"#).unwrap_err();
        assert!(err.to_string().contains("no script generated"));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = parse_script_response("not json").unwrap_err();
        assert!(format!("{err:#}").contains("error parsing DeepSeek response"));
    }
}
