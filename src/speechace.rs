use log::debug;
use reqwest::multipart;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::constants::{SPEECHACE_DIALECT, SPEECHACE_SCORING_URL, SPEECHACE_USER_ID};

/// Failure of a scoring request
///
/// There is no retry or fallback; the caller decides what a failed scoring
/// attempt means for the request it is serving.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("scoring request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("scoring response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Client for the SpeechAce speech-scoring API
///
/// One outbound call per scored clip: a multipart POST with the API
/// credentials in the query string and the audio plus fixed scoring options
/// in the body.
pub struct SpeechAceClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SpeechAceClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, SPEECHACE_SCORING_URL.to_string())
    }

    /// Build a client against a non-default endpoint (used by tests)
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }

    /// Score an audio clip and return the result document as a string
    ///
    /// The response is parsed as JSON with no schema validation - whatever
    /// document the API returns is re-serialized (4-space indentation) and
    /// passed through verbatim.
    pub async fn score(&self, audio: Vec<u8>, file_name: &str) -> Result<String, ScoreError> {
        debug!("Scoring {} byte clip '{}'", audio.len(), file_name);

        let form = multipart::Form::new()
            .text("include_fluency", "1")
            .text("include_intonation", "1")
            .text("include_ielts_subscore", "1")
            .text("include_ielts_feedback", "1")
            .part(
                "user_audio_file",
                multipart::Part::bytes(audio).file_name(file_name.to_string()),
            );

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("dialect", SPEECHACE_DIALECT),
                ("user_id", SPEECHACE_USER_ID),
            ])
            .multipart(form)
            .send()
            .await?;

        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(pretty_json(&value)?)
    }
}

/// Serialize a JSON document with 4-space indentation
pub fn pretty_json(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(out).expect("serde_json emits UTF-8"))
}
