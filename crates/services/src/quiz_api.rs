use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{GradeResult, GradeSource, Question, QuestionBank};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::credentials::CredentialSource;
use crate::error::{GenerationError, GradingError};
use crate::generation::{GenerationRequest, QuestionGenerator};
use crate::grading::{AnswerGrader, GradingRoute};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizApiConfig {
    pub base_url: String,
}

impl QuizApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api";

    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("QUIZ_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.into());
        Self { base_url }
    }
}

/// HTTP adapter for the quiz backend: question generation plus guest and
/// member grading.
#[derive(Clone)]
pub struct QuizApiClient {
    client: Client,
    config: QuizApiConfig,
    credentials: Arc<dyn CredentialSource>,
}

impl QuizApiClient {
    #[must_use]
    pub fn new(config: QuizApiConfig, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            client: Client::new(),
            config,
            credentials,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn grade_path(question_id: u64, route: GradingRoute) -> String {
        match route {
            GradingRoute::Member => format!("quiz/questions/{question_id}/grade"),
            GradingRoute::Guest => format!("guest/quiz/questions/{question_id}/grade"),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl AnswerGrader for QuizApiClient {
    async fn grade(
        &self,
        question_id: u64,
        answer: &str,
        route: GradingRoute,
    ) -> Result<GradeResult, GradingError> {
        let url = self.endpoint(&Self::grade_path(question_id, route));
        let mut request = self.client.post(url).json(&GradeRequest { answer });
        if route == GradingRoute::Member {
            request = self.authorize(request);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(GradingError::HttpStatus(response.status()));
        }

        let mut result: GradeResult = response.json().await?;
        result.source = GradeSource::Server;
        Ok(result)
    }
}

#[async_trait]
impl QuestionGenerator for QuizApiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<QuestionBank, GenerationError> {
        let url = self.endpoint("quiz/generate");
        let response = self
            .authorize(self.client.post(url))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: GenerateResponse = response.json().await?;
        if body.questions.is_empty() {
            return Err(GenerationError::EmptyBank);
        }
        Ok(QuestionBank::new(body.questions))
    }
}

#[derive(Debug, Serialize)]
struct GradeRequest<'a> {
    answer: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    questions: Vec<Question>,
}
