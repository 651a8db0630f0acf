// Card lifecycle on the client: Idle -> Loading -> Ready <-> Regenerating

use std::mem;
use thiserror::Error;

use crate::client::api::CardService;
use crate::client::form::{CardForm, FormErrors};
use crate::error::ClientRequestError;
use crate::types::{GenerationRequest, GenerationResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CardState {
    /// No card, nothing in flight.
    #[default]
    Idle,
    /// First request for the current form; the card area shows a skeleton.
    Loading,
    Ready(GenerationResult),
    /// Regenerate in flight; the previous card stays on screen.
    Regenerating(GenerationResult),
}

impl CardState {
    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            CardState::Ready(result) | CardState::Regenerating(result) => Some(result),
            CardState::Idle | CardState::Loading => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, CardState::Loading | CardState::Regenerating(_))
    }
}

/// Transient failure message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
}

impl Notification {
    pub const fn generation_failed() -> Self {
        Self {
            title: "Uh oh! Something went wrong.",
            description: "There was a problem with the AI generation. Please try again.",
        }
    }

    pub const fn regeneration_failed() -> Self {
        Self {
            title: "Uh oh! Something went wrong.",
            description: "There was a problem with the AI regeneration. Please try again.",
        }
    }
}

/// Why a submit or regenerate did not start a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejected {
    #[error("form has invalid fields")]
    InvalidForm(FormErrors),
    #[error("a card request is already in flight")]
    Busy,
    #[error("there is no card to regenerate")]
    NothingToRegenerate,
}

/// One card's worth of client state: the form, the last submitted request,
/// the lifecycle state and the latest notification.
#[derive(Debug, Clone, Default)]
pub struct CardSession {
    form: CardForm,
    field_errors: FormErrors,
    last_request: Option<GenerationRequest>,
    state: CardState,
    notification: Option<Notification>,
}

impl CardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &CardForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CardForm {
        &mut self.form
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn field_errors(&self) -> &FormErrors {
        &self.field_errors
    }

    pub fn last_request(&self) -> Option<&GenerationRequest> {
        self.last_request.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    /// Submit control enabled.
    pub fn can_submit(&self) -> bool {
        !self.state.is_busy()
    }

    /// Regenerate control enabled.
    pub fn can_regenerate(&self) -> bool {
        matches!(self.state, CardState::Ready(_))
    }

    /// Validate the form and move to `Loading`. Any card on display is
    /// dropped; it belonged to the previous request.
    pub fn begin_submit(&mut self) -> Result<GenerationRequest, Rejected> {
        if self.state.is_busy() {
            return Err(Rejected::Busy);
        }

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(errors) => {
                self.field_errors = errors.clone();
                return Err(Rejected::InvalidForm(errors));
            }
        };

        self.field_errors = FormErrors::default();
        self.notification = None;
        self.last_request = Some(request.clone());
        self.state = CardState::Loading;
        Ok(request)
    }

    /// Move `Ready` to `Regenerating`, reusing the last submitted request.
    pub fn begin_regenerate(&mut self) -> Result<GenerationRequest, Rejected> {
        let request = match (&self.state, &self.last_request) {
            (CardState::Loading | CardState::Regenerating(_), _) => return Err(Rejected::Busy),
            (CardState::Ready(_), Some(request)) => request.clone(),
            _ => return Err(Rejected::NothingToRegenerate),
        };

        if let CardState::Ready(result) = mem::take(&mut self.state) {
            self.state = CardState::Regenerating(result);
        }
        self.notification = None;
        Ok(request)
    }

    /// Apply the outcome of the request started by `begin_submit` or
    /// `begin_regenerate`.
    pub fn finish(&mut self, outcome: Result<GenerationResult, ClientRequestError>) {
        self.state = match (mem::take(&mut self.state), outcome) {
            (CardState::Loading, Ok(result)) | (CardState::Regenerating(_), Ok(result)) => {
                CardState::Ready(result)
            }
            (CardState::Loading, Err(err)) => {
                tracing::error!("Failed to generate marketing card: {}", err);
                self.notification = Some(Notification::generation_failed());
                CardState::Idle
            }
            (CardState::Regenerating(previous), Err(err)) => {
                tracing::error!("Failed to regenerate marketing card: {}", err);
                self.notification = Some(Notification::regeneration_failed());
                CardState::Ready(previous)
            }
            (state, _) => {
                tracing::warn!("Ignoring card outcome with no request in flight");
                state
            }
        };
    }

    pub async fn submit<S>(&mut self, service: &S) -> Result<(), Rejected>
    where
        S: CardService + ?Sized,
    {
        let request = self.begin_submit()?;
        let outcome = service.generate_marketing_card(&request).await;
        self.finish(outcome);
        Ok(())
    }

    pub async fn regenerate<S>(&mut self, service: &S) -> Result<(), Rejected>
    where
        S: CardService + ?Sized,
    {
        let request = self.begin_regenerate()?;
        let outcome = service.generate_marketing_card(&request).await;
        self.finish(outcome);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Hands out queued outcomes in order and records every request.
    struct ScriptedService {
        outcomes: Mutex<VecDeque<Result<GenerationResult, ClientRequestError>>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedService {
        fn new(outcomes: Vec<Result<GenerationResult, ClientRequestError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CardService for ScriptedService {
        async fn generate_marketing_card(
            &self,
            request: &GenerationRequest,
        ) -> Result<GenerationResult, ClientRequestError> {
            self.requests.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra request")
        }
    }

    fn card(title: &str) -> GenerationResult {
        GenerationResult {
            title: title.to_string(),
            description: format!("{} description.", title),
            tags: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
        }
    }

    fn server_error() -> ClientRequestError {
        ClientRequestError::Status {
            status: 500,
            message: Some("Failed to generate marketing card".to_string()),
        }
    }

    fn filled_session() -> CardSession {
        let mut session = CardSession::new();
        session.form_mut().set_product_name("Smart Fitness Watch");
        session.form_mut().select_category("Wearable Electronics");
        session
    }

    #[tokio::test]
    async fn test_submit_success_shows_card() {
        let service = ScriptedService::new(vec![Ok(card("Track Your Best Self"))]);
        let mut session = filled_session();

        session.submit(&service).await.unwrap();

        assert_eq!(session.state(), &CardState::Ready(card("Track Your Best Self")));
        assert!(session.notification().is_none());
        assert_eq!(
            service.requests(),
            vec![GenerationRequest::new("Smart Fitness Watch", "Wearable Electronics")]
        );
    }

    #[tokio::test]
    async fn test_invalid_form_never_calls_service() {
        let service = ScriptedService::new(vec![]);
        let mut session = CardSession::new();
        session.form_mut().set_product_name("X");

        let rejected = session.submit(&service).await.unwrap_err();

        assert!(matches!(rejected, Rejected::InvalidForm(_)));
        assert!(service.requests().is_empty());
        assert_eq!(session.state(), &CardState::Idle);
        assert!(session.field_errors().product_name.is_some());
        assert!(session.field_errors().category.is_some());
    }

    #[tokio::test]
    async fn test_submit_failure_returns_to_idle_with_notification() {
        let service = ScriptedService::new(vec![Err(server_error())]);
        let mut session = filled_session();

        session.submit(&service).await.unwrap();

        assert_eq!(session.state(), &CardState::Idle);
        assert_eq!(session.notification(), Some(&Notification::generation_failed()));
    }

    #[tokio::test]
    async fn test_regenerate_replaces_card_and_keeps_form() {
        let service = ScriptedService::new(vec![Ok(card("First")), Ok(card("Second"))]);
        let mut session = filled_session();
        session.submit(&service).await.unwrap();

        session.regenerate(&service).await.unwrap();

        assert_eq!(session.state(), &CardState::Ready(card("Second")));
        assert_eq!(session.form().product_name(), "Smart Fitness Watch");
        assert_eq!(session.form().category(), Some("Wearable Electronics"));
        let requests = service.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
    }

    #[tokio::test]
    async fn test_regenerate_failure_keeps_previous_card() {
        let service = ScriptedService::new(vec![Ok(card("First")), Err(server_error())]);
        let mut session = filled_session();
        session.submit(&service).await.unwrap();

        session.regenerate(&service).await.unwrap();

        assert_eq!(session.state(), &CardState::Ready(card("First")));
        assert_eq!(session.notification(), Some(&Notification::regeneration_failed()));
    }

    #[tokio::test]
    async fn test_regenerate_uses_last_submitted_request() {
        let service = ScriptedService::new(vec![Ok(card("First")), Ok(card("Second"))]);
        let mut session = filled_session();
        session.submit(&service).await.unwrap();

        session.form_mut().set_product_name("Something Else");
        session.regenerate(&service).await.unwrap();

        assert_eq!(service.requests()[1].product_name, "Smart Fitness Watch");
        assert_eq!(session.form().product_name(), "Something Else");
    }

    #[test]
    fn test_regenerating_keeps_card_visible_and_disables_controls() {
        let mut session = filled_session();
        session.begin_submit().unwrap();
        assert!(!session.can_submit());
        assert_eq!(session.begin_submit(), Err(Rejected::Busy));
        session.finish(Ok(card("First")));
        assert!(session.can_regenerate());

        session.begin_regenerate().unwrap();

        assert_eq!(session.state(), &CardState::Regenerating(card("First")));
        assert_eq!(session.state().result(), Some(&card("First")));
        assert!(!session.can_submit());
        assert!(!session.can_regenerate());
        assert_eq!(session.begin_regenerate(), Err(Rejected::Busy));
        assert_eq!(session.begin_submit(), Err(Rejected::Busy));
    }

    #[test]
    fn test_regenerate_needs_a_card() {
        let mut session = filled_session();
        assert_eq!(session.begin_regenerate(), Err(Rejected::NothingToRegenerate));
        assert_eq!(session.state(), &CardState::Idle);
    }

    #[test]
    fn test_new_submit_clears_displayed_card() {
        let mut session = filled_session();
        session.begin_submit().unwrap();
        session.finish(Ok(card("First")));

        session.form_mut().set_product_name("Ceramic Mug");
        session.form_mut().select_category("Kitchenware");
        let request = session.begin_submit().unwrap();

        assert_eq!(request, GenerationRequest::new("Ceramic Mug", "Kitchenware"));
        assert_eq!(session.state(), &CardState::Loading);
        assert!(session.state().result().is_none());
        assert_eq!(session.last_request(), Some(&request));
    }

    #[test]
    fn test_stale_outcome_is_ignored() {
        let mut session = CardSession::new();
        session.finish(Ok(card("Stray")));
        assert_eq!(session.state(), &CardState::Idle);
    }

    #[test]
    fn test_successful_submit_clears_previous_errors() {
        let mut session = CardSession::new();
        assert!(session.begin_submit().is_err());
        assert!(!session.field_errors().is_empty());

        session.form_mut().set_product_name("Desk Lamp");
        session.form_mut().select_category("Furniture");
        session.begin_submit().unwrap();
        assert!(session.field_errors().is_empty());
    }
}
