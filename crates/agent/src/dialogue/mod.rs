//! Dialogue State Machine
//!
//! `process_turn` is a pure function from `(message, state)` to
//! `(response, new state)`. Each turn is routed in a fixed order:
//!
//! 1. First message of a session: segment-tailored welcome, enter the
//!    scripted graph at its entry step
//! 2. Pricing request (or a pending price request whose service just got
//!    resolved): quote, or ask which service is meant
//! 3. Expert question: topic advice plus a segment-tailored offer
//! 4. Company/contact question: fixed boilerplate, step pointer untouched
//! 5. Active scripted step: record the answer, move to the next step
//! 6. Knowledge record
//! 7. Contact-us fallback
//!
//! Knowledge records come after the scripted step: their keywords overlap
//! the answers the script asks for ("статьи", "сроки").
//!
//! Requirements detected in any message are merged into the session before
//! routing; nothing is ever removed from them.

use std::sync::Arc;

use copy_assistant_config::{
    AssistantSettings, CatalogStore, DialogueGraph, ResponseTemplates, TemplateVars,
};
use copy_assistant_core::QuickLink;
use copy_assistant_text_processing::{Classification, ExpertTopic, LexicalClassifier};
use copy_assistant_tools::{recommendations, PriceEngine};

use crate::error::Result;
use crate::knowledge::KnowledgeResponder;
use crate::navigation::{service_url, Navigator};
use crate::response::{format_amount, render_quote, AssistantResponse, TurnOutcome, TurnRoute};
use crate::session::{SessionState, StepAnswer};

/// Rule-based copywriting assistant
pub struct CopyAssistant {
    store: Arc<CatalogStore>,
    graph: DialogueGraph,
    templates: Arc<ResponseTemplates>,
    settings: AssistantSettings,
    classifier: LexicalClassifier,
    engine: PriceEngine,
    knowledge: KnowledgeResponder,
    navigator: Arc<Navigator>,
}

impl CopyAssistant {
    pub fn new(
        store: Arc<CatalogStore>,
        graph: DialogueGraph,
        templates: ResponseTemplates,
        settings: AssistantSettings,
    ) -> Self {
        let templates = Arc::new(templates);
        let navigator = Arc::new(Navigator::new(Arc::clone(&store), settings.brand.clone()));
        let engine = PriceEngine::new(Arc::clone(&store), settings.pricing.clone());
        let knowledge = KnowledgeResponder::new(
            Arc::clone(&store),
            Arc::clone(&templates),
            Arc::clone(&navigator),
            settings.brand.clone(),
        );

        Self {
            store,
            graph,
            templates,
            settings,
            classifier: LexicalClassifier::new(),
            engine,
            knowledge,
            navigator,
        }
    }

    /// Assistant over the built-in catalog, dialogue and templates
    pub fn builtin() -> Result<Self> {
        Self::from_settings(AssistantSettings::default())
    }

    /// Build from settings, loading any data file overrides they name
    pub fn from_settings(settings: AssistantSettings) -> Result<Self> {
        settings.validate()?;

        let store = match settings.paths.catalog {
            Some(ref path) => CatalogStore::from_path(path)?,
            None => CatalogStore::builtin()?,
        };
        let graph = match settings.paths.dialogue {
            Some(ref path) => DialogueGraph::load(path)?,
            None => DialogueGraph::builtin()?,
        };
        let templates = match settings.paths.templates {
            Some(ref path) => ResponseTemplates::load(path)?,
            None => ResponseTemplates::builtin()?,
        };

        tracing::info!(
            services = store.snapshot().services.len(),
            steps = graph.steps.len(),
            "Assistant initialized"
        );
        Ok(Self::new(Arc::new(store), graph, templates, settings))
    }

    /// Shared catalog store; replacing its snapshot affects later turns
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn settings(&self) -> &AssistantSettings {
        &self.settings
    }

    pub fn graph(&self) -> &DialogueGraph {
        &self.graph
    }

    pub fn templates(&self) -> &ResponseTemplates {
        &self.templates
    }

    pub fn new_session(&self) -> SessionState {
        SessionState::new()
    }

    /// Process one user message against the session state.
    ///
    /// Always produces a response; the returned state replaces the one
    /// passed in.
    pub fn process_turn(&self, message: &str, state: SessionState) -> TurnOutcome {
        let mut state = state;
        let classification = self.classifier.classify(message, &state.recent_messages);

        if state.update_segment(classification.segment) {
            tracing::debug!(
                session_id = %state.session_id,
                segment = %state.client_segment,
                "Client segment updated"
            );
        }
        state.mood = classification.mood;
        if state.merge_requirements(&classification.detected) {
            tracing::debug!(
                session_id = %state.session_id,
                requirements = ?state.project_requirements,
                "Requirements updated"
            );
        }
        state.remember_message(message, self.settings.session.recent_messages_capacity);

        let (route, response) = self.route(message, &classification, &mut state);
        state.turn_count += 1;

        metrics::counter!("copy_assistant_turns_total", "route" => route.as_str()).increment(1);
        tracing::debug!(
            session_id = %state.session_id,
            turn = state.turn_count,
            route = route.as_str(),
            phase = ?state.phase(),
            segment = %state.client_segment,
            mood = %state.mood,
            "Turn processed"
        );

        TurnOutcome {
            route,
            response,
            state,
        }
    }

    fn route(
        &self,
        message: &str,
        classification: &Classification,
        state: &mut SessionState,
    ) -> (TurnRoute, AssistantResponse) {
        if state.is_first_turn() {
            return (TurnRoute::Welcome, self.welcome(message, state));
        }

        let resolves_pending = state.awaiting_price_details
            && state.project_requirements.service_type.is_some();
        if classification.intents.pricing || resolves_pending {
            return self.pricing(message, state);
        }

        if let Some(topic) = classification.intents.expert_topic {
            return (TurnRoute::ExpertAdvice, self.expert_advice(topic, message, state));
        }

        if let Some(answer) = self.knowledge.company(message) {
            let response = AssistantResponse::text(answer.text).with_links(answer.quick_links);
            return (TurnRoute::CompanyInfo, response);
        }

        if let Some(step_id) = state.current_step_id.clone() {
            return (TurnRoute::ScriptedStep, self.scripted_step(&step_id, message, state));
        }

        if let Some(answer) = self.knowledge.record(message) {
            let links = if answer.quick_links.is_empty() {
                self.navigator.links(message, &state.project_requirements)
            } else {
                answer.quick_links
            };
            let response = AssistantResponse::text(answer.text)
                .with_recommendations(answer.recommendations)
                .with_links(links);
            return (TurnRoute::Knowledge, response);
        }

        (TurnRoute::ContactFallback, self.contact_fallback())
    }

    fn welcome(&self, message: &str, state: &mut SessionState) -> AssistantResponse {
        state.enter_step(self.graph.entry_step.clone());

        let template = self.templates.welcome.for_segment(state.client_segment);
        AssistantResponse::text(self.fill(template, TemplateVars::new()))
            .with_recommendations(self.recommendations_for(state))
            .with_links(self.navigator.links(message, &state.project_requirements))
    }

    fn pricing(&self, message: &str, state: &mut SessionState) -> (TurnRoute, AssistantResponse) {
        let Some(service) = state.project_requirements.service_type.clone() else {
            state.await_price_details();
            let response =
                AssistantResponse::text(self.fill(&self.templates.messages.price_clarification, TemplateVars::new()))
                    .with_links(self.catalog_links());
            return (TurnRoute::PriceClarification, response);
        };

        let quote = self
            .engine
            .quote(&service, &state.project_requirements, state.client_segment);
        state.return_to_idle();
        state.last_quote = Some(quote.clone());

        let mut text = render_quote(&quote);
        if quote.is_custom() {
            let mut vars = TemplateVars::new();
            vars.insert("price".to_string(), format_amount(quote.final_price));
            text.push_str("\n\n");
            text.push_str(&self.fill(&self.templates.messages.custom_quote_note, vars));
        }

        let response = AssistantResponse::text(text)
            .with_recommendations(self.recommendations_for(state))
            .with_links(self.navigator.links(message, &state.project_requirements))
            .with_quote(quote);
        (TurnRoute::Pricing, response)
    }

    fn expert_advice(
        &self,
        topic: ExpertTopic,
        message: &str,
        state: &SessionState,
    ) -> AssistantResponse {
        let advice = self.templates.advice(topic.as_str());
        let offer = self
            .templates
            .offer_suffix
            .for_segment(state.client_segment);
        let text = format!("{}\n\n{}", advice, self.fill(offer, TemplateVars::new()));

        AssistantResponse::text(text)
            .with_links(self.navigator.links(message, &state.project_requirements))
    }

    fn scripted_step(
        &self,
        step_id: &str,
        message: &str,
        state: &mut SessionState,
    ) -> AssistantResponse {
        state.step_answers.push(StepAnswer {
            step_id: step_id.to_string(),
            answer: message.to_string(),
        });

        let next = self.graph.next_step(step_id, message).map(str::to_string);
        let text = match next {
            Some(next_id) => {
                let prompt = self.graph.prompt(&next_id).unwrap_or_default().to_string();
                tracing::debug!(from = step_id, to = %next_id, "Scripted step advanced");
                state.enter_step(next_id);
                prompt
            }
            None => {
                state.return_to_idle();
                let mut vars = TemplateVars::new();
                vars.insert("summary".to_string(), self.requirements_summary(state));
                self.fill(&self.templates.messages.dialogue_complete, vars)
            }
        };

        AssistantResponse::text(text)
            .with_links(self.navigator.links(message, &state.project_requirements))
    }

    fn contact_fallback(&self) -> AssistantResponse {
        AssistantResponse::text(self.fill(
            &self.templates.messages.contact_fallback,
            TemplateVars::new(),
        ))
        .with_links(self.navigator.closing_links())
    }

    /// Fill a template with brand variables plus `extra`
    fn fill(&self, template: &str, extra: TemplateVars) -> String {
        let mut vars = self.settings.brand.template_vars();
        vars.extend(extra);
        ResponseTemplates::substitute_variables(template, &vars)
    }

    fn recommendations_for(&self, state: &SessionState) -> Vec<String> {
        let catalog = self.store.snapshot();
        recommendations(
            state.client_segment,
            state.project_requirements.service_type.as_deref(),
            &catalog,
        )
    }

    /// One link per catalog service, for choosing what to price
    fn catalog_links(&self) -> Vec<QuickLink> {
        let catalog = self.store.snapshot();
        catalog
            .services
            .iter()
            .map(|s| {
                QuickLink::new(
                    s.name.clone(),
                    service_url(&s.category),
                    format!(
                        "от {} {}",
                        format_amount(s.price_range.min),
                        s.price_range.currency
                    ),
                )
            })
            .collect()
    }

    fn requirements_summary(&self, state: &SessionState) -> String {
        let mut reqs = state.project_requirements.clone();
        if let Some(entry) = reqs
            .service_type
            .as_deref()
            .and_then(|hint| self.store.snapshot().find_service(hint).cloned())
        {
            reqs.service_type = Some(entry.name);
        }

        let lines = reqs.summary_lines();
        if lines.is_empty() {
            return "• детали уточним при созвоне".to_string();
        }
        lines
            .iter()
            .map(|line| format!("• {}", line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Debug for CopyAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyAssistant")
            .field("store", &self.store)
            .field("entry_step", &self.graph.entry_step)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DialoguePhase;
    use copy_assistant_core::{ClientSegment, Mood};

    fn assistant() -> CopyAssistant {
        CopyAssistant::builtin().unwrap()
    }

    /// Session that already had its welcome turn
    fn started(assistant: &CopyAssistant) -> SessionState {
        assistant
            .process_turn("Добрый день", SessionState::with_id("test"))
            .state
    }

    #[test]
    fn test_first_turn_welcome() {
        let assistant = assistant();
        let outcome = assistant.process_turn("Здравствуйте", SessionState::with_id("test"));

        assert_eq!(outcome.route, TurnRoute::Welcome);
        let expected = ResponseTemplates::substitute_variables(
            assistant.templates().welcome.for_segment(ClientSegment::Unknown),
            &assistant.settings().brand.template_vars(),
        );
        assert_eq!(outcome.response.text, expected);
        assert_eq!(outcome.state.current_step_id.as_deref(), Some("start"));
        assert_eq!(outcome.state.turn_count, 1);
    }

    #[test]
    fn test_first_turn_welcome_by_segment() {
        let assistant = assistant();
        let outcome =
            assistant.process_turn("Мы уже работали с вами", SessionState::with_id("test"));
        let expected = ResponseTemplates::substitute_variables(
            assistant.templates().welcome.for_segment(ClientSegment::Returning),
            &assistant.settings().brand.template_vars(),
        );
        assert_eq!(outcome.response.text, expected);
        assert_eq!(outcome.state.client_segment, ClientSegment::Returning);
    }

    #[test]
    fn test_pricing_without_service_awaits_details() {
        let assistant = assistant();
        let outcome = assistant.process_turn("Сколько стоит?", started(&assistant));

        assert_eq!(outcome.route, TurnRoute::PriceClarification);
        assert_eq!(outcome.state.phase(), DialoguePhase::AwaitingPriceDetails);
        assert!(outcome.response.quote.is_none());
        assert_eq!(outcome.response.quick_links.len(), 6);
        assert_eq!(outcome.response.quick_links[0].url, "/services/seo");
    }

    #[test]
    fn test_awaiting_details_resolved_by_service() {
        let assistant = assistant();
        let state = assistant.process_turn("Сколько стоит?", started(&assistant)).state;
        let outcome = assistant.process_turn("Нужен лендинг", state);

        assert_eq!(outcome.route, TurnRoute::Pricing);
        assert_eq!(outcome.state.phase(), DialoguePhase::Idle);
        let quote = outcome.response.quote.unwrap();
        assert_eq!(quote.service_slug.as_deref(), Some("landing-page"));
        assert_eq!(outcome.state.last_quote, Some(quote));
    }

    #[test]
    fn test_pricing_with_service_quotes() {
        let assistant = assistant();
        let outcome = assistant.process_turn(
            "Рассчитайте 12 статей, тема сложная, срочно. Я новичок",
            started(&assistant),
        );

        assert_eq!(outcome.route, TurnRoute::Pricing);
        let quote = outcome.response.quote.as_ref().unwrap();
        assert_eq!(quote.base_price, 75_000.0);
        assert_eq!(quote.final_price, 52_500.0);
        assert!(outcome.response.text.contains("Итоговая стоимость: 52500 RUB"));
        assert_eq!(outcome.state.mood, Mood::Impatient);
        assert_eq!(outcome.state.current_step_id, None);
    }

    #[test]
    fn test_expert_question_gets_advice_and_offer() {
        let assistant = assistant();
        let mut state = started(&assistant);
        state.client_segment = ClientSegment::Business;

        let outcome = assistant.process_turn("Как повысить конверсию лендинга?", state);
        assert_eq!(outcome.route, TurnRoute::ExpertAdvice);

        let templates = assistant.templates();
        assert!(outcome.response.text.starts_with(templates.advice("landing")));
        assert!(outcome.response.text.ends_with("скидка 25%."));
        // Expert turns do not leave the scripted flow
        assert_eq!(outcome.state.current_step_id.as_deref(), Some("start"));
    }

    #[test]
    fn test_scripted_flow_to_completion() {
        let assistant = assistant();
        let state = started(&assistant);

        let outcome = assistant.process_turn("Нам нужны статьи", state);
        assert_eq!(outcome.route, TurnRoute::ScriptedStep);
        assert_eq!(outcome.state.current_step_id.as_deref(), Some("seo_details"));
        assert_eq!(
            outcome.response.text,
            assistant.graph().prompt("seo_details").unwrap()
        );

        let outcome = assistant.process_turn("10 статей про кофе", outcome.state);
        assert_eq!(outcome.state.current_step_id.as_deref(), Some("deadline"));

        let outcome = assistant.process_turn("Через неделю", outcome.state);
        assert_eq!(outcome.state.current_step_id.as_deref(), Some("contacts"));

        let outcome = assistant.process_turn("+7 900 000-00-00", outcome.state);
        assert_eq!(outcome.route, TurnRoute::ScriptedStep);
        assert_eq!(outcome.state.phase(), DialoguePhase::Idle);
        assert!(outcome.response.text.contains("• Услуга: SEO-статьи"));
        assert!(outcome.response.text.contains("• Объём: 10 шт."));

        let answered: Vec<&str> = outcome
            .state
            .step_answers
            .iter()
            .map(|a| a.step_id.as_str())
            .collect();
        assert_eq!(answered, vec!["start", "seo_details", "deadline", "contacts"]);
    }

    #[test]
    fn test_selector_default_branch() {
        let assistant = assistant();
        let outcome = assistant.process_turn("Нужен нейминг для бренда", started(&assistant));
        assert_eq!(outcome.state.current_step_id.as_deref(), Some("custom_details"));
    }

    #[test]
    fn test_company_question_during_scripted_step() {
        let assistant = assistant();
        let outcome = assistant.process_turn("Какой у вас адрес?", started(&assistant));

        assert_eq!(outcome.route, TurnRoute::CompanyInfo);
        assert_eq!(outcome.response.quick_links[0].title, "Telegram");
        assert_eq!(outcome.state.current_step_id.as_deref(), Some("start"));
        assert!(outcome.state.step_answers.is_empty());
    }

    #[test]
    fn test_left_phone_answers_contacts_step() {
        let assistant = assistant();
        let mut state = started(&assistant);
        state.enter_step("contacts");

        let outcome = assistant.process_turn("Мой телефон +7 900 123-45-67", state);
        assert_eq!(outcome.route, TurnRoute::ScriptedStep);
        assert_eq!(outcome.state.phase(), DialoguePhase::Idle);
        assert_eq!(outcome.state.step_answers[0].step_id, "contacts");
    }

    #[test]
    fn test_segment_change_drops_last_quote() {
        let assistant = assistant();
        let state = assistant
            .process_turn("Сколько стоит лендинг?", started(&assistant))
            .state;
        assert!(state.last_quote.is_some());

        let outcome = assistant.process_turn("Кстати, мы компания", state);
        assert_eq!(outcome.state.client_segment, ClientSegment::Business);
        assert!(outcome.state.last_quote.is_none());
    }

    #[test]
    fn test_three_posts_priced_as_social() {
        let assistant = assistant();
        let outcome = assistant.process_turn(
            "Сколько стоит 3 поста для соцсетей в неделю?",
            started(&assistant),
        );

        assert_eq!(outcome.route, TurnRoute::Pricing);
        let quote = outcome.response.quote.unwrap();
        assert_eq!(quote.service_slug.as_deref(), Some("social-posts"));
        assert!(quote
            .components
            .iter()
            .all(|c| !c.name.starts_with("Срочность")));
    }

    #[test]
    fn test_knowledge_answer_in_idle() {
        let assistant = assistant();
        let mut state = started(&assistant);
        state.return_to_idle();

        let outcome = assistant.process_turn("Покажите портфолио", state);
        assert_eq!(outcome.route, TurnRoute::Knowledge);
        assert!(outcome.response.text.starts_with("Несколько наших работ:"));
        assert_eq!(outcome.response.quick_links[0].url, "/portfolio");
    }

    #[test]
    fn test_unclassified_turn_falls_back_to_contacts() {
        let assistant = assistant();
        let mut state = started(&assistant);
        state.return_to_idle();

        let outcome = assistant.process_turn("ммм", state);
        assert_eq!(outcome.route, TurnRoute::ContactFallback);
        assert!(outcome.response.text.contains(&assistant.settings().brand.phone));
        assert_eq!(outcome.response.quick_links.len(), 4);
    }

    #[test]
    fn test_unknown_service_in_catalog_gives_placeholder() {
        let assistant = assistant();
        let mut state = started(&assistant);
        state.project_requirements.service_type = Some("xyzzy-nonexistent".to_string());

        let outcome = assistant.process_turn("Посчитайте, пожалуйста", state);
        let quote = outcome.response.quote.unwrap();
        assert!(quote.is_custom());
        assert_eq!(quote.final_price, 5000.0);
        assert!(outcome.response.text.contains("5000 ₽"));
    }
}
