use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{Difficulty, Language};
use quiz_core::time::fixed_clock;
use serde_json::json;
use services::{
    Clock, ContentSource, InMemoryContentSource, RandomSource, RetryPolicy, SeededRandom,
    SessionConfig,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{GameSessionView, ScoreBoard};

#[derive(Clone)]
struct TestApp {
    source: InMemoryContentSource,
    clock: Clock,
}

impl UiApp for TestApp {
    fn content_source(&self) -> Arc<dyn ContentSource> {
        Arc::new(self.source.clone())
    }

    fn random_source(&self) -> Arc<dyn RandomSource> {
        Arc::new(SeededRandom::new(7))
    }

    fn initial_language(&self) -> Language {
        Language::new("en").unwrap()
    }

    fn initial_difficulty(&self) -> Difficulty {
        Difficulty::Normal
    }

    fn languages(&self) -> Vec<Language> {
        vec![Language::new("da").unwrap()]
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            retry: RetryPolicy::none(),
            ..SessionConfig::default()
        }
    }

    fn round_duration(&self) -> Duration {
        Duration::seconds(30)
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Session,
    ScoreBoard { deadline: DateTime<Utc>, score: u64 },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.view {
        ViewKind::Session => rsx! { GameSessionView {} },
        ViewKind::ScoreBoard { deadline, score } => rsx! {
            ScoreBoard { deadline, score, on_timeout: move |_| {} }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub source: InMemoryContentSource,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(StdDuration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive the dom until the rendered html contains `needle` or the attempts run out.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        for _ in 0..40 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_source() -> InMemoryContentSource {
    InMemoryContentSource::new()
        .with_language(
            Language::new("en").unwrap(),
            vec![json!({"word": "apple"}), json!({"word": "pear"})],
        )
        .with_language(Language::new("da").unwrap(), vec![json!({"word": "æble"})])
}

pub fn setup_view_harness(view: ViewKind, source: InMemoryContentSource) -> ViewHarness {
    let app = Arc::new(TestApp {
        source: source.clone(),
        clock: fixed_clock(),
    });
    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app, view });
    ViewHarness { dom, source }
}
