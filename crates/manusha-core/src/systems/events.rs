//! Events system - periodic narrative flavor text from a pluggable generator
//!
//! Every `event_interval` ticks the engine asks a [`NarrativeGenerator`] for one
//! sentence describing the world. The request runs on a detached tokio task
//! and reports back through a oneshot channel, so a slow or broken generator
//! never holds up a tick. At most one request is in flight at a time.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Substituted when the generator fails or its task dies
pub const FALLBACK_EVENT_TEXT: &str = "A chilling silence falls over the wasteland.";
/// Substituted when the generator answers with nothing
pub const EMPTY_EVENT_TEXT: &str = "The air grows heavy with an unspoken dread...";
/// How many past events are shown to the generator
pub const RECENT_EVENT_CONTEXT: usize = 3;

/// Lines used by [`CannedGenerator`], also given to real generators as style examples
pub const EXAMPLE_EVENTS: [&str; 6] = [
    "A strange, rhythmic humming emanates from a collapsed skyscraper.",
    "The wind carries the scent of ozone and decay from the east.",
    "One of the survivors finds a barely-legible note clutched in a skeletal hand.",
    "A blood-red moon hangs ominously in the night sky.",
    "A sudden tremor shakes the ground, unsettling the nearby ruins.",
    "A distant distress flare paints the clouds crimson for a fleeting moment.",
];

/// World summary handed to a generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPrompt {
    pub day: u64,
    pub survivors: usize,
    pub hostiles: usize,
    /// Most recent first
    pub recent_events: Vec<String>,
}

impl EventPrompt {
    /// Full instruction text for a text-generation model
    pub fn render(&self) -> String {
        let recent = if self.recent_events.is_empty() {
            "None".to_string()
        } else {
            self.recent_events.join(", ")
        };
        let examples: String = EXAMPLE_EVENTS.iter().map(|line| format!("- {line}\n")).collect();

        format!(
            "You are a terse, atmospheric game master for a post-apocalyptic anime survival \
             simulation called \"Project: Manusha\".\n\
             The world is bleak, mysterious, and dangerous.\n\
             Your task is to generate a single, short, impactful event description based on \
             the current game state.\n\
             Do not use greetings or pleasantries. Be direct.\n\
             \n\
             Current State:\n\
             - Day: {}\n\
             - Survivors: {}\n\
             - Hostile Entities: {}\n\
             - Recent Events: {}\n\
             \n\
             Generate a new event. It should be one sentence. Focus on atmosphere, mystery, \
             or a hint of action.\n\
             \n\
             Examples:\n\
             {}",
            self.day, self.survivors, self.hostiles, recent, examples
        )
    }
}

/// Why a generator produced no text
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("generator request failed: {0}")]
    Request(String),
    #[error("generator is unavailable")]
    Unavailable,
}

pub type GeneratorFuture =
    Pin<Box<dyn Future<Output = Result<String, GeneratorError>> + Send + 'static>>;

/// Source of narrative event text
pub trait NarrativeGenerator: Send + Sync + 'static {
    fn generate(&self, prompt: EventPrompt) -> GeneratorFuture;
}

/// Offline generator that cycles through [`EXAMPLE_EVENTS`]
#[derive(Debug, Default)]
pub struct CannedGenerator {
    next: AtomicUsize,
}

impl CannedGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NarrativeGenerator for CannedGenerator {
    fn generate(&self, _prompt: EventPrompt) -> GeneratorFuture {
        let i = self.next.fetch_add(1, Ordering::Relaxed) % EXAMPLE_EVENTS.len();
        let line = EXAMPLE_EVENTS[i].to_string();
        Box::pin(async move { Ok::<_, GeneratorError>(line) })
    }
}

/// Turn a generator result into the text that gets recorded
pub fn settle(result: Result<String, GeneratorError>) -> String {
    match result {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                EMPTY_EVENT_TEXT.to_string()
            } else {
                text.to_string()
            }
        }
        Err(err) => {
            log::warn!("Narrative generation failed: {}", err);
            FALLBACK_EVENT_TEXT.to_string()
        }
    }
}

/// Schedules generator requests and hands back their results
pub struct EventTrigger {
    generator: Arc<dyn NarrativeGenerator>,
    interval: u64,
    pending: Option<oneshot::Receiver<String>>,
}

impl EventTrigger {
    pub fn new(generator: Arc<dyn NarrativeGenerator>, interval: u64) -> Self {
        Self {
            generator,
            interval,
            pending: None,
        }
    }

    /// Whether `tick` lands on an event boundary
    pub fn is_due(&self, tick: u64) -> bool {
        self.interval > 0 && tick > 0 && tick % self.interval == 0
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a request unless one is already running.
    ///
    /// Needs a tokio runtime; without one the request is skipped.
    pub fn fire(&mut self, prompt: EventPrompt) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::warn!("No async runtime available, skipping narrative event");
                return false;
            }
        };

        log::debug!(
            "Requesting narrative event: day={} survivors={} hostiles={}",
            prompt.day,
            prompt.survivors,
            prompt.hostiles
        );
        let (tx, rx) = oneshot::channel();
        let request = self.generator.generate(prompt);
        handle.spawn(async move {
            let text = settle(request.await);
            // Receiver may be gone if the engine was dropped
            let _ = tx.send(text);
        });
        self.pending = Some(rx);
        true
    }

    /// Take a finished result without waiting
    pub fn poll(&mut self) -> Option<String> {
        let rx = self.pending.as_mut()?;
        match rx.try_recv() {
            Ok(text) => {
                self.pending = None;
                Some(text)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                log::warn!("Narrative task ended without a result");
                self.pending = None;
                Some(FALLBACK_EVENT_TEXT.to_string())
            }
        }
    }

    /// Wait for the in-flight request, if any
    pub async fn wait(&mut self) -> Option<String> {
        let rx = self.pending.take()?;
        Some(rx.await.unwrap_or_else(|_| {
            log::warn!("Narrative task ended without a result");
            FALLBACK_EVENT_TEXT.to_string()
        }))
    }
}

impl std::fmt::Debug for EventTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTrigger")
            .field("interval", &self.interval)
            .field("in_flight", &self.is_in_flight())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl NarrativeGenerator for Failing {
        fn generate(&self, _prompt: EventPrompt) -> GeneratorFuture {
            Box::pin(async { Err::<String, _>(GeneratorError::Request("quota exceeded".into())) })
        }
    }

    /// Never answers
    #[derive(Default)]
    struct Stalled {
        calls: AtomicUsize,
    }

    impl NarrativeGenerator for Stalled {
        fn generate(&self, _prompt: EventPrompt) -> GeneratorFuture {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(std::future::pending::<Result<String, GeneratorError>>())
        }
    }

    fn prompt() -> EventPrompt {
        EventPrompt {
            day: 3,
            survivors: 5,
            hostiles: 2,
            recent_events: Vec::new(),
        }
    }

    #[test]
    fn test_render_prompt() {
        let text = prompt().render();
        assert!(text.contains("- Day: 3"));
        assert!(text.contains("- Hostile Entities: 2"));
        assert!(text.contains("- Recent Events: None"));
        assert!(text.contains("anime survival simulation called \"Project: Manusha\".\n"));
        assert!(text.contains("based on the current game state.\n"));

        let with_history = EventPrompt {
            recent_events: vec!["a".into(), "b".into()],
            ..prompt()
        };
        assert!(with_history.render().contains("- Recent Events: a, b"));
    }

    #[test]
    fn test_settle() {
        assert_eq!(settle(Ok("  Ash falls.\n".into())), "Ash falls.");
        assert_eq!(settle(Ok("   ".into())), EMPTY_EVENT_TEXT);
        assert_eq!(settle(Err(GeneratorError::Unavailable)), FALLBACK_EVENT_TEXT);
    }

    #[test]
    fn test_is_due() {
        let trigger = EventTrigger::new(Arc::new(CannedGenerator::new()), 150);
        assert!(!trigger.is_due(0));
        assert!(!trigger.is_due(149));
        assert!(trigger.is_due(150));
        assert!(trigger.is_due(300));

        let disabled = EventTrigger::new(Arc::new(CannedGenerator::new()), 0);
        assert!(!disabled.is_due(150));
    }

    #[test]
    fn test_fire_without_runtime_is_skipped() {
        let mut trigger = EventTrigger::new(Arc::new(CannedGenerator::new()), 150);
        assert!(!trigger.fire(prompt()));
        assert!(!trigger.is_in_flight());
    }

    #[tokio::test]
    async fn test_canned_round_trip() {
        let mut trigger = EventTrigger::new(Arc::new(CannedGenerator::new()), 150);
        assert!(trigger.fire(prompt()));
        assert!(trigger.is_in_flight());
        assert_eq!(trigger.wait().await.as_deref(), Some(EXAMPLE_EVENTS[0]));
        assert!(!trigger.is_in_flight());
        assert_eq!(trigger.wait().await, None);
    }

    #[tokio::test]
    async fn test_not_reentrant() {
        let generator = Arc::new(Stalled::default());
        let mut trigger = EventTrigger::new(generator.clone(), 150);
        assert!(trigger.fire(prompt()));
        assert!(!trigger.fire(prompt()));
        assert_eq!(trigger.poll(), None);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let mut trigger = EventTrigger::new(Arc::new(Failing), 150);
        trigger.fire(prompt());
        assert_eq!(trigger.wait().await.as_deref(), Some(FALLBACK_EVENT_TEXT));
    }

    #[test]
    fn test_dead_task_falls_back() {
        let mut trigger = EventTrigger::new(Arc::new(CannedGenerator::new()), 150);
        let (tx, rx) = oneshot::channel::<String>();
        trigger.pending = Some(rx);
        assert_eq!(trigger.poll(), None);
        drop(tx);
        assert_eq!(trigger.poll().as_deref(), Some(FALLBACK_EVENT_TEXT));
        assert!(!trigger.is_in_flight());
    }
}
