//! Diagnostics sink for the language service

/// Receiver of the language service's log records.
pub trait Diagnostics: Send + Sync {
    /// A supported culture was persisted
    fn culture_changed(&self, culture: &str);

    /// A requested culture is not in the supported table
    fn unsupported_culture(&self, culture: &str);

    /// The culture cookie could not be encoded
    fn cookie_write_failed(&self, culture: &str, error: &dyn std::error::Error);
}

/// Forwards diagnostics to `tracing`, with the culture as a field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn culture_changed(&self, culture: &str) {
        tracing::info!(target: "culture_selector::language", culture = %culture, "Culture changed to: {}", culture);
    }

    fn unsupported_culture(&self, culture: &str) {
        tracing::warn!(target: "culture_selector::language", culture = %culture, "Unsupported culture: {}", culture);
    }

    fn cookie_write_failed(&self, culture: &str, error: &dyn std::error::Error) {
        tracing::warn!(
            target: "culture_selector::language",
            culture = %culture,
            error = %error,
            "Failed to write culture cookie"
        );
    }
}

/// Kind of a captured record.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Changed,
    Unsupported,
    CookieFailed,
}

/// Sink that keeps every record in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    records: std::sync::Mutex<Vec<(Event, String)>>,
}

#[cfg(test)]
impl RecordingDiagnostics {
    /// Cultures recorded for `event`, in call order
    pub fn cultures(&self, event: Event) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, culture)| culture.clone())
            .collect()
    }

    fn push(&self, event: Event, culture: &str) {
        self.records.lock().unwrap().push((event, culture.to_string()));
    }
}

#[cfg(test)]
impl Diagnostics for RecordingDiagnostics {
    fn culture_changed(&self, culture: &str) {
        self.push(Event::Changed, culture);
    }

    fn unsupported_culture(&self, culture: &str) {
        self.push(Event::Unsupported, culture);
    }

    fn cookie_write_failed(&self, culture: &str, _error: &dyn std::error::Error) {
        self.push(Event::CookieFailed, culture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::{Layer, layer::Context, layer::SubscriberExt};

    /// Captures (level, culture field) of every event
    #[derive(Clone, Default)]
    struct CultureFieldLayer {
        events: Arc<Mutex<Vec<(tracing::Level, Option<String>)>>>,
    }

    struct CultureVisitor(Option<String>);

    impl Visit for CultureVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "culture" {
                self.0 = Some(format!("{:?}", value));
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for CultureFieldLayer {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = CultureVisitor(None);
            event.record(&mut visitor);
            self.events.lock().unwrap().push((*event.metadata().level(), visitor.0));
        }
    }

    fn capture(f: impl FnOnce()) -> Vec<(tracing::Level, Option<String>)> {
        let layer = CultureFieldLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, f);
        let events = layer.events.lock().unwrap().clone();
        events
    }

    #[test]
    fn test_unsupported_culture_is_structured_warning() {
        let events = capture(|| TracingDiagnostics.unsupported_culture("xx-XX"));
        assert_eq!(events, vec![(tracing::Level::WARN, Some("xx-XX".to_string()))]);
    }

    #[test]
    fn test_culture_changed_is_structured_info() {
        let events = capture(|| TracingDiagnostics.culture_changed("ar-SA"));
        assert_eq!(events, vec![(tracing::Level::INFO, Some("ar-SA".to_string()))]);
    }
}
