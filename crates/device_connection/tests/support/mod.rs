use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// An event emitted while a span was current
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub level: Level,
    pub message: Option<String>,
}

/// A span as seen when it closed
#[derive(Debug, Clone, Default)]
pub struct ClosedSpan {
    pub name: String,
    pub fields: HashMap<String, String>,
    pub events: Vec<RecordedEvent>,
}

impl ClosedSpan {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn events_at(&self, level: Level) -> Vec<&RecordedEvent> {
        self.events.iter().filter(|e| e.level == level).collect()
    }
}

#[derive(Default)]
struct FieldVisitor(HashMap<String, String>);

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

/// Layer collecting the recorded fields of every span once it closes.
#[derive(Clone, Default)]
pub struct SpanRecorder {
    closed: Arc<Mutex<Vec<ClosedSpan>>>,
}

impl SpanRecorder {
    pub fn closed_spans(&self, name: &str) -> Vec<ClosedSpan> {
        self.closed
            .lock()
            .unwrap()
            .iter()
            .filter(|span| span.name == name)
            .cloned()
            .collect()
    }
}

impl<S> Layer<S> for SpanRecorder
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);

        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(ClosedSpan {
                name: attrs.metadata().name().to_string(),
                fields: visitor.0,
                events: Vec::new(),
            });
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut extensions = span.extensions_mut();
            if let Some(recorded) = extensions.get_mut::<ClosedSpan>() {
                let mut visitor = FieldVisitor(std::mem::take(&mut recorded.fields));
                values.record(&mut visitor);
                recorded.fields = visitor.0;
            }
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.event_span(event) else {
            return;
        };

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut extensions = span.extensions_mut();
        if let Some(recorded) = extensions.get_mut::<ClosedSpan>() {
            recorded.events.push(RecordedEvent {
                level: *event.metadata().level(),
                message: visitor.0.remove("message"),
            });
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(&id) {
            if let Some(recorded) = span.extensions_mut().remove::<ClosedSpan>() {
                self.closed.lock().unwrap().push(recorded);
            }
        }
    }
}
