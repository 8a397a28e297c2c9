#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    Mounted {
        version: String,
        elements: usize,
        actions: usize,
    },
    LoadFailed {
        reason: String,
    },
    Rendered {
        diagnostics: usize,
    },
    Submitted {
        action_id: Option<String>,
        fields: usize,
    },
}

pub trait TelemetryHook: Send + Sync {
    fn emit(&self, event: TelemetryEvent);
}

#[derive(Default)]
pub struct NullTelemetry;

impl TelemetryHook for NullTelemetry {
    fn emit(&self, _event: TelemetryEvent) {}
}

pub struct CardTelemetry<'a> {
    hook: &'a dyn TelemetryHook,
}

impl<'a> CardTelemetry<'a> {
    pub fn new(hook: &'a dyn TelemetryHook) -> Self {
        Self { hook }
    }

    pub fn mounted(&self, version: &str, elements: usize, actions: usize) {
        self.hook.emit(TelemetryEvent::Mounted {
            version: version.to_string(),
            elements,
            actions,
        });
    }

    pub fn load_failed(&self, reason: impl ToString) {
        self.hook.emit(TelemetryEvent::LoadFailed {
            reason: reason.to_string(),
        });
    }

    pub fn rendered(&self, diagnostics: usize) {
        self.hook.emit(TelemetryEvent::Rendered { diagnostics });
    }

    pub fn submitted(&self, action_id: Option<&str>, fields: usize) {
        self.hook.emit(TelemetryEvent::Submitted {
            action_id: action_id.map(str::to_string),
            fields,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestTelemetry {
        pub events: std::sync::Mutex<Vec<TelemetryEvent>>,
    }

    impl TestTelemetry {
        fn new() -> Self {
            Self {
                events: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    impl TelemetryHook for TestTelemetry {
        fn emit(&self, event: TelemetryEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn telemetry_records_events() {
        let hook = TestTelemetry::new();
        let telemetry = CardTelemetry::new(&hook);
        telemetry.mounted("1.3", 2, 1);
        telemetry.rendered(0);
        telemetry.submitted(Some("send"), 3);
        let events = hook.events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[2],
            TelemetryEvent::Submitted {
                action_id: Some("send".into()),
                fields: 3
            }
        );
    }
}
