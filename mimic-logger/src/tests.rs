use crate::Logger;
use mimic_core::RunSummary;
use mimic_model::{RequestCategory, RequestItem, RequestSpec, Sequence, StepUpdate};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(f: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    capture.contents()
}

fn item(id: &str) -> RequestItem {
    RequestItem {
        id: id.to_string(),
        name: format!("Request {id}"),
        description: None,
        category: RequestCategory::Api,
        request: RequestSpec::get(format!("https://api.test/{id}")),
    }
}

#[test]
fn test_trace_id() {
    assert_ne!(Logger::new().trace_id, Logger::new().trace_id);
    assert_eq!(Logger::with_trace_id("run-7").trace_id, "run-7");
}

#[test]
fn test_log_run_summary() {
    let logger = Logger::with_trace_id("run-1");
    let summary = RunSummary {
        total: 3,
        succeeded: 2,
        failed: 1,
        skipped: 0,
        cancelled: false,
        duration: Duration::from_millis(12),
    };

    let output = captured(|| logger.log_run_summary(&summary));
    assert!(output.contains("Sequence run summary"));
    assert!(output.contains("trace_id=run-1"));
    assert!(output.contains("failed=1"));
    assert!(output.contains("duration_ms=12"));
}

#[test]
fn test_log_sequence_details() {
    let logger = Logger::with_trace_id("run-2");
    let mut sequence = Sequence::new();
    let failing = sequence.push_item(&item("bad"));
    sequence.push_delay(250);
    let pending = sequence.push_item(&item("slow"));
    sequence.push_item(&item("idle"));
    sequence.apply(&failing, &StepUpdate::running());
    sequence.apply(&failing, &StepUpdate::failed("Request failed: 500 Internal Server Error"));
    sequence.apply(&pending, &StepUpdate::running());

    let output = captured(|| logger.log_sequence_details(&sequence));
    assert!(output.contains("Request step failed"));
    assert!(output.contains("Request failed: 500 Internal Server Error"));
    assert!(output.contains("Delay step"));
    assert!(output.contains("delay_ms=250"));
    assert!(output.contains("Request step still running"));
    assert!(output.contains("url=https://api.test/idle"));
    assert_eq!(output.matches("trace_id=run-2").count(), 4);
}
