#![cfg(feature = "diagnostics")]

mod common;

use std::sync::{Arc, Mutex};

use common::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

#[derive(Debug, Clone)]
struct Record {
	level: Level,
	message: String,
	symbol: Option<String>,
}

#[derive(Default)]
struct RecordVisitor {
	message: String,
	symbol: Option<String>,
}

impl Visit for RecordVisitor {
	fn record_str(&mut self, field: &Field, value: &str) {
		if field.name() == "symbol" {
			self.symbol = Some(value.to_owned());
		}
	}

	fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
		if field.name() == "message" {
			self.message = format!("{value:?}");
		}
	}
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<Record>>>);

impl<S: Subscriber> Layer<S> for Capture {
	fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
		let mut visitor = RecordVisitor::default();
		event.record(&mut visitor);
		self.0.lock().unwrap().push(Record {
			level: *event.metadata().level(),
			message: visitor.message,
			symbol: visitor.symbol,
		});
	}
}

fn capture(f: impl FnOnce()) -> Vec<Record> {
	let layer = Capture::default();
	let subscriber = Registry::default().with(layer.clone());
	tracing::subscriber::with_default(subscriber, f);
	let records = layer.0.lock().unwrap().clone();
	records
}

#[test]
fn test_load_failure_event() {
	let records = capture(|| {
		let mut plugin = Plugin::default();
		assert!(plugin.load("./does-not-exist.so").is_err());
	});
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].level, Level::WARN);
	assert_eq!(records[0].message, "failed to load library");
}

#[test]
fn test_bind_failure_events() {
	let records = capture(|| {
		let mut plugin = Plugin::default();
		assert!(plugin.bind("answer").is_err());
		plugin.load(FAKE).unwrap();
		assert!(plugin.bind("missing").is_err());
	});
	let symbols: Vec<_> = records.iter().map(|r| r.symbol.as_deref()).collect();
	assert_eq!(symbols, [Some("answer"), Some("missing")]);
	assert!(records.iter().all(|r| r.level == Level::WARN));
}

#[test]
fn test_unbound_invoke_event() {
	let records = capture(|| {
		let plugin = loaded();
		let res = unsafe { plugin.invoke::<extern "C" fn() -> std::ffi::c_int>("answer", ()) };
		assert!(res.is_err());
	});
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].symbol.as_deref(), Some("answer"));
}

#[test]
fn test_success_is_quiet() {
	let records = capture(|| {
		let mut plugin = loaded();
		plugin.bind("answer").unwrap();
		unsafe { plugin.invoke::<extern "C" fn() -> std::ffi::c_int>("answer", ()) }.unwrap();
		plugin.unload();
	});
	assert!(records.is_empty());
}
