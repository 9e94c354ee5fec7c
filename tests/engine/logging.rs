//! Turns run under a tracing subscriber.

use std::io;
use std::sync::{Arc, Mutex};

use gridline_engine::{advance, run};
use gridline_foundation::Action;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::builder;

/// Shared in-memory sink for formatted log lines.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut inner) = self.0.lock() {
            inner.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn turns_emit_turn_damage_and_lose_events() {
    let capture = Capture::default();
    let sink = capture.clone();
    let guard = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .with_max_level(LevelFilter::TRACE)
        .set_default();

    let mut b = builder(4, 4);
    let agent = b.spawn().at(0, 0).agent().health(1, 1).finish();
    b.spawn().at(2, 0).lethal().finish();
    let w = run(&b.build().unwrap(), agent, &[Action::Right, Action::Right]);
    assert!(w.lose());

    let skipped = advance(&w, Action::Wait, agent);
    assert_eq!(skipped, w);
    drop(guard);

    let logged = capture.contents();
    assert!(logged.contains("world built"), "{logged}");
    assert!(logged.contains("turn=1"), "{logged}");
    assert!(logged.contains("turn=2"), "{logged}");
    assert!(logged.contains("damage"), "{logged}");
    assert!(logged.contains("lose"), "{logged}");
    assert!(logged.contains("turn skipped"), "{logged}");
}
