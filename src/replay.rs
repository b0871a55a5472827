//! Scripted touch sequences.
//!
//! A script is a JSON array of steps, each with a `kind` and a `time_ms` on a shared timeline:
//!
//! ```json
//! [
//!     {"kind": "down", "x": 200, "y": 30, "time_ms": 0},
//!     {"kind": "move", "x": 150, "y": 29, "time_ms": 16},
//!     {"kind": "up", "x": 150, "y": 29, "time_ms": 32},
//!     {"kind": "frame", "time_ms": 400}
//! ]
//! ```

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{ensure, Context};
use serde::Deserialize;
use slidewrap_config::Config;

use crate::animation::Clock;
use crate::wrapper::{
    Callback, Event, Host, RevealElement, Size, SlideWrapper, TouchEvent, TouchPhase, WrapperId,
};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Step {
    Down { x: f64, y: f64, time_ms: u64 },
    Move { x: f64, y: f64, time_ms: u64 },
    Up { x: f64, y: f64, time_ms: u64 },
    Cancel { x: f64, y: f64, time_ms: u64 },
    /// Advances the snap animation.
    Frame { time_ms: u64 },
    /// Closes the wrapper programmatically.
    Close { time_ms: u64 },
}

/// Something observable that happened during a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Click,
    LongClick,
    Lifecycle(Event),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub time: Duration,
    pub output: Output,
}

/// Fixed-size element with no behavior of its own.
#[derive(Debug)]
pub struct Block {
    size: Size,
    enabled: bool,
}

/// Host that runs long-press timers on the replay timeline.
#[derive(Debug, Default)]
pub struct ReplayHost {
    now: Duration,
    long_press_at: Option<Duration>,
    outputs: Vec<Output>,
}

#[derive(Debug, Clone, Default)]
struct EventSink(Rc<RefCell<Vec<Event>>>);

pub struct Replay {
    wrapper: SlideWrapper<Block, ReplayHost>,
    clock: Clock,
    events: EventSink,
    now: Duration,
}

impl Step {
    pub fn time(&self) -> Duration {
        let time_ms = match *self {
            Step::Down { time_ms, .. }
            | Step::Move { time_ms, .. }
            | Step::Up { time_ms, .. }
            | Step::Cancel { time_ms, .. }
            | Step::Frame { time_ms }
            | Step::Close { time_ms } => time_ms,
        };
        Duration::from_millis(time_ms)
    }

    fn touch_event(&self) -> Option<TouchEvent> {
        let (phase, x, y) = match *self {
            Step::Down { x, y, .. } => (TouchPhase::Down, x, y),
            Step::Move { x, y, .. } => (TouchPhase::Move, x, y),
            Step::Up { x, y, .. } => (TouchPhase::Up, x, y),
            Step::Cancel { x, y, .. } => (TouchPhase::Cancel, x, y),
            Step::Frame { .. } | Step::Close { .. } => return None,
        };
        Some(TouchEvent::new(phase, glam::DVec2::new(x, y), self.time()))
    }
}

/// Parses a script and checks that its steps are in time order.
pub fn parse_script(text: &str) -> anyhow::Result<Vec<Step>> {
    let steps: Vec<Step> = serde_json::from_str(text).context("error parsing script")?;

    for (idx, pair) in steps.windows(2).enumerate() {
        ensure!(
            pair[0].time() <= pair[1].time(),
            "step {} goes back in time ({:?} after {:?})",
            idx + 1,
            pair[1].time(),
            pair[0].time(),
        );
    }

    Ok(steps)
}

pub fn load_script(path: &Path) -> anyhow::Result<Vec<Step>> {
    let text = fs::read_to_string(path).with_context(|| format!("error reading {path:?}"))?;
    parse_script(&text).with_context(|| format!("error loading {path:?}"))
}

impl Block {
    pub fn new(w: i32, h: i32) -> Self {
        Self {
            size: Size::new(w, h),
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl RevealElement for Block {
    fn measured_size(&self) -> Size {
        self.size
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Host for ReplayHost {
    fn schedule_long_press(&mut self, delay: Duration) {
        self.long_press_at = Some(self.now + delay);
    }

    fn cancel_long_press(&mut self) {
        self.long_press_at = None;
    }

    fn perform_click(&mut self) {
        self.outputs.push(Output::Click);
    }

    fn perform_long_click(&mut self) {
        self.outputs.push(Output::LongClick);
    }

    fn request_disallow_intercept(&mut self, disallow: bool) {
        trace!("parent intercept disallowed: {disallow}");
    }

    fn request_frame(&mut self) {}

    fn deliver_to_child(&mut self, _event: &TouchEvent) -> bool {
        false
    }
}

impl Callback for EventSink {
    fn on_completely_open(&mut self, _id: WrapperId) {
        self.0.borrow_mut().push(Event::CompletelyOpen);
    }

    fn on_complete_closed(&mut self, _id: WrapperId) {
        self.0.borrow_mut().push(Event::CompleteClosed);
    }

    fn on_pull_back(&mut self, _id: WrapperId) {
        self.0.borrow_mut().push(Event::PullBack);
    }
}

impl Replay {
    pub fn new(config: &Config, content: Size, control_widths: &[i32]) -> Self {
        let clock = Clock::with_time(Duration::ZERO);
        let controls = control_widths.iter().map(|w| Block::new(*w, content.h)).collect();

        let mut wrapper = SlideWrapper::new(
            config,
            clock.clone(),
            ReplayHost::default(),
            Block::new(content.w, content.h),
            controls,
        );
        let events = EventSink::default();
        wrapper.set_callback(events.clone());

        Self {
            wrapper,
            clock,
            events,
            now: Duration::ZERO,
        }
    }

    pub fn wrapper(&self) -> &SlideWrapper<Block, ReplayHost> {
        &self.wrapper
    }

    /// Runs the steps in order and returns everything observable they caused.
    pub fn run(&mut self, steps: &[Step]) -> Vec<Record> {
        let _span = tracy_client::span!("Replay::run");

        let mut records = Vec::new();
        for step in steps {
            self.fire_long_press(step.time(), &mut records);
            self.set_time(step.time());

            match step {
                Step::Frame { .. } => self.wrapper.advance_animations(),
                Step::Close { .. } => self.wrapper.close(),
                _ => {
                    if let Some(event) = step.touch_event() {
                        self.wrapper.process_touch(&event);
                    }
                }
            }

            self.collect(&mut records);
        }

        records
    }

    fn set_time(&mut self, time: Duration) {
        self.now = self.now.max(time);
        self.clock.set_time(self.now);
        self.wrapper.host_mut().now = self.now;
    }

    fn fire_long_press(&mut self, until: Duration, records: &mut Vec<Record>) {
        let Some(at) = self.wrapper.host().long_press_at else {
            return;
        };
        if at > until {
            return;
        }

        self.wrapper.host_mut().long_press_at = None;
        self.set_time(at);
        self.wrapper.on_long_press_timeout();
        self.collect(records);
    }

    fn collect(&mut self, records: &mut Vec<Record>) {
        let time = self.now;
        let host_outputs = self.wrapper.host_mut().outputs.drain(..);
        let events = self.events.0.take().into_iter().map(Output::Lifecycle);

        records.extend(host_outputs.chain(events).map(|output| Record { time, output }));
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.output {
            Output::Click => "click",
            Output::LongClick => "long click",
            Output::Lifecycle(Event::CompletelyOpen) => "completely open",
            Output::Lifecycle(Event::CompleteClosed) => "complete closed",
            Output::Lifecycle(Event::PullBack) => "pull back",
        };
        write!(f, "{} ms: {what}", self.time.as_millis())
    }
}
