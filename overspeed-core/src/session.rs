//! Speed screen session
//!
//! Owns the screen's state cells (latest fix, error, threshold text) and
//! drives the flow between collaborators:
//!
//! ```text
//! mount → request permission → one-shot fix → watch → per-fix evaluation
//!                                                        │
//!                                   render ◄─────────────┤
//!                                   play_alert ◄─────────┘ (if alerting)
//! ```
//!
//! Every change to the fix or the threshold re-evaluates, re-renders, and
//! asks the alerter to play when the speed is above the threshold.
//! `unmount` releases the location subscription.

use core::fmt::Write;

use heapless::String;
use overspeed_protocol::InputEvent;

use crate::alert::AlertCooldown;
use crate::config::{OverspeedConfig, MAX_TITLE_LEN};
use crate::input::{EditResult, ThresholdEditor};
use crate::location::{Fix, WatchOptions};
use crate::speed::{DisplayModel, SpeedEvaluator, ThresholdInput, MAX_THRESHOLD_LEN};
use crate::state::{ErrorKind, Event, State};
use crate::traits::{
    AudioAlerter, LocationProvider, PermissionStatus, ScreenView, Subscription, ViewFrame,
};

/// Screen session composing location, audio, and view
pub struct Session<L, A, V> {
    location: L,
    audio: A,
    view: V,
    state: State,
    evaluator: SpeedEvaluator,
    cooldown: AlertCooldown,
    watch: WatchOptions,
    title: String<MAX_TITLE_LEN>,
    placeholder: String<MAX_THRESHOLD_LEN>,
    fix: Option<Fix>,
    error: Option<ErrorKind>,
    threshold: ThresholdInput,
    editor: ThresholdEditor,
    model: DisplayModel,
    prompt_open: bool,
    subscription: Option<Subscription>,
}

impl<L, A, V> Session<L, A, V>
where
    L: LocationProvider,
    A: AudioAlerter,
    V: ScreenView,
{
    /// Create a session from its collaborators and the device configuration
    pub fn new(location: L, audio: A, view: V, config: &OverspeedConfig) -> Self {
        let default_kmh = config.alert.default_threshold_kmh;

        let mut placeholder: String<MAX_THRESHOLD_LEN> = String::new();
        if write!(placeholder, "{}", default_kmh).is_err() {
            placeholder.clear();
        }

        Self {
            location,
            audio,
            view,
            state: State::Boot,
            evaluator: SpeedEvaluator::from_config(&config.alert),
            cooldown: AlertCooldown::new(config.alert.cooldown_ms),
            watch: config.location.watch_options(),
            title: config.display.title.clone(),
            placeholder,
            fix: None,
            error: None,
            threshold: ThresholdInput::with_default(default_kmh),
            editor: ThresholdEditor::new(),
            model: DisplayModel::idle(),
            prompt_open: false,
            subscription: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Current readout
    pub fn model(&self) -> &DisplayModel {
        &self.model
    }

    /// Current threshold text
    pub fn threshold(&self) -> &ThresholdInput {
        &self.threshold
    }

    /// Current error, if any
    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// Latest fix, if any
    pub fn fix(&self) -> Option<&Fix> {
        self.fix.as_ref()
    }

    /// True while the permission prompt is shown
    pub fn prompt_open(&self) -> bool {
        self.prompt_open
    }

    /// Access the location provider
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Mutable access to the location provider
    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    /// Access the audio alerter
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Access the view
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mount the screen and start asking for location access
    pub fn mount(&mut self, now_ms: u32) {
        self.transition(Event::Mounted);
        self.refresh(now_ms);
        self.poll(now_ms);
    }

    /// Advance the location flow
    ///
    /// Returns true if anything visible changed (the view has already been
    /// re-rendered in that case).
    pub fn poll(&mut self, now_ms: u32) -> bool {
        let mut changed = false;

        // Loop so a single poll can go permission → first fix → tracking
        loop {
            let before = self.state;

            match self.state {
                State::RequestingPermission => changed |= self.poll_permission(),
                State::Locating => changed |= self.poll_first_fix(),
                State::Tracking => changed |= self.poll_subscription(),
                State::Boot | State::Error(_) | State::Unmounted => {}
            }

            if self.state == before {
                break;
            }
        }

        if changed {
            self.refresh(now_ms);
        }
        changed
    }

    /// Handle an encoder event from the display
    ///
    /// While the permission prompt is open a click allows and a long press
    /// denies location access. Otherwise events edit the threshold text.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: u32) -> bool {
        if self.prompt_open {
            match event {
                InputEvent::EncoderClick => self.location.respond_to_prompt(true),
                InputEvent::EncoderLongPress => self.location.respond_to_prompt(false),
                _ => return false,
            }
            return self.poll(now_ms);
        }

        match self.editor.handle(event, &mut self.threshold) {
            EditResult::TextChanged => {
                self.refresh(now_ms);
                true
            }
            EditResult::CursorMoved => {
                self.render();
                true
            }
            EditResult::Unchanged => false,
        }
    }

    /// Tear the screen down, releasing the subscription
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.location.clear_watch(subscription);
        }
        self.prompt_open = false;
        self.transition(Event::Unmounted);
    }

    fn poll_permission(&mut self) -> bool {
        match self.location.request_permission() {
            PermissionStatus::Granted => {
                self.prompt_open = false;
                self.transition(Event::PermissionGranted);
                true
            }
            PermissionStatus::Denied => {
                self.prompt_open = false;
                self.transition(Event::PermissionDenied);
                true
            }
            PermissionStatus::Undetermined => {
                let opened = !self.prompt_open;
                self.prompt_open = true;
                opened
            }
        }
    }

    fn poll_first_fix(&mut self) -> bool {
        match self.location.current_position() {
            Ok(Some(fix)) => {
                self.fix = Some(fix);
                match self.location.watch_position(&self.watch) {
                    Ok(subscription) => {
                        self.subscription = Some(subscription);
                        self.transition(Event::FirstFix);
                    }
                    Err(_) => self.transition(Event::ProviderFailed),
                }
                true
            }
            Ok(None) => false,
            Err(_) => {
                self.transition(Event::ProviderFailed);
                true
            }
        }
    }

    fn poll_subscription(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_ref() else {
            return false;
        };

        // Last fix wins; earlier ones queued since the previous poll are superseded
        let mut latest = None;
        while let Some(fix) = self.location.next_fix(subscription) {
            latest = Some(fix);
        }

        match latest {
            Some(fix) => {
                self.fix = Some(fix);
                true
            }
            None => false,
        }
    }

    fn transition(&mut self, event: Event) {
        self.state = self.state.transition(event);
        if let State::Error(kind) = self.state {
            self.error = Some(kind);
        }
    }

    /// Re-evaluate, alert, and render
    fn refresh(&mut self, now_ms: u32) {
        self.model = match &self.fix {
            Some(fix) => self.evaluator.evaluate(fix.sample, &self.threshold),
            None => DisplayModel::idle(),
        };

        if self.model.alert_active && self.cooldown.try_trigger(now_ms) {
            self.audio.play_alert();
        }

        self.render();
    }

    fn render(&mut self) {
        let frame = ViewFrame {
            title: self.title.as_str(),
            error: self.error.map(|kind| kind.message()),
            threshold_text: self.threshold.as_str(),
            threshold_placeholder: self.placeholder.as_str(),
            cursor: self.editor.selected(),
            readout: &self.model,
            prompt_open: self.prompt_open,
        };
        self.view.render(&frame);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::InvalidThresholdPolicy;
    use crate::location::FixQuality;
    use crate::speed::SpeedSample;
    use crate::traits::LocationError;
    use std::collections::VecDeque;
    use std::string::{String as StdString, ToString};
    use std::vec::Vec;

    struct MockLocation {
        permission: PermissionStatus,
        prompt_answer: Option<bool>,
        current: Option<Fix>,
        queued: VecDeque<Fix>,
        watch_fails: bool,
        watching: bool,
        next_id: u8,
        cleared: Vec<u8>,
    }

    impl MockLocation {
        fn new(permission: PermissionStatus) -> Self {
            Self {
                permission,
                prompt_answer: None,
                current: None,
                queued: VecDeque::new(),
                watch_fails: false,
                watching: false,
                next_id: 1,
                cleared: Vec::new(),
            }
        }
    }

    impl LocationProvider for MockLocation {
        fn request_permission(&mut self) -> PermissionStatus {
            match self.prompt_answer {
                Some(true) => PermissionStatus::Granted,
                Some(false) => PermissionStatus::Denied,
                None => self.permission,
            }
        }

        fn respond_to_prompt(&mut self, granted: bool) {
            self.prompt_answer = Some(granted);
        }

        fn current_position(&mut self) -> Result<Option<Fix>, LocationError> {
            Ok(self.current.take())
        }

        fn watch_position(
            &mut self,
            _options: &WatchOptions,
        ) -> Result<Subscription, LocationError> {
            if self.watch_fails {
                return Err(LocationError::Unavailable);
            }
            if self.watching {
                return Err(LocationError::AlreadyWatching);
            }
            self.watching = true;
            let id = self.next_id;
            self.next_id += 1;
            Ok(Subscription::new(id))
        }

        fn next_fix(&mut self, _subscription: &Subscription) -> Option<Fix> {
            if self.watching {
                self.queued.pop_front()
            } else {
                None
            }
        }

        fn clear_watch(&mut self, subscription: Subscription) {
            self.watching = false;
            self.cleared.push(subscription.id());
        }
    }

    #[derive(Default)]
    struct MockAudio {
        plays: u32,
    }

    impl AudioAlerter for MockAudio {
        fn play_alert(&mut self) {
            self.plays += 1;
        }
    }

    #[derive(Default)]
    struct MockView {
        renders: u32,
        error: Option<StdString>,
        kmh: StdString,
        threshold: StdString,
        placeholder: StdString,
        alert: bool,
        prompt: bool,
    }

    impl ScreenView for MockView {
        fn render(&mut self, frame: &ViewFrame<'_>) {
            self.renders += 1;
            self.error = frame.error.map(|e| e.to_string());
            self.kmh = frame.readout.kilometers_per_hour.as_str().to_string();
            self.threshold = frame.threshold_text.to_string();
            self.placeholder = frame.threshold_placeholder.to_string();
            self.alert = frame.readout.alert_active;
            self.prompt = frame.prompt_open;
        }
    }

    type TestSession = Session<MockLocation, MockAudio, MockView>;

    fn fix(mps: f32, lat: f64, timestamp_ms: u32) -> Fix {
        Fix {
            latitude_deg: lat,
            longitude_deg: 18.0,
            sample: SpeedSample::new(mps),
            quality: FixQuality::Autonomous,
            timestamp_ms,
        }
    }

    fn session(location: MockLocation) -> TestSession {
        session_with(location, OverspeedConfig::default())
    }

    fn session_with(location: MockLocation, config: OverspeedConfig) -> TestSession {
        Session::new(location, MockAudio::default(), MockView::default(), &config)
    }

    fn tracking_session(first_mps: f32) -> TestSession {
        let mut location = MockLocation::new(PermissionStatus::Granted);
        location.current = Some(fix(first_mps, 59.0, 0));
        let mut session = session(location);
        session.mount(0);
        assert_eq!(session.state(), State::Tracking);
        session
    }

    #[test]
    fn test_initial_render_shows_default_threshold() {
        let mut session = session(MockLocation::new(PermissionStatus::Undetermined));
        session.mount(0);

        assert!(session.view().renders >= 1);
        assert_eq!(session.view().threshold, "50");
        assert_eq!(session.view().placeholder, "50");
        assert_eq!(session.view().kmh, "0.00");
        assert!(session.view().prompt);
        assert_eq!(session.state(), State::RequestingPermission);
    }

    #[test]
    fn test_granted_flow_reaches_tracking() {
        let session = tracking_session(10.0);
        assert_eq!(session.model().kilometers_per_hour.as_str(), "36.00");
        assert!(session.location().watching);
        assert!(session.error().is_none());
    }

    #[test]
    fn test_waits_for_first_fix() {
        let mut session = session(MockLocation::new(PermissionStatus::Granted));
        session.mount(0);
        assert_eq!(session.state(), State::Locating);
        assert!(!session.location().watching);

        session.location_mut().current = Some(fix(5.0, 59.0, 100));
        assert!(session.poll(100));
        assert_eq!(session.state(), State::Tracking);
        assert_eq!(session.model().meters_per_second.as_str(), "5.00");
    }

    #[test]
    fn test_permission_denied() {
        let mut session = session(MockLocation::new(PermissionStatus::Denied));
        session.location_mut().current = Some(fix(30.0, 59.0, 0));
        session.mount(0);

        assert_eq!(session.state(), State::Error(ErrorKind::PermissionDenied));
        assert_eq!(
            session.view().error.as_deref(),
            Some("Permission to access location was denied")
        );
        assert_eq!(session.view().kmh, "0.00");
        assert!(!session.view().alert);

        // No further location activity
        assert!(!session.poll(1000));
        assert!(session.fix().is_none());
        assert!(!session.location().watching);
        assert_eq!(session.audio().plays, 0);
    }

    #[test]
    fn test_prompt_click_grants() {
        let mut session = session(MockLocation::new(PermissionStatus::Undetermined));
        session.location_mut().current = Some(fix(1.0, 59.0, 0));
        session.mount(0);
        assert!(session.prompt_open());

        assert!(session.handle_input(InputEvent::EncoderClick, 10));
        assert!(!session.prompt_open());
        assert_eq!(session.state(), State::Tracking);
        // Prompt click must not have edited the threshold
        assert_eq!(session.threshold().as_str(), "50");
    }

    #[test]
    fn test_prompt_long_press_denies() {
        let mut session = session(MockLocation::new(PermissionStatus::Undetermined));
        session.mount(0);

        assert!(!session.handle_input(InputEvent::EncoderCw, 10));
        assert!(session.handle_input(InputEvent::EncoderLongPress, 20));
        assert_eq!(session.state(), State::Error(ErrorKind::PermissionDenied));
        assert!(session.view().error.is_some());
    }

    #[test]
    fn test_alert_on_each_sample_above_threshold() {
        let mut session = tracking_session(10.0);
        assert_eq!(session.audio().plays, 0);

        session.location_mut().queued.push_back(fix(15.0, 59.001, 1000));
        assert!(session.poll(1000));
        assert!(session.model().alert_active);
        assert!(session.view().alert);
        assert_eq!(session.audio().plays, 1);

        session.location_mut().queued.push_back(fix(16.0, 59.002, 2000));
        session.poll(2000);
        assert_eq!(session.audio().plays, 2);

        session.location_mut().queued.push_back(fix(10.0, 59.003, 3000));
        session.poll(3000);
        assert!(!session.view().alert);
        assert_eq!(session.audio().plays, 2);
    }

    #[test]
    fn test_last_fix_wins() {
        let mut session = tracking_session(1.0);
        session.location_mut().queued.push_back(fix(20.0, 59.001, 100));
        session.location_mut().queued.push_back(fix(2.0, 59.002, 200));

        session.poll(200);
        assert_eq!(session.model().meters_per_second.as_str(), "2.00");
        assert_eq!(session.audio().plays, 0);
    }

    #[test]
    fn test_no_new_fix_no_render() {
        let mut session = tracking_session(1.0);
        let renders = session.view().renders;
        assert!(!session.poll(100));
        assert_eq!(session.view().renders, renders);
    }

    #[test]
    fn test_threshold_edit_reevaluates() {
        // 12 m/s = 43.2 km/h, below 50
        let mut session = tracking_session(12.0);
        assert!(!session.model().alert_active);

        // Long press empties the field: default 50 applies, still below
        assert!(session.handle_input(InputEvent::EncoderLongPress, 100));
        assert_eq!(session.view().threshold, "");
        assert!(!session.model().alert_active);

        // Type "4": 43.2 > 4
        for _ in 0..4 {
            session.handle_input(InputEvent::EncoderCw, 110);
        }
        assert_eq!(session.audio().plays, 0);
        assert!(session.handle_input(InputEvent::EncoderClick, 120));
        assert_eq!(session.threshold().as_str(), "4");
        assert!(session.model().alert_active);
        assert_eq!(session.audio().plays, 1);
    }

    #[test]
    fn test_cursor_move_does_not_alert() {
        let mut session = tracking_session(20.0);
        session.handle_input(InputEvent::EncoderLongPress, 100);
        let plays = session.audio().plays;
        let renders = session.view().renders;

        assert!(session.handle_input(InputEvent::EncoderCw, 200));
        assert_eq!(session.audio().plays, plays);
        assert_eq!(session.view().renders, renders + 1);
    }

    #[test]
    fn test_non_numeric_threshold_suppresses_alert() {
        let mut session = tracking_session(30.0);
        assert!(session.model().alert_active);

        // Clear, then type "."
        session.handle_input(InputEvent::EncoderLongPress, 10);
        for _ in 0..10 {
            session.handle_input(InputEvent::EncoderCw, 10);
        }
        session.handle_input(InputEvent::EncoderClick, 20);
        assert_eq!(session.threshold().as_str(), ".");
        assert!(!session.model().alert_active);
    }

    #[test]
    fn test_non_numeric_threshold_with_default_policy() {
        let mut config = OverspeedConfig::default();
        config.alert.invalid_threshold = InvalidThresholdPolicy::UseDefault;

        let mut location = MockLocation::new(PermissionStatus::Granted);
        location.current = Some(fix(30.0, 59.0, 0));
        let mut session = session_with(location, config);
        session.mount(0);

        session.handle_input(InputEvent::EncoderLongPress, 10);
        for _ in 0..10 {
            session.handle_input(InputEvent::EncoderCw, 10);
        }
        session.handle_input(InputEvent::EncoderClick, 20);
        assert_eq!(session.threshold().as_str(), ".");
        assert!(session.model().alert_active);
    }

    #[test]
    fn test_cooldown_limits_clips() {
        let mut config = OverspeedConfig::default();
        config.alert.cooldown_ms = 3000;

        let mut location = MockLocation::new(PermissionStatus::Granted);
        location.current = Some(fix(20.0, 59.0, 0));
        let mut session = session_with(location, config);
        session.mount(0);
        assert_eq!(session.audio().plays, 1);

        session.location_mut().queued.push_back(fix(21.0, 59.001, 1000));
        session.poll(1000);
        assert!(session.model().alert_active);
        assert_eq!(session.audio().plays, 1);

        session.location_mut().queued.push_back(fix(22.0, 59.002, 3000));
        session.poll(3000);
        assert_eq!(session.audio().plays, 2);
    }

    #[test]
    fn test_unmount_releases_subscription() {
        let mut session = tracking_session(1.0);
        session.unmount();

        assert_eq!(session.state(), State::Unmounted);
        assert!(!session.location().watching);
        assert_eq!(session.location().cleared, [1]);

        // Nothing flows after teardown
        session.location_mut().queued.push_back(fix(40.0, 59.001, 100));
        assert!(!session.poll(100));
        assert_eq!(session.audio().plays, 0);
    }

    #[test]
    fn test_unmount_without_subscription() {
        let mut session = session(MockLocation::new(PermissionStatus::Undetermined));
        session.mount(0);
        session.unmount();
        assert_eq!(session.state(), State::Unmounted);
        assert!(session.location().cleared.is_empty());
    }

    #[test]
    fn test_watch_failure() {
        let mut location = MockLocation::new(PermissionStatus::Granted);
        location.current = Some(fix(1.0, 59.0, 0));
        location.watch_fails = true;
        let mut session = session(location);
        session.mount(0);

        assert_eq!(
            session.state(),
            State::Error(ErrorKind::LocationUnavailable)
        );
        assert_eq!(session.view().error.as_deref(), Some("Location is unavailable"));
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let mut session = tracking_session(15.0);
        let first = session.model().clone();
        session.handle_input(InputEvent::EncoderCw, 10);
        session.handle_input(InputEvent::EncoderCcw, 20);
        assert_eq!(session.model(), &first);
    }
}
