//! Screen view that streams to the display terminal

use overspeed_core::traits::{ScreenView, ViewFrame};
use overspeed_display::{Screen, SpeedScreen};

use crate::channels::SCREEN_UPDATE;

/// Renders into a local screen and hands changed content to the TX task
pub struct LinkView {
    view: SpeedScreen,
    sent: Screen,
}

impl LinkView {
    pub fn new() -> Self {
        Self {
            view: SpeedScreen::new(),
            sent: Screen::new(),
        }
    }

    /// Show the splash screen
    pub fn boot(&mut self, title: &str) {
        self.view.render_boot(title);
        self.publish();
    }

    fn publish(&mut self) {
        let screen = self.view.screen();
        if *screen != self.sent {
            self.sent = screen.clone();
            SCREEN_UPDATE.signal(screen.clone());
        }
    }
}

impl ScreenView for LinkView {
    fn render(&mut self, frame: &ViewFrame<'_>) {
        self.view.render(frame);
        self.publish();
    }
}
