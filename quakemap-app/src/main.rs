use crossbeam_channel::{Receiver, TryRecvError};
use quakemap::{
    core::map::StatusMessage, FeedBundle, FeedLoader, MapError, QuakeMap, QuakeMapConfig,
    QuakeMapWidget, Result,
};
use std::time::Duration;
use tokio::runtime::Handle;

/// Standalone earthquake map viewer
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = QuakeMapConfig::from_env()?;
    let feeds = FeedLoader::new(&config)?.spawn(&Handle::current());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Earthquakes"),
        ..Default::default()
    };

    eframe::run_native(
        "quakemap-app",
        options,
        Box::new(move |_cc| Box::new(QuakeMapApp::new(config, feeds))),
    )?;

    Ok(())
}

struct QuakeMapApp {
    config: QuakeMapConfig,
    widget: QuakeMapWidget,
    /// Pending feed result; `None` once it has been handled.
    feeds: Option<Receiver<Result<FeedBundle>>>,
}

impl QuakeMapApp {
    fn new(config: QuakeMapConfig, feeds: Receiver<Result<FeedBundle>>) -> Self {
        let mut map = QuakeMap::new(&config);
        map.push_status(StatusMessage::info("Loading earthquake and plate feeds…"));

        Self {
            config,
            widget: QuakeMapWidget::new(map),
            feeds: Some(feeds),
        }
    }

    fn poll_feeds(&mut self) {
        let Some(rx) = &self.feeds else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(bundle)) => {
                let map = self.widget.map_mut();
                if let Err(err) = map.attach_feeds(&bundle) {
                    map.clear_status();
                    map.push_status(StatusMessage::error(err.to_string()));
                }
                self.feeds = None;
            }
            Ok(Err(err)) => {
                self.show_load_error(&err);
                self.feeds = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.show_load_error(&MapError::Fetch(
                    "feed loader stopped before delivering a result".to_string(),
                ));
                self.feeds = None;
            }
        }
    }

    fn show_load_error(&mut self, err: &MapError) {
        self.widget
            .set_map(QuakeMap::with_load_error(&self.config, err));
    }
}

impl eframe::App for QuakeMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_feeds();
        if self.feeds.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.widget.show(ui);
            });
    }
}
