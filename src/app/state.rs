use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crossterm::event::KeyCode;
use tracing::{debug, info, warn};

use crate::color::{self, Hsl, Rgb};
use crate::palette::{self, Palette};
use crate::presets::{self, Preset};
use crate::sampler::{ColorSampler, PickHandle, SamplingError};

use super::{AppEvent, AppView, FocusMode};

type SampleResult = Result<Rgb, SamplingError>;

/// A pick running on a worker thread.
struct PendingSample {
    result: Receiver<SampleResult>,
    pick: PickHandle,
}

/// The top-level application state.
pub struct App {
    pub running: bool,
    pub view: AppView,
    pub focus_mode: FocusMode,
    pub input: String,
    pub base: Option<Rgb>,
    pub base_hsl: Option<Hsl>,
    pub palette: Option<Palette>,
    pub presets: Vec<Preset>,
    pub selected_preset_index: usize,
    pub status: Option<String>,
    sampler: Arc<dyn ColorSampler>,
    pending_sample: Option<PendingSample>,
}

impl App {
    pub fn new(sampler: Arc<dyn ColorSampler>, presets: Vec<Preset>, initial: Option<Rgb>) -> Self {
        let mut app = Self {
            running: true,
            view: AppView::Styler,
            focus_mode: FocusMode::Browse,
            input: String::new(),
            base: None,
            base_hsl: None,
            palette: None,
            presets,
            selected_preset_index: 0,
            status: None,
            sampler,
            pending_sample: None,
        };
        if let Some(color) = initial {
            app.apply_color(color);
        }
        app
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.poll_sample(),
            AppEvent::KeyPress(key) => self.handle_key(key),
        }
    }

    pub fn is_sampling(&self) -> bool {
        self.pending_sample.is_some()
    }

    pub fn input_is_valid(&self) -> bool {
        color::is_valid_hex(&self.input)
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.focus_mode == FocusMode::Input {
            self.handle_input_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') => {
                self.cancel_sample();
                self.running = false;
            }
            KeyCode::Char('?') => {
                self.view = match self.view {
                    AppView::Help => AppView::Styler,
                    AppView::Styler => AppView::Help,
                };
            }
            KeyCode::Esc if self.is_sampling() => self.cancel_sample(),
            KeyCode::Esc => self.view = AppView::Styler,
            _ if self.view == AppView::Help => {}
            KeyCode::Char('i') | KeyCode::Char('/') => {
                self.focus_mode = FocusMode::Input;
                self.clear_status();
            }
            KeyCode::Char('e') => self.start_sample(),
            KeyCode::Char('r') => self.apply_random_preset(),
            KeyCode::Char('c') => {
                self.input.clear();
                self.clear_status();
            }
            KeyCode::Up => self.select_prev_preset(),
            KeyCode::Down => self.select_next_preset(),
            KeyCode::Enter => self.apply_selected_preset(),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter => self.focus_mode = FocusMode::Browse,
            KeyCode::Backspace | KeyCode::Delete => {
                self.input.pop();
                self.regenerate();
            }
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                self.input.push(ch);
                self.regenerate();
            }
            _ => {}
        }
    }

    /// Rebuild the palette from the input field. Invalid input keeps the old palette.
    fn regenerate(&mut self) {
        let Ok(base) = self.input.parse::<Rgb>() else {
            debug!(input = %self.input, "input is not a color yet");
            return;
        };
        let hsl = color::to_hsl(base);
        self.base = Some(base);
        self.base_hsl = Some(hsl);
        self.palette = Some(palette::generate(base));
        info!(%base, h = hsl.h, s = hsl.s, l = hsl.l, "palette regenerated");
    }

    fn apply_color(&mut self, color: Rgb) {
        self.input = color.to_string();
        self.regenerate();
    }

    fn start_sample(&mut self) {
        if self.is_sampling() {
            self.status = Some("Already picking a color.".to_string());
            return;
        }
        if !self.sampler.is_supported() {
            warn!("color picker requested but none is available");
            self.status = Some(format!(
                "{}. Set [sampler] command in config.toml or pass --sampler.",
                capitalize(&SamplingError::Unsupported.to_string())
            ));
            return;
        }

        let sampler = Arc::clone(&self.sampler);
        let pick = PickHandle::default();
        let (tx, rx) = mpsc::channel();
        {
            let pick = pick.clone();
            thread::spawn(move || {
                // Receiver is gone once the pick was cancelled.
                let _ = tx.send(sampler.sample(&pick));
            });
        }
        info!("color picker started");
        self.pending_sample = Some(PendingSample { result: rx, pick });
        self.status = Some("Picking a color...".to_string());
    }

    fn poll_sample(&mut self) {
        let Some(pending) = &self.pending_sample else {
            return;
        };
        let result = match pending.result.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(SamplingError::Failed(
                "picker thread exited without a result".to_string(),
            )),
        };
        self.pending_sample = None;
        self.finish_sample(result);
    }

    /// Kill a running pick. A result that already arrived is dropped too.
    fn cancel_sample(&mut self) {
        let Some(pending) = self.pending_sample.take() else {
            return;
        };
        pending.pick.cancel();
        info!("color picking cancelled");
        self.status = Some(capitalize(&SamplingError::Cancelled.to_string()));
    }

    fn finish_sample(&mut self, result: SampleResult) {
        match result {
            Ok(color) => {
                info!(%color, "color picked");
                self.apply_color(color);
                self.status = Some(format!("Picked {color}."));
            }
            Err(err) => {
                warn!(error = %err, "color picking failed");
                self.status = Some(capitalize(&err.to_string()));
            }
        }
    }

    fn select_prev_preset(&mut self) {
        if self.presets.is_empty() {
            return;
        }
        if self.selected_preset_index == 0 {
            self.selected_preset_index = self.presets.len() - 1;
        } else {
            self.selected_preset_index -= 1;
        }
    }

    fn select_next_preset(&mut self) {
        if self.presets.is_empty() {
            return;
        }
        self.selected_preset_index = (self.selected_preset_index + 1) % self.presets.len();
    }

    fn apply_selected_preset(&mut self) {
        let Some(preset) = self.presets.get(self.selected_preset_index) else {
            return;
        };
        let (name, color) = (preset.name.clone(), preset.color);
        self.apply_color(color);
        self.status = Some(format!("Preset {name} ({color})."));
    }

    fn apply_random_preset(&mut self) {
        let Some(index) = presets::random_index(&self.presets) else {
            self.status = Some("No presets configured.".to_string());
            return;
        };
        self.selected_preset_index = index;
        self.apply_selected_preset();
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.cancel_sample();
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
