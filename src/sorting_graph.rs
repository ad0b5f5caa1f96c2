use std::io::Write;
use std::sync::mpsc::Sender;

use colored::{ColoredString, Colorize};
use crossterm::terminal;

use crate::algorithm::{AlgorithmDescriptor, AlgorithmId};
use crate::audio::{tone_for, AudioSignal};
use crate::config::{DEFAULT_ARRAY_SIZE, DEFAULT_SPEED, VALUE_RANGE};
use crate::error::Result;
use crate::playback::PlaybackState;
use crate::presenter::{BarState, ControlsEnabled, Presenter};
use crate::stats::StatsSnapshot;

const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 5;
const MIN_GRAPH_HEIGHT: u16 = 4;
const PROGRESS_WIDTH: usize = 40;
/// Bars carry their value underneath up to this many bars.
const LABEL_MAX_BARS: usize = 30;
const LABEL_WIDTH: usize = 4;
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Bar chart drawn straight into a terminal. Calls only update the model;
/// the whole frame is rebuilt into one buffer and written on `present`.
pub struct SortGraph<W: Write> {
    out: W,
    descriptor: &'static AlgorithmDescriptor,
    values: Vec<u32>,
    states: Vec<BarState>,
    max_height: u32,
    progress: f64,
    stats: StatsSnapshot,
    controls: ControlsEnabled,
    array_size: usize,
    speed: u8,
    fixed_size: Option<(u16, u16)>,
    audio_sender: Option<Sender<AudioSignal>>, // Audio sender for live updates
    dirty: bool,
}

impl<W: Write> SortGraph<W> {
    pub fn new(out: W) -> Self {
        SortGraph {
            out,
            descriptor: AlgorithmId::Bubble.descriptor(),
            values: Vec::new(),
            states: Vec::new(),
            max_height: VALUE_RANGE.end,
            progress: 0.0,
            stats: StatsSnapshot::default(),
            controls: ControlsEnabled::for_state(PlaybackState::Idle),
            array_size: DEFAULT_ARRAY_SIZE,
            speed: DEFAULT_SPEED,
            fixed_size: None,
            audio_sender: None,
            dirty: true,
        }
    }

    /// Draws into a `cols` x `rows` area instead of asking the terminal.
    pub fn with_size(mut self, cols: u16, rows: u16) -> Self {
        self.fixed_size = Some((cols, rows));
        self
    }

    pub fn with_audio(mut self, sender: Sender<AudioSignal>) -> Self {
        self.audio_sender = Some(sender);
        self
    }

    fn update_audio(&self, signal: AudioSignal) {
        if let Some(ref sender) = self.audio_sender {
            // a closed channel only means the audio thread is gone
            sender.send(signal).unwrap_or_default();
        }
    }

    fn size(&self) -> (u16, u16) {
        self.fixed_size
            .or_else(|| terminal::size().ok())
            .unwrap_or(FALLBACK_SIZE)
    }

    fn bar_height(&self, value: u32, graph_height: u16) -> u16 {
        let scaled = (value as u64 * graph_height as u64).div_ceil(self.max_height.max(1) as u64);
        scaled.min(graph_height as u64) as u16
    }

    fn styled(symbol: &str, state: BarState) -> ColoredString {
        match state {
            BarState::None => symbol.white(),
            BarState::Comparing => symbol.bright_yellow(),
            BarState::Swapping => symbol.bright_red(),
            BarState::Pivot => symbol.magenta(),
            BarState::Sorted => symbol.green(),
        }
    }

    /// One full frame, rows separated by `\r\n` so it renders in raw mode.
    pub fn frame(&self, cols: u16, rows: u16) -> String {
        let mut buffer = String::new();
        let cols = cols as usize;
        let descriptor = self.descriptor;

        buffer += &format!(
            "{}  best {}  average {}  worst {}  space {}\x1B[K\r\n",
            descriptor.name.bold(),
            descriptor.best,
            descriptor.average,
            descriptor.worst,
            descriptor.space
        );
        buffer += &format!("{}\x1B[K\r\n\x1B[K\r\n", descriptor.description.dimmed());

        let graph_height = rows
            .saturating_sub(HEADER_ROWS + FOOTER_ROWS)
            .max(MIN_GRAPH_HEIGHT);
        let column = (cols / self.values.len().max(1)).clamp(1, LABEL_WIDTH);
        let (fill, blank) = match column {
            4 => ("[x] ", "    "),
            3 => ("[x]", "   "),
            2 => ("[]", "  "),
            _ => ("#", " "),
        };
        let visible = self.values.len().min(cols / column);
        let heights: Vec<u16> = self.values[..visible]
            .iter()
            .map(|&val| self.bar_height(val, graph_height))
            .collect();

        for y in 0..graph_height {
            let y_pos = graph_height - y;
            for (x, height) in heights.iter().enumerate() {
                if *height >= y_pos {
                    let state = self.states.get(x).copied().unwrap_or_default();
                    buffer += &format!("{}", Self::styled(fill, state));
                } else {
                    buffer.push_str(blank);
                }
            }
            buffer.push_str("\x1B[K\r\n");
        }

        // values fit under their bars only at full column width
        if self.values.len() <= LABEL_MAX_BARS && column == LABEL_WIDTH {
            for val in &self.values[..visible] {
                buffer += &format!("{:>3} ", val);
            }
        }
        buffer += &format!(
            "\x1B[K\r\ncomparisons {}  swaps {}  array accesses {}  time {}ms\x1B[K\r\n",
            self.stats.comparisons, self.stats.swaps, self.stats.array_accesses, self.stats.elapsed_ms
        );

        let width = PROGRESS_WIDTH.min(cols.saturating_sub(8)).max(1);
        let filled = ((self.progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
        buffer += &format!(
            "[{}{}] {:>3}%\x1B[K\r\n",
            "#".repeat(filled).as_str().green(),
            "-".repeat(width - filled),
            (self.progress * 100.0).round() as u32
        );

        let legend: Vec<String> = AlgorithmId::ALL
            .iter()
            .enumerate()
            .map(|(i, algorithm)| format!("{} {}", i + 1, algorithm.id()))
            .collect();
        buffer += &format!(
            "size {}  speed {}  {}  g new array\x1B[K\r\n",
            self.array_size,
            self.speed,
            legend.join("  ")
        );
        buffer += &format!(
            "{}  {}  {}  {}\x1B[K",
            Self::control("space/p play", self.controls.play),
            Self::control("space/s pause", self.controls.pause),
            Self::control("r reset", self.controls.reset),
            "q quit"
        );
        buffer
    }

    fn control(label: &str, enabled: bool) -> ColoredString {
        if enabled {
            label.bold()
        } else {
            label.dimmed()
        }
    }
}

impl<W: Write> Presenter for SortGraph<W> {
    fn render_all_bars(&mut self, values: &[u32]) -> Result<()> {
        self.values = values.to_vec();
        self.states = vec![BarState::None; values.len()];
        self.dirty = true;
        Ok(())
    }

    fn render_bar(&mut self, index: usize, value: u32) -> Result<()> {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
            self.dirty = true;
        }
        Ok(())
    }

    fn set_bar_state(&mut self, index: usize, state: BarState) -> Result<()> {
        if let Some(slot) = self.states.get_mut(index) {
            *slot = state;
            self.dirty = true;
        }
        if matches!(state, BarState::Comparing | BarState::Swapping) {
            if let Some(&value) = self.values.get(index) {
                self.update_audio(AudioSignal::Tone(tone_for(value, self.max_height)));
            }
        }
        Ok(())
    }

    fn clear_bar_states(&mut self) -> Result<()> {
        self.states.iter_mut().for_each(|state| *state = BarState::None);
        self.dirty = true;
        Ok(())
    }

    fn set_progress(&mut self, fraction: f64) -> Result<()> {
        self.progress = fraction;
        self.dirty = true;
        Ok(())
    }

    fn set_statistics(&mut self, stats: StatsSnapshot) -> Result<()> {
        self.stats = stats;
        self.dirty = true;
        Ok(())
    }

    fn set_controls(&mut self, controls: ControlsEnabled) -> Result<()> {
        if !controls.pause {
            self.update_audio(AudioSignal::Silence);
        }
        self.controls = controls;
        self.dirty = true;
        Ok(())
    }

    fn set_algorithm_info(&mut self, descriptor: &'static AlgorithmDescriptor) -> Result<()> {
        self.descriptor = descriptor;
        self.dirty = true;
        Ok(())
    }

    fn set_array_size(&mut self, size: usize) -> Result<()> {
        self.array_size = size;
        self.dirty = true;
        Ok(())
    }

    fn set_speed(&mut self, speed: u8) -> Result<()> {
        self.speed = speed;
        self.dirty = true;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let (cols, rows) = self.size();
        let mut buffer = String::new();
        // Hide the cursor and move it to the top-left
        buffer.push_str("\x1B[?25l\x1B[H");
        buffer += &self.frame(cols, rows);
        // Clear whatever is left below the frame
        buffer.push_str("\x1B[J");

        self.out.write_all(buffer.as_bytes())?;
        self.out.flush()?;
        self.dirty = false;
        Ok(())
    }
}
