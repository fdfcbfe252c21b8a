//! Progress reporting for debate execution

use colored::Colorize;
use debate_application::DebateProgressNotifier;
use debate_domain::RoundResponse;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Reports progress during a debate with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
    synthesis_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
            synthesis_spinner: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn status(response: &RoundResponse) -> String {
        if response.is_success() {
            format!("{} {}", "v".green(), response.model)
        } else {
            format!("{} {}", "x".red(), response.model)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: u32, total_rounds: u32, participants: usize) {
        let pb = self.multi.add(ProgressBar::new(participants as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(format!("Round {}/{}", round, total_rounds));
        pb.set_message("Waiting for models...");
        pb.enable_steady_tick(Duration::from_millis(120));

        *self.round_bar.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_model_complete(&self, response: &RoundResponse) {
        if let Some(pb) = self
            .round_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            pb.set_message(Self::status(response));
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, round: u32, failed: &[String]) {
        if let Some(pb) = self
            .round_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            let message = if failed.is_empty() {
                format!("Round {} complete!", round).green().to_string()
            } else {
                format!("Round {} complete ({} failed)", round, failed.len())
                    .yellow()
                    .to_string()
            };
            pb.finish_with_message(message);
        }
    }

    fn on_synthesis_start(&self, synthesizer: &str) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Synthesis");
        pb.set_message(synthesizer.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));

        *self
            .synthesis_spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_synthesis_attempt_failed(&self, model: &str, _error: &str) {
        if let Some(pb) = self
            .synthesis_spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            pb.set_message(format!("{} {} failed, trying next model", "x".red(), model));
        }
    }

    fn on_synthesis_complete(&self, model: Option<&str>, _synthesis: &str) {
        if let Some(pb) = self
            .synthesis_spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            let message = match model {
                Some(model) => format!("{} {}", "v".green(), model),
                None => "every synthesis attempt failed".red().to_string(),
            };
            pb.finish_with_message(message);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DebateProgressNotifier for SimpleProgress {
    fn on_round_start(&self, round: u32, total_rounds: u32, participants: usize) {
        println!(
            "{} {} ({} models)",
            "->".cyan(),
            format!("Round {}/{}", round, total_rounds).bold(),
            participants
        );
    }

    fn on_model_complete(&self, response: &RoundResponse) {
        match &response.error {
            None => println!("  {} {}", "v".green(), response.model),
            Some(error) => println!("  {} {} ({})", "x".red(), response.model, error),
        }
    }

    fn on_round_complete(&self, _round: u32, _failed: &[String]) {
        println!();
    }

    fn on_synthesis_start(&self, synthesizer: &str) {
        println!("{} {} ({})", "->".cyan(), "Synthesis".bold(), synthesizer);
    }

    fn on_synthesis_attempt_failed(&self, model: &str, error: &str) {
        println!("  {} {} ({})", "x".red(), model, error);
    }

    fn on_synthesis_complete(&self, model: Option<&str>, _synthesis: &str) {
        match model {
            Some(model) => println!("  {} {}", "v".green(), model),
            None => println!("  {} no model could synthesize", "x".red()),
        }
        println!();
    }
}
