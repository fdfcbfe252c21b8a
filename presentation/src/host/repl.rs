//! Line-editor loop for the host's turns

use crate::ConsoleFormatter;
use colored::Colorize;
use debate_application::{
    DebateError, DebateProgressNotifier, HostTurnOutcome, InteractiveDebateUseCase, LlmGateway,
    RunDebateInput,
};
use debate_domain::DebateResult;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

/// What the host typed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HostInput {
    Turn(String),
    Quit,
    Help,
    Empty,
}

impl HostInput {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" => HostInput::Empty,
            "/quit" | "/exit" | "/q" => HostInput::Quit,
            "/help" | "/h" | "/?" => HostInput::Help,
            text => HostInput::Turn(text.to_string()),
        }
    }
}

/// Interactive debate driven from the terminal
pub struct HostRepl<'a, G: LlmGateway + 'static> {
    use_case: &'a InteractiveDebateUseCase<G>,
    progress: &'a dyn DebateProgressNotifier,
}

impl<'a, G: LlmGateway + 'static> HostRepl<'a, G> {
    pub fn new(
        use_case: &'a InteractiveDebateUseCase<G>,
        progress: &'a dyn DebateProgressNotifier,
    ) -> Self {
        Self { use_case, progress }
    }

    /// Run a debate to completion.
    ///
    /// Returns `Ok(None)` if the host quit early; the session is deleted in
    /// that case.
    pub async fn run(&self, input: RunDebateInput) -> Result<Option<DebateResult>, DebateError> {
        let mut editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("host".to_string()),
            DefaultPromptSegment::Empty,
        );

        let first = self.use_case.start(input, self.progress).await?;
        let session_id = first.session_id.clone();
        println!("{}", ConsoleFormatter::format_round(&first));
        Self::print_help();

        loop {
            let line = match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => line,
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(Signal::CtrlD) => {
                    self.abandon(&session_id);
                    return Ok(None);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    self.abandon(&session_id);
                    return Ok(None);
                }
            };

            let turn = match HostInput::parse(&line) {
                HostInput::Turn(turn) => turn,
                HostInput::Empty => {
                    println!("{}", "Your turn cannot be empty.".yellow());
                    continue;
                }
                HostInput::Help => {
                    Self::print_help();
                    continue;
                }
                HostInput::Quit => {
                    self.abandon(&session_id);
                    return Ok(None);
                }
            };

            match self
                .use_case
                .submit_host_response(&session_id, &turn, self.progress)
                .await?
            {
                HostTurnOutcome::NextRound(update) => {
                    println!("{}", ConsoleFormatter::format_round(&update));
                }
                HostTurnOutcome::Complete(result) => return Ok(Some(result)),
            }
        }
    }

    fn abandon(&self, session_id: &str) {
        self.use_case.abandon(session_id);
        println!("Debate abandoned.");
    }

    fn print_help() {
        println!();
        println!("Add your own turn to this round and press Enter.");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Abandon the debate (Ctrl-D also works)");
        println!();
    }
}
