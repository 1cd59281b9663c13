use std::fmt::Write as _;

use services::{AppServices, QuizServiceError, TrainingSession};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use training_core::model::{AnswerLetter, PendingQuestion, TrainingModule};
use training_core::quiz::GradeOutcome;

use crate::commands::{self, Command, CommandError, HELP};

const WELCOME: &str = "\
SkyHigh AI Training
Master each section with two correct answers in a row to unlock the next.
Start with `register <full name> | <email>`, then `quiz 1`. Type `help` for all commands.
";

/// What one command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub quit: bool,
}

impl Response {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }

    fn error(err: impl std::fmt::Display) -> Self {
        Self::say(format!("Error: {err}"))
    }
}

/// Interactive front end over one `TrainingSession`.
pub struct Shell {
    services: AppServices,
    session: TrainingSession,
}

impl Shell {
    #[must_use]
    pub fn new(services: AppServices) -> Self {
        Self {
            services,
            session: TrainingSession::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &TrainingSession {
        &self.session
    }

    /// Read commands line by line until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an IO error if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(WELCOME.as_bytes()).await?;
        let mut lines = input.lines();

        loop {
            output.write_all(b"> ").await?;
            output.flush().await?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let response = match commands::parse(&line) {
                Ok(command) => self.handle(command).await,
                Err(CommandError::Empty) => continue,
                Err(err) => Response::say(err.to_string()),
            };
            output.write_all(response.text.as_bytes()).await?;
            output.write_all(b"\n").await?;
            if response.quit {
                break;
            }
        }

        output.flush().await
    }

    pub async fn handle(&mut self, command: Command) -> Response {
        match command {
            Command::Help => Response::say(HELP),
            Command::Status => Response::say(render_status(&self.session)),
            Command::Register { full_name, email } => self.register(&full_name, &email).await,
            Command::Quiz(module) => self.start_quiz(module).await,
            Command::Question => self.show_question().await,
            Command::Answer(choice) => self.answer(choice).await,
            Command::Ask(question) => self.ask(&question).await,
            Command::Certificate => Response::say(render_certificate(&self.session)),
            Command::Reset => {
                self.services.quiz().reset(&mut self.session).await;
                Response::say("Progress reset. You are back at Section 1.")
            }
            Command::Quit => Response {
                text: "Blue skies!".to_string(),
                quit: true,
            },
        }
    }

    async fn register(&mut self, full_name: &str, email: &str) -> Response {
        match self
            .services
            .registration()
            .begin_training(&mut self.session, full_name, email)
            .await
        {
            Ok(trainee) => Response::say(format!(
                "Welcome aboard, {}. Progress for {} is saved at stage {}.",
                trainee.full_name(),
                trainee.email(),
                trainee.current_stage()
            )),
            Err(err) => Response::say(format!("Warning: {err}")),
        }
    }

    async fn start_quiz(&mut self, module: TrainingModule) -> Response {
        match self.services.quiz().start(&mut self.session, module).await {
            Ok(question) => Response::say(render_question(&question)),
            Err(err) => question_error(&err),
        }
    }

    async fn show_question(&mut self) -> Response {
        match self.services.quiz().current_question(&mut self.session).await {
            Ok(question) => Response::say(render_question(&question)),
            Err(err) => question_error(&err),
        }
    }

    async fn answer(&mut self, choice: Option<AnswerLetter>) -> Response {
        let quiz = self.services.quiz();
        let outcome = match quiz.submit(&mut self.session, choice).await {
            Ok(outcome) => outcome,
            Err(err) => return Response::error(err),
        };

        let mut text = render_outcome(&outcome);
        if outcome.module_completed {
            if outcome.graduated() {
                text.push_str("\n\n");
                text.push_str(&render_certificate(&self.session));
            } else if let Some(next) = outcome.next_module {
                let _ = write!(text, "\nType `quiz {}` to begin {next}.", next.number());
            }
            return Response::say(text);
        }

        text.push_str("\n\n");
        match quiz.current_question(&mut self.session).await {
            Ok(question) => text.push_str(&render_question(&question)),
            Err(err) => text.push_str(&question_error(&err).text),
        }
        Response::say(text)
    }

    async fn ask(&mut self, question: &str) -> Response {
        match self.services.assistant().ask(&mut self.session, question).await {
            Ok(turn) => Response::say(format!("Mentor: {}", turn.answer)),
            Err(err) => Response::error(err),
        }
    }
}

fn question_error(err: &QuizServiceError) -> Response {
    match err {
        QuizServiceError::Provision(_) => Response::say(format!(
            "Error: {err}\nType `question` to try again."
        )),
        _ => Response::error(err),
    }
}

fn render_question(question: &PendingQuestion) -> String {
    format!(
        "{}\n\n{}\n\nSubmit with `answer A`, `answer B`, `answer C` or `answer D`.",
        question.module(),
        question.question_text()
    )
}

fn render_outcome(outcome: &GradeOutcome) -> String {
    if outcome.module_completed {
        return outcome.notice.to_string();
    }
    format!(
        "{}\nMastery Level: {} / 2 Correct",
        outcome.notice, outcome.consecutive_correct
    )
}

fn render_status(session: &TrainingSession) -> String {
    let quiz = session.quiz();
    let stage = quiz.stage();
    let mut text = String::new();

    match session.trainee() {
        Some(trainee) => {
            let _ = writeln!(text, "Trainee: {} <{}>", trainee.full_name(), trainee.email());
        }
        None => text.push_str("Trainee: not registered\n"),
    }
    let _ = writeln!(text, "Stage: {stage}");

    for module in TrainingModule::ALL {
        let state = if stage.is_completed(module) {
            "complete".to_string()
        } else if stage.is_unlocked(module) {
            let progress = quiz.progress(module);
            format!(
                "Mastery Level: {} / {} Correct",
                progress.consecutive_correct(),
                progress.threshold()
            )
        } else {
            "locked".to_string()
        };
        let _ = writeln!(text, "{module}: {state}");
    }

    match (quiz.is_quiz_active(), quiz.active_module()) {
        (true, Some(module)) => {
            let _ = writeln!(text, "Quiz in progress: {module}");
        }
        _ => {
            if let Some(next) = stage.current_module() {
                let _ = writeln!(text, "Next up: {next} (`quiz {}`)", next.number());
            }
        }
    }

    let mentor = if quiz.assistant_unlocked() {
        "available (`ask <question>`)"
    } else {
        "locked"
    };
    let _ = write!(text, "Live Jump Mentor: {mentor}");
    text
}

fn render_certificate(session: &TrainingSession) -> String {
    let Some(certificate) = session.certificate() else {
        return "No certificate yet. Master all three sections first.".to_string();
    };
    let name = session
        .trainee()
        .map_or("Unregistered trainee", |trainee| trainee.full_name());
    format!(
        "CERTIFICATE OF COMPLETION\n{name}\nSkyHigh Skydiving Academy, AI-assisted ground school\nCertificate ID: {}\nIssued: {}\n\nThe Live Jump Mentor is now available: `ask <question>`.",
        certificate.certificate_id(),
        certificate.issued_at().format("%Y-%m-%d"),
    )
}
