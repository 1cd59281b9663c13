use thiserror::Error;
use training_core::model::{AnswerLetter, TrainingModule};

pub const HELP: &str = "\
Commands:
  register <full name> | <email>   record who is training
  status                           show stage and mastery per section
  quiz <1|2|3>                     start or resume a section quiz
  question                         show (or re-fetch) the current question
  answer <A|B|C|D>                 submit your choice
  ask <question>                   ask the Live Jump Mentor (after graduation)
  certificate                      show your graduation certificate
  reset                            wipe all progress
  help                             this list
  quit                             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Register { full_name: String, email: String },
    Quiz(TrainingModule),
    Question,
    Answer(Option<AnswerLetter>),
    Ask(String),
    Certificate,
    Reset,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("type `help` to see the available commands")]
    Empty,
    #[error("unknown command `{0}`; type `help` for the list")]
    Unknown(String),
    #[error("usage: register <full name> | <email>")]
    RegisterUsage,
    #[error("usage: quiz <1|2|3>")]
    QuizUsage,
    #[error("there is no section `{0}`; choose 1, 2 or 3")]
    InvalidModule(String),
    #[error("`{0}` is not an option; choose A, B, C or D")]
    InvalidChoice(String),
}

/// Parse one input line.
///
/// Answer options are shown as fixed labels; typing the label in either case
/// selects it. An `answer` with nothing after it is an empty selection.
///
/// # Errors
///
/// Returns `CommandError` when the line does not match a command.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "help" | "?" => Ok(Command::Help),
        "status" => Ok(Command::Status),
        "register" => parse_register(rest),
        "quiz" => parse_quiz(rest),
        "question" => Ok(Command::Question),
        "answer" => parse_answer(rest),
        "ask" => Ok(Command::Ask(rest.to_string())),
        "certificate" => Ok(Command::Certificate),
        "reset" => Ok(Command::Reset),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_register(rest: &str) -> Result<Command, CommandError> {
    let (full_name, email) = rest.split_once('|').ok_or(CommandError::RegisterUsage)?;
    Ok(Command::Register {
        full_name: full_name.trim().to_string(),
        email: email.trim().to_string(),
    })
}

fn parse_quiz(rest: &str) -> Result<Command, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::QuizUsage);
    }
    rest.parse::<u8>()
        .ok()
        .and_then(TrainingModule::from_number)
        .map(Command::Quiz)
        .ok_or_else(|| CommandError::InvalidModule(rest.to_string()))
}

fn parse_answer(rest: &str) -> Result<Command, CommandError> {
    if rest.is_empty() {
        return Ok(Command::Answer(None));
    }
    let label = match rest {
        "a" | "A" => AnswerLetter::A,
        "b" | "B" => AnswerLetter::B,
        "c" | "C" => AnswerLetter::C,
        "d" | "D" => AnswerLetter::D,
        _ => return Err(CommandError::InvalidChoice(rest.to_string())),
    };
    Ok(Command::Answer(Some(label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_verbs() {
        assert_eq!(parse("help"), Ok(Command::Help));
        assert_eq!(parse("  STATUS "), Ok(Command::Status));
        assert_eq!(parse("certificate"), Ok(Command::Certificate));
        assert_eq!(parse("reset"), Ok(Command::Reset));
        assert_eq!(parse("exit"), Ok(Command::Quit));
        assert_eq!(parse("question"), Ok(Command::Question));
        assert_eq!(parse(""), Err(CommandError::Empty));
        assert_eq!(parse("fly"), Err(CommandError::Unknown("fly".into())));
    }

    #[test]
    fn register_splits_on_pipe() {
        assert_eq!(
            parse("register Ada Lovelace | ada@example.com"),
            Ok(Command::Register {
                full_name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
            })
        );
        assert_eq!(
            parse("register Ada Lovelace"),
            Err(CommandError::RegisterUsage)
        );
        // blank fields are left for registration to reject
        assert_eq!(
            parse("register | "),
            Ok(Command::Register {
                full_name: String::new(),
                email: String::new(),
            })
        );
    }

    #[test]
    fn quiz_takes_a_section_number() {
        assert_eq!(parse("quiz 1"), Ok(Command::Quiz(TrainingModule::PreFlight)));
        assert_eq!(parse("quiz 3"), Ok(Command::Quiz(TrainingModule::Crisis)));
        assert_eq!(parse("quiz"), Err(CommandError::QuizUsage));
        assert_eq!(parse("quiz 4"), Err(CommandError::InvalidModule("4".into())));
        assert_eq!(parse("quiz x"), Err(CommandError::InvalidModule("x".into())));
    }

    #[test]
    fn answer_maps_labels_and_allows_no_selection() {
        assert_eq!(parse("answer B"), Ok(Command::Answer(Some(AnswerLetter::B))));
        assert_eq!(parse("answer d"), Ok(Command::Answer(Some(AnswerLetter::D))));
        assert_eq!(parse("answer"), Ok(Command::Answer(None)));
        assert_eq!(
            parse("answer E"),
            Err(CommandError::InvalidChoice("E".into()))
        );
        assert_eq!(
            parse("answer A)"),
            Err(CommandError::InvalidChoice("A)".into()))
        );
    }

    #[test]
    fn ask_keeps_the_question_text() {
        assert_eq!(
            parse("ask What is the minimum opening altitude?"),
            Ok(Command::Ask("What is the minimum opening altitude?".into()))
        );
        assert_eq!(parse("ask"), Ok(Command::Ask(String::new())));
    }
}
