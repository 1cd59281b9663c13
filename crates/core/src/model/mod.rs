mod answer;
mod certificate;
mod generator_settings;
mod module;
mod progress;
mod question;
mod stage;
mod topic;
mod trainee;
mod transcript;

pub use answer::{AnswerLetter, AnswerLetterError};
pub use certificate::Certificate;
pub use generator_settings::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, GeneratorSettings, GeneratorSettingsDraft,
    GeneratorSettingsError,
};
pub use module::TrainingModule;
pub use progress::{MASTERY_THRESHOLD, ModuleProgress};
pub use question::{
    ANSWER_KEY_DELIMITER, GeneratedQuestion, PendingQuestion, QUESTION_LABEL, ReplyFormatError,
    parse_generated_question,
};
pub use stage::{TrainingStage, TrainingStageError};
pub use topic::TopicFocus;
pub use trainee::{Trainee, TraineeDraft, TraineeError};
pub use transcript::AssistantTurn;
