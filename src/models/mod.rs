pub mod loaders;
pub mod question;
pub mod response;
pub mod topic;
pub mod upload;

pub use loaders::load_uploaded_file;
pub use question::{GeneratedQuestion, GeneratedQuestionList};
pub use response::{QuestionsResponse, UploadResponse};
pub use topic::{build_topics_param, TopicQuestionCounts, TopicSet, DEFAULT_QUESTION_COUNT};
pub use upload::{FileInfo, UploadedFile};
