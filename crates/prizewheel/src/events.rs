use crate::form::Submission;

#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
    Uploaded(Submission),
}
