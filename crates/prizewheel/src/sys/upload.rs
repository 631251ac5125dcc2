use crate::config::Endpoint;
use crate::events::AppEvent;
use crate::form::Submission;
use async_channel::{Receiver, Sender};

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub endpoint: Endpoint,
    pub submission: Submission,
}

/// Posts the submission form-encoded. Any non-2xx status is an error.
pub fn post_submission(
    agent: &ureq::Agent,
    endpoint: &Endpoint,
    submission: &Submission,
) -> anyhow::Result<u16> {
    let resp = agent.post(endpoint).send_form(&submission.form_fields())?;
    Ok(resp.status())
}

/// Fire-and-forget uploads: failures are logged and never retried.
pub async fn run_uploader(requests: Receiver<UploadRequest>, tx: Sender<AppEvent>) {
    let agent = ureq::agent();

    while let Ok(request) = requests.recv().await {
        let agent = agent.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let UploadRequest {
                endpoint,
                submission,
            } = request;
            let sent = submission.clone();
            let result = tokio::task::spawn_blocking(move || {
                post_submission(&agent, &endpoint, &submission)
            })
            .await;

            match result {
                Ok(Ok(status)) => {
                    log::info!("Uploaded submission for {} ({})", sent.name, status);
                    let _ = tx.send(AppEvent::Uploaded(sent)).await;
                }
                Ok(Err(e)) => log::error!("Upload failed: {:#}", e),
                Err(e) => log::error!("Upload task failed: {}", e),
            }
        });
    }
}
