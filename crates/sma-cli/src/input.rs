//! Input controller: validates user-supplied sources, submits them to the
//! analysis service, and records the resulting session for `sma show`.

use std::path::{Path, PathBuf};

use anyhow::Context;

use sma_client::AnalysisClient;
use sma_core::{
    csv_request, identify_platform, text_request, url_request, AnalyzeRequest, AnalyzeUrlRequest,
    CreatorAnalyzeRequest, CreatorForm, InputMode, ManualPlatform, SessionStore,
};

use crate::indicator::LoadingIndicator;

/// A `--manual PLATFORM=PATH` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ManualSource {
    pub platform: ManualPlatform,
    pub path: PathBuf,
}

/// A validated request ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Submission {
    Comments(AnalyzeRequest),
    Url(AnalyzeUrlRequest),
    Demo,
    Creator(CreatorAnalyzeRequest),
}

impl Submission {
    /// Input mode the submission was made from.
    fn mode(&self) -> InputMode {
        match self {
            Submission::Creator(_) => InputMode::Creator,
            Submission::Comments(_) | Submission::Url(_) | Submission::Demo => InputMode::Single,
        }
    }
}

/// Pasted comments from `file`, or from stdin when no file is given.
pub(crate) fn text_submission(title: &str, file: Option<&Path>) -> anyhow::Result<Submission> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read comments from {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?,
    };
    Ok(Submission::Comments(text_request(&text, title)?))
}

pub(crate) fn url_submission(url: &str) -> anyhow::Result<Submission> {
    let request = url_request(url)?;
    tracing::debug!(url = %request.url, platform = %identify_platform(&request.url), "url submission");
    Ok(Submission::Url(request))
}

pub(crate) fn csv_submission(path: &Path) -> anyhow::Result<Submission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read CSV {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Submission::Comments(csv_request(&content, &file_name)?))
}

/// Builds the creator form from CLI arguments and validates it.
pub(crate) fn creator_submission(
    name: &str,
    urls: &[String],
    manual: &[ManualSource],
) -> anyhow::Result<Submission> {
    let mut form = CreatorForm::new(name);
    for url in urls {
        form.add_url_row(url);
        tracing::debug!(%url, platform = %identify_platform(url), "added url source");
    }
    for source in manual {
        let text = std::fs::read_to_string(&source.path).with_context(|| {
            format!("failed to read manual source {}", source.path.display())
        })?;
        form.add_manual_row(source.platform, &text);
        tracing::debug!(platform = %source.platform, path = %source.path.display(), "added manual source");
    }

    Ok(Submission::Creator(form.submission()?))
}

/// Sends a submission and records the new session.
///
/// The store is only written after the service returns a session id, so a
/// failed submission leaves the previous session in place.
///
/// # Errors
///
/// Returns an error if the service rejects the request, the request cannot
/// complete, or the store cannot be written.
pub(crate) async fn submit(
    client: &AnalysisClient,
    store: &mut SessionStore,
    submission: Submission,
) -> anyhow::Result<String> {
    let mode = submission.mode();
    let kind = mode.session_kind();
    let response = {
        let _loading = LoadingIndicator::show("Analyzing comments...");
        match &submission {
            Submission::Comments(request) => client.analyze(request).await,
            Submission::Url(request) => client.analyze_url(request).await,
            Submission::Demo => client.demo().await,
            Submission::Creator(request) => client.analyze_creator(request).await,
        }
    };

    let response = match response {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(%mode, error = %err, "analysis request failed");
            return Err(err.into());
        }
    };

    store.record_session(&response.session_id, kind)?;
    tracing::info!(session_id = %response.session_id, %kind, "analysis session created");
    println!(
        "Analysis ready (session {}). Run `sma show` to view the report.",
        response.session_id
    );
    Ok(response.session_id)
}
