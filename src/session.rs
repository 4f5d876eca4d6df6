//! [`Session`] is the context object owned by whatever surface collects the
//! form: it holds the request state and the last [`GenerationResult`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    client::{self, Backend, ClientOptions},
    export::Download,
    key, Client, GenerationRequest, GenerationResult, Key,
};

/// Result type for the session. See also [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Where a [`Session`] is in its single request cycle.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
    derive_more::Display,
)]
pub enum State {
    /// Ready for a submit.
    #[default]
    Idle,
    /// A request is in flight.
    #[display("Awaiting response")]
    AwaitingResponse,
}

/// Error shown to the user. Neither kind is fatal: the session is back to
/// [`State::Idle`] after either.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Submit was attempted without a credential. No request was made.
    #[error("Please enter your Hugging Face API token.")]
    MissingCredential,
    /// The request failed. Carries the description of the underlying error.
    #[error("Error generating poem: {message}")]
    GenerationFailure {
        #[allow(missing_docs)]
        message: String,
        #[allow(missing_docs)]
        #[source]
        source: client::Error,
    },
    /// There is no poem to export yet.
    #[error("Nothing to export: generate a poem first.")]
    NothingToExport,
    /// The export file could not be written.
    #[error("Could not save poem: {0}")]
    Export(#[from] std::io::Error),
}

impl From<key::MissingCredential> for Error {
    fn from(_: key::MissingCredential) -> Self {
        Self::MissingCredential
    }
}

impl From<client::Error> for Error {
    fn from(source: client::Error) -> Self {
        match source {
            client::Error::MissingCredential(_) => Self::MissingCredential,
            source => Self::GenerationFailure {
                message: source.to_string(),
                source,
            },
        }
    }
}

/// What the user submitted: the [`GenerationRequest`] plus the credential.
#[derive(Clone, Default)]
pub struct FormInput<'a> {
    /// Poetic parameters and model choice.
    pub request: GenerationRequest<'a>,
    /// Hugging Face token, possibly empty.
    pub credential: String,
}

impl std::fmt::Debug for FormInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormInput")
            .field("request", &self.request)
            .field("credential", &"**redacted**")
            .finish()
    }
}

/// Request state and the single "last result" slot for one user.
///
/// A [`Session`] is meant to be owned by the calling surface and passed
/// around explicitly. [`Self::submit`] takes `&mut self`, so only one request
/// can be in flight per session.
#[derive(Debug, Default)]
pub struct Session {
    state: State,
    last: Option<GenerationResult>,
    options: ClientOptions,
}

impl Session {
    /// Create an idle session with default [`ClientOptions`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle session whose clients use `options`.
    pub fn with_options(options: ClientOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Current [`State`].
    pub fn state(&self) -> State {
        self.state
    }

    /// The last successful [`GenerationResult`], if any.
    pub fn last(&self) -> Option<&GenerationResult> {
        self.last.as_ref()
    }

    /// Forget the last result.
    pub fn clear(&mut self) -> Option<GenerationResult> {
        self.last.take()
    }

    /// Generate a poem from `input` with a [`Client`] built from its
    /// credential.
    ///
    /// - An empty credential yields [`Error::MissingCredential`] without
    ///   making a request.
    /// - On success the result **replaces** the last one and is returned.
    /// - On failure the last result is left untouched.
    pub async fn submit(
        &mut self,
        input: FormInput<'_>,
    ) -> Result<&GenerationResult> {
        let options = self.options.clone();
        self.submit_with(input, |key| Client::from_key(key, options))
            .await
    }

    /// Like [`Self::submit`], but the backend is made by `connect` from the
    /// validated [`Key`]. `connect` is not called when the credential is
    /// missing.
    pub async fn submit_with<B, F>(
        &mut self,
        input: FormInput<'_>,
        connect: F,
    ) -> Result<&GenerationResult>
    where
        B: Backend,
        F: FnOnce(Key) -> client::Result<B>,
    {
        let FormInput {
            request,
            credential,
        } = input;
        let request = request.with_defaults();
        let key = Key::try_from(credential)?;
        let backend = connect(key)?;

        let outcome = {
            let _pending = Pending::start(&mut self.state);
            backend.generate(&request).await
        };

        let response = outcome?;
        Ok(self.last.insert(GenerationResult::new(&request, response)))
    }

    /// Save the last poem to a one-shot [`Download`] named after `title`.
    pub fn export(&self, title: &str) -> Result<Download> {
        let last = self.last.as_ref().ok_or(Error::NothingToExport)?;
        Ok(Download::new(&last.text, title)?)
    }

    /// Save the last poem into `dir`. Returns the path written.
    pub fn export_to(
        &self,
        title: &str,
        dir: impl AsRef<Path>,
    ) -> Result<std::path::PathBuf> {
        Ok(self.export(title)?.persist_in(dir)?)
    }

}

fn transition(state: &mut State, to: State) {
    #[cfg(feature = "log")]
    log::debug!("Session: {} -> {}", state, to);

    *state = to;
}

/// Holds a session in [`State::AwaitingResponse`] and puts it back to
/// [`State::Idle`] when dropped, including when the submit future is
/// dropped before it completes.
struct Pending<'s>(&'s mut State);

impl<'s> Pending<'s> {
    fn start(state: &'s mut State) -> Self {
        transition(state, State::AwaitingResponse);
        Self(state)
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        transition(self.0, State::Idle);
    }
}
