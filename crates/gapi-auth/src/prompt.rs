//! Obtaining the authorization code from the user.
//!
//! [`CodePrompt`] is the single user-interaction point of the flow. The
//! default [`TerminalPrompt`] prints the authorization URL and waits for one
//! line on standard input; tests substitute their own implementation.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{AuthError, AuthResult};

/// A boxed future for the object-safe prompt trait.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Shows the authorization URL and returns the code the user brings back.
pub trait CodePrompt: Send + Sync {
    /// Displays `auth_url` and resolves with the raw code entered by the user.
    fn request_code<'a>(&'a self, auth_url: &'a str) -> BoxFuture<'a, AuthResult<String>>;
}

/// Prompt on the controlling terminal.
///
/// Writes the URL to `W` and reads one line from `R`, standard output and
/// standard input by default. Waits for input without a timeout.
pub struct TerminalPrompt<R = BufReader<Stdin>, W = Stdout> {
    open_browser: bool,
    io: Mutex<(R, W)>,
}

impl TerminalPrompt {
    /// Creates a prompt on standard input and output.
    pub fn new() -> Self {
        Self::with_io(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, W> fmt::Debug for TerminalPrompt<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalPrompt")
            .field("open_browser", &self.open_browser)
            .finish_non_exhaustive()
    }
}

impl<R, W> TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Creates a prompt reading codes from `reader` and writing to `writer`.
    pub fn with_io(reader: R, writer: W) -> Self {
        Self {
            open_browser: false,
            io: Mutex::new((reader, writer)),
        }
    }

    /// Also try to open the URL in the default browser.
    pub fn with_open_browser(mut self, open_browser: bool) -> Self {
        self.open_browser = open_browser;
        self
    }

    /// Returns the reader and writer.
    pub fn into_io(self) -> (R, W) {
        self.io.into_inner()
    }

    async fn prompt(&self, auth_url: &str) -> AuthResult<String> {
        if self.open_browser
            && let Err(e) = open::that(auth_url)
        {
            warn!("failed to open browser: {}", e);
        }

        let mut io = self.io.lock().await;
        let (reader, writer) = &mut *io;

        let banner = format!(
            "Authorize this app by visiting this url:\n{}\n\nEnter the code from that page here: ",
            auth_url
        );
        writer
            .write_all(banner.as_bytes())
            .await
            .map_err(write_error)?;
        writer.flush().await.map_err(write_error)?;

        let mut line = String::new();
        let read = reader.read_line(&mut line).await.map_err(|e| {
            AuthError::prompt(format!("failed to read authorization code: {}", e)).with_source(e)
        })?;

        if read == 0 {
            return Err(AuthError::prompt(
                "standard input closed before an authorization code was entered",
            ));
        }

        debug!("read authorization code from terminal");
        Ok(line)
    }
}

fn write_error(e: std::io::Error) -> AuthError {
    AuthError::prompt(format!("failed to write prompt: {}", e)).with_source(e)
}

impl<R, W> CodePrompt for TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    fn request_code<'a>(&'a self, auth_url: &'a str) -> BoxFuture<'a, AuthResult<String>> {
        Box::pin(self.prompt(auth_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthErrorCode;

    const URL: &str = "https://accounts.google.com/o/oauth2/v2/auth?client_id=test";

    #[tokio::test]
    async fn returns_pasted_line() {
        let input: &[u8] = b"4/0AX4XfWh-code\nsecond line\n";
        let prompt = TerminalPrompt::with_io(input, Vec::new());

        let code = prompt.request_code(URL).await.unwrap();
        assert_eq!(code, "4/0AX4XfWh-code\n");

        let (rest, _) = prompt.into_io();
        assert_eq!(rest, b"second line\n");
    }

    #[tokio::test]
    async fn banner_shows_url_before_reading() {
        let input: &[u8] = b"code\n";
        let prompt = TerminalPrompt::with_io(input, Vec::new());
        prompt.request_code(URL).await.unwrap();

        let (_, output) = prompt.into_io();
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Authorize this app by visiting this url:\n"));
        assert!(output.contains(&format!("\n{}\n", URL)));
        assert!(output.ends_with("Enter the code from that page here: "));
    }

    #[tokio::test]
    async fn closed_input_is_an_error() {
        let input: &[u8] = b"";
        let prompt = TerminalPrompt::with_io(input, Vec::new());

        let err = prompt.request_code(URL).await.unwrap_err();
        assert_eq!(err.code(), AuthErrorCode::Prompt);
        assert!(err.message().contains("closed"));
    }

    #[tokio::test]
    async fn last_line_without_newline_is_returned() {
        let input: &[u8] = b"code-at-eof";
        let prompt = TerminalPrompt::with_io(input, Vec::new());
        assert_eq!(prompt.request_code(URL).await.unwrap(), "code-at-eof");
    }
}
