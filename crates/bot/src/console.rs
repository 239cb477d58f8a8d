//! Interactive stdin/stdout transport.
//!
//! Inline options and keyboard choices are printed numbered; typing a number
//! picks the matching option from the most recent menu.

use async_trait::async_trait;
use tokio::io::{stdin, stdout, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

use workact_core::{ConversationId, OperatorId};

use crate::transport::{IncomingMessage, Payload, Reply, Transport, TransportError};

/// Choices a bare number can refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Choices {
    #[default]
    None,
    /// Callback data of inline options.
    Inline(Vec<String>),
    /// Reply keyboard texts.
    Keyboard(Vec<String>),
}

pub struct ConsoleTransport {
    lines: Lines<BufReader<Stdin>>,
    out: Stdout,
    conversation: ConversationId,
    operator: OperatorId,
    choices: Choices,
}

impl ConsoleTransport {
    pub fn new(operator: OperatorId) -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
            out: stdout(),
            conversation: ConversationId::new(operator.get()),
            operator,
            choices: Choices::None,
        }
    }

    async fn write(&mut self, text: &str) -> Result<(), TransportError> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}

/// Classify one typed line against the current choices.
fn parse_line(line: &str, choices: &Choices) -> Option<Payload> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(command) = line.strip_prefix('/') {
        let (name, args) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
        return Some(Payload::Command {
            name: name.to_string(),
            args: args.trim().to_string(),
        });
    }

    let picked = line
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1));
    match (choices, picked) {
        (Choices::Inline(data), Some(i)) if i < data.len() => Some(Payload::Callback(data[i].clone())),
        (Choices::Keyboard(texts), Some(i)) if i < texts.len() => Some(Payload::Text(texts[i].clone())),
        _ => Some(Payload::Text(line.to_string())),
    }
}

fn numbered<'a>(text: &str, labels: impl Iterator<Item = &'a str>) -> String {
    let mut out = format!("{text}\n");
    for (i, label) in labels.enumerate() {
        out.push_str(&format!("  [{}] {label}\n", i + 1));
    }
    out
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn recv(&mut self) -> Result<Option<IncomingMessage>, TransportError> {
        loop {
            self.write("> ").await?;
            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            if let Some(payload) = parse_line(&line, &self.choices) {
                return Ok(Some(IncomingMessage {
                    conversation: self.conversation,
                    operator: self.operator,
                    payload,
                }));
            }
        }
    }

    async fn send(&mut self, _conversation: ConversationId, reply: Reply) -> Result<(), TransportError> {
        let rendered = match reply {
            Reply::Text(text) => {
                // Free-text questions retire the previous menu.
                self.choices = Choices::None;
                format!("{text}\n")
            }
            Reply::RemoveKeyboard(text) => {
                self.choices = Choices::None;
                format!("{text}\n")
            }
            Reply::Keyboard { text, options } => {
                let out = numbered(&text, options.iter().map(String::as_str));
                self.choices = Choices::Keyboard(options);
                out
            }
            Reply::Options { text, options } => {
                let out = numbered(&text, options.iter().map(|o| o.label.as_str()));
                self.choices = Choices::Inline(options.into_iter().map(|o| o.data).collect());
                out
            }
            Reply::Document(document) => format!("📄 {document}\n"),
        };
        self.write(&rendered).await
    }
}
