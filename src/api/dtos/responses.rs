use serde::Serialize;

#[derive(Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    pub recorded: bool,
}

impl WebhookAck {
    pub fn recorded() -> Self {
        Self { status: "received", recorded: true }
    }

    pub fn ignored() -> Self {
        Self { status: "received", recorded: false }
    }
}
