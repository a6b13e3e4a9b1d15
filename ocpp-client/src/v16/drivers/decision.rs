#[cfg(feature = "async")]
use std::{
    collections::VecDeque,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

pub type DecisionTicket = u64;

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Yes,
    No,
}

impl Verdict {
    pub fn accepted(self) -> bool {
        self == Verdict::Yes
    }
}

/// Server commands that need an operator's judgment before they are answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prompt {
    RemoteStart,
    RemoteStop,
    GetCompositeSchedule,
    SetChargingProfile,
    ClearChargingProfile,
    Reset,
    UpdateFirmware,
    GetDiagnostics,
}

impl Prompt {
    pub fn name(&self) -> &'static str {
        match self {
            Prompt::RemoteStart => "RemoteStart",
            Prompt::RemoteStop => "RemoteStop",
            Prompt::GetCompositeSchedule => "GetCompositeSchedule",
            Prompt::SetChargingProfile => "SetChargingProfile",
            Prompt::ClearChargingProfile => "ClearChargingProfile",
            Prompt::Reset => "Reset",
            Prompt::UpdateFirmware => "UpdateFirmware",
            Prompt::GetDiagnostics => "GetDiagnostics",
        }
    }

    fn article(&self) -> &'static str {
        match self {
            Prompt::UpdateFirmware => "An",
            _ => "A",
        }
    }

    /// The question put to a human operator.
    pub fn question(&self) -> String {
        match self {
            Prompt::UpdateFirmware | Prompt::GetDiagnostics => format!(
                "{} {} was received. Should the charging station succeed? ",
                self.article(),
                self.name()
            ),
            _ => format!(
                "{} {} was received. Should the charging station accept it? ",
                self.article(),
                self.name()
            ),
        }
    }
}

#[cfg(feature = "async")]
pub trait DecisionProvider: Send + Unpin + 'static {
    fn ask(&mut self, ticket: DecisionTicket, prompt: Prompt);
    fn poll_verdict(&mut self, cx: &mut Context<'_>) -> Poll<(DecisionTicket, Verdict)>;
}

#[cfg(feature = "async")]
pub(crate) struct DecisionDriver<P: DecisionProvider> {
    provider: P,
}

#[cfg(feature = "async")]
impl<P: DecisionProvider> DecisionDriver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn ask(&mut self, ticket: DecisionTicket, prompt: Prompt) {
        self.provider.ask(ticket, prompt);
    }
}

#[cfg(feature = "async")]
impl<P: DecisionProvider> Future for DecisionDriver<P> {
    type Output = (DecisionTicket, Verdict);

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.provider.poll_verdict(cx)
    }
}

/// Answers every prompt with [`Verdict::Yes`] without asking anyone.
#[cfg(feature = "async")]
#[derive(Default)]
pub struct AutoAccept {
    answered: VecDeque<DecisionTicket>,
}

#[cfg(feature = "async")]
impl AutoAccept {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "async")]
impl DecisionProvider for AutoAccept {
    fn ask(&mut self, ticket: DecisionTicket, prompt: Prompt) {
        log::info!(
            "AUTO-ACCEPT: {} {} was received and auto-accepted.",
            prompt.article(),
            prompt.name()
        );
        self.answered.push_back(ticket);
    }

    fn poll_verdict(&mut self, _cx: &mut Context<'_>) -> Poll<(DecisionTicket, Verdict)> {
        match self.answered.pop_front() {
            Some(ticket) => Poll::Ready((ticket, Verdict::Yes)),
            None => Poll::Pending,
        }
    }
}
