use std::{
    future::Future,
    mem,
    pin::Pin,
    task::{Context, Poll},
};

/// What the transport reports once it is connected.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Message(String),
    Error(String),
    Closed { code: u16, reason: String },
}

/// Full-duplex text channel to the central system.
#[async_trait::async_trait]
pub trait WebsocketTransport: Send + Unpin + 'static {
    async fn connect(&mut self, url: String) -> Result<(), String>;
    fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<TransportEvent>;
    async fn send(&mut self, msg: String);
    async fn close(&mut self);
}

type ConnectFuture<W> = Pin<Box<dyn Future<Output = (W, Result<(), String>)> + Send>>;

enum WebsocketStage<W: WebsocketTransport> {
    Idle(W),
    Connecting(ConnectFuture<W>),
    Connected(W),
    Failed(W, String),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WebsocketResponse {
    Connected,
    WsMsg(String),
    Error(String),
    Disconnected { code: u16, reason: String },
}

const ABNORMAL_CLOSURE: u16 = 1006;

pub(crate) struct WebsocketClient<W: WebsocketTransport> {
    state: WebsocketStage<W>,
}

impl<W: WebsocketTransport> WebsocketClient<W> {
    pub fn new(ws: W) -> Self {
        Self {
            state: WebsocketStage::Idle(ws),
        }
    }

    pub fn connect(&mut self, url: String) {
        let ws = match mem::replace(&mut self.state, WebsocketStage::Empty) {
            WebsocketStage::Idle(ws) | WebsocketStage::Connected(ws) | WebsocketStage::Failed(ws, _) => ws,
            other => {
                log::warn!("connect requested while a connection attempt is in flight");
                self.state = other;
                return;
            }
        };
        let future = async move {
            let mut ws = ws;
            let res = ws.connect(url).await;
            (ws, res)
        };
        self.state = WebsocketStage::Connecting(Box::pin(future));
    }

    pub async fn close_connection(&mut self) {
        match mem::replace(&mut self.state, WebsocketStage::Empty) {
            WebsocketStage::Connecting(fut) => {
                let (mut ws, _) = fut.await;
                ws.close().await;
                self.state = WebsocketStage::Idle(ws);
            }
            WebsocketStage::Connected(mut ws) => {
                ws.close().await;
                self.state = WebsocketStage::Idle(ws);
            }
            WebsocketStage::Idle(ws) | WebsocketStage::Failed(ws, _) => {
                self.state = WebsocketStage::Idle(ws);
            }
            WebsocketStage::Empty => {}
        }
    }

    pub async fn send_msg(&mut self, msg: String) {
        match &mut self.state {
            WebsocketStage::Connected(ws) => ws.send(msg).await,
            _ => log::warn!("dropping outbound message, transport not connected"),
        }
    }
}

impl<W: WebsocketTransport> Future for WebsocketClient<W> {
    type Output = WebsocketResponse;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match mem::replace(&mut self.state, WebsocketStage::Empty) {
            WebsocketStage::Connecting(mut fut) => match fut.as_mut().poll(cx) {
                Poll::Ready((ws, Ok(()))) => {
                    self.state = WebsocketStage::Connected(ws);
                    Poll::Ready(WebsocketResponse::Connected)
                }
                Poll::Ready((ws, Err(e))) => {
                    self.state = WebsocketStage::Failed(ws, e.clone());
                    Poll::Ready(WebsocketResponse::Error(e))
                }
                Poll::Pending => {
                    self.state = WebsocketStage::Connecting(fut);
                    Poll::Pending
                }
            },
            WebsocketStage::Connected(mut ws) => {
                let res = ws.poll_recv(cx);
                match res {
                    Poll::Ready(TransportEvent::Message(msg)) => {
                        self.state = WebsocketStage::Connected(ws);
                        Poll::Ready(WebsocketResponse::WsMsg(msg))
                    }
                    Poll::Ready(TransportEvent::Error(e)) => {
                        self.state = WebsocketStage::Connected(ws);
                        Poll::Ready(WebsocketResponse::Error(e))
                    }
                    Poll::Ready(TransportEvent::Closed { code, reason }) => {
                        self.state = WebsocketStage::Idle(ws);
                        Poll::Ready(WebsocketResponse::Disconnected { code, reason })
                    }
                    Poll::Pending => {
                        self.state = WebsocketStage::Connected(ws);
                        Poll::Pending
                    }
                }
            }
            WebsocketStage::Failed(ws, reason) => {
                self.state = WebsocketStage::Idle(ws);
                Poll::Ready(WebsocketResponse::Disconnected {
                    code: ABNORMAL_CLOSURE,
                    reason,
                })
            }
            other => {
                self.state = other;
                Poll::Pending
            }
        }
    }
}
