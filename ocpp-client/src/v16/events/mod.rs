mod decisions;
mod ocpp;
mod timeouts;
mod websocket;
